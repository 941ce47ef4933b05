//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting trove CLI defaults.

use crate::config::Config;
use anyhow::Result;

/// Values passed on the command line; `None` leaves a setting alone
#[derive(Debug, Default, Clone, Copy)]
pub struct Update {
    pub balance: Option<u64>,
    pub bet: Option<u64>,
    pub seed: Option<u64>,
    pub spin_cost: Option<u64>,
}

impl Update {
    fn is_empty(&self) -> bool {
        self.balance.is_none()
            && self.bet.is_none()
            && self.seed.is_none()
            && self.spin_cost.is_none()
    }

    /// Apply to `config`, returning what changed
    fn apply(&self, config: &mut Config) -> Vec<String> {
        let mut changed = Vec::new();
        if let Some(balance) = self.balance {
            config.starting_balance = balance;
            changed.push(format!("Starting balance: {}", balance));
        }
        if let Some(bet) = self.bet {
            config.default_bet = bet;
            changed.push(format!("Default bet: {}", bet));
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
            changed.push(format!("Seed: {}", seed));
        }
        if let Some(cost) = self.spin_cost {
            config.terminal.spin_cost = cost;
            changed.push(format!("Spin cost: {}", cost));
        }
        changed
    }
}

/// Handle the configure command
pub fn handle(update: Update, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if update.is_empty() {
        show_usage();
        return Ok(());
    }

    for line in update.apply(&mut config) {
        println!("{}", line);
    }
    let path = config.save()?;
    println!("Config saved to: {}", path.display());

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    println!("Starting balance: {}", config.starting_balance);
    println!("Default bet:      {}", config.default_bet);
    match config.seed {
        Some(seed) => println!("Seed:             {}", seed),
        None => println!("Seed:             (random)"),
    }
    println!("Spin cost:        {}", config.terminal.spin_cost);
    println!("Base jackpot:     {}", config.terminal.base_jackpot);
    println!("Consolation:      {}", config.terminal.consolation);

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

fn show_usage() {
    println!("Usage: trove configure [--balance N] [--bet N] [--seed N] [--spin-cost N]");
    println!("   or: trove configure --show");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update() {
        assert!(Update::default().is_empty());
        let update = Update {
            seed: Some(3),
            ..Update::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut config = Config::default();
        let update = Update {
            bet: Some(250),
            spin_cost: Some(40),
            ..Update::default()
        };

        let changed = update.apply(&mut config);
        assert_eq!(changed.len(), 2);
        assert_eq!(config.default_bet, 250);
        assert_eq!(config.terminal.spin_cost, 40);
        assert_eq!(config.starting_balance, Config::default().starting_balance);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
        show_config(&Config::default());
    }
}
