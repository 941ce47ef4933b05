//! Coin toss command handlers

use super::rng_from;
use crate::cli::CoinCommand;
use crate::config::Config;
use anyhow::{bail, Context, Result};
use rand::Rng;
use trove::{BalanceStore, CoinSide, CoinToss, FlipOutcome, ManualScheduler, WagerPhase, Wallet};

/// Handle the coin command
pub fn handle(command: CoinCommand, config: &Config) -> Result<()> {
    match command {
        CoinCommand::Play {
            side,
            flips,
            bet,
            seed,
        } => {
            let side: CoinSide = side.parse()?;
            let bet = bet.unwrap_or(config.default_bet);
            let mut rng = rng_from(config.seed_or(seed));
            play(side, flips, bet, config.starting_balance, &mut rng)
        }
        CoinCommand::Simulate {
            rounds,
            target,
            bet,
            seed,
        } => {
            let bet = bet.unwrap_or(config.default_bet);
            let mut rng = rng_from(config.seed_or(seed));
            let summary = simulate(rounds, target, bet, &mut rng)?;
            print_summary(&summary, bet);
            Ok(())
        }
    }
}

/// How one streak ended
#[derive(Debug, Clone, PartialEq, Eq)]
struct Streak {
    flips: Vec<FlipOutcome>,
    /// Amount banked, or `None` on a bust
    cashed: Option<u64>,
}

/// Keep calling `side` until `target` wins are banked or a flip is lost
fn play_streak<B, R>(
    toss: &mut CoinToss,
    balance: &mut B,
    side: CoinSide,
    target: u32,
    rng: &mut R,
) -> Result<Streak>
where
    B: BalanceStore,
    R: Rng,
{
    if target == 0 {
        bail!("Target must be at least one win");
    }

    let mut scheduler = ManualScheduler::new();
    let mut flips = Vec::new();

    loop {
        toss.place_bet(side, balance, &mut scheduler)?;
        let flip = scheduler.fire().context("Flip was never scheduled")?;
        let outcome = toss.complete_flip(flip, rng)?;
        flips.push(outcome);

        if !outcome.won {
            toss.reset()?;
            return Ok(Streak {
                flips,
                cashed: None,
            });
        }
        if outcome.streak >= target {
            let banked = toss.cash_out(balance)?;
            return Ok(Streak {
                flips,
                cashed: Some(banked),
            });
        }
    }
}

fn play<R: Rng>(side: CoinSide, target: u32, bet: u64, starting: u64, rng: &mut R) -> Result<()> {
    let mut wallet = Wallet::new(starting);
    let mut toss = CoinToss::new(bet);
    let delay = toss.delay();

    println!("Balance: {}", wallet.balance());
    println!("Betting {} on {} ({} ms per flip)\n", bet, side, delay.as_millis());

    let streak = play_streak(&mut toss, &mut wallet, side, target, rng)?;
    for (n, flip) in streak.flips.iter().enumerate() {
        let verdict = if flip.won { "win" } else { "lose" };
        println!(
            "Flip {:>2}: landed {:<5} {:<4}  streak {}  pot {}",
            n + 1,
            flip.landed.to_string(),
            verdict,
            flip.streak,
            flip.pot
        );
    }

    println!();
    match streak.cashed {
        Some(banked) => println!("Cashed out {}", banked),
        None => println!("Busted"),
    }
    println!("Balance: {}", wallet.balance());

    Ok(())
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Summary {
    rounds: u32,
    cashed: u32,
    busted: u32,
    staked: u64,
    returned: u64,
}

impl Summary {
    fn net(&self) -> i128 {
        i128::from(self.returned) - i128::from(self.staked)
    }
}

/// Play `rounds` independent streaks from a wallet that covers every stake
fn simulate<R: Rng>(rounds: u32, target: u32, bet: u64, rng: &mut R) -> Result<Summary> {
    let staked = bet.saturating_mul(u64::from(rounds));
    let mut wallet = Wallet::new(staked);
    let mut summary = Summary {
        rounds,
        staked,
        ..Summary::default()
    };

    for _ in 0..rounds {
        let mut toss = CoinToss::new(bet);
        let streak = play_streak(&mut toss, &mut wallet, CoinSide::toss(rng), target, rng)?;
        debug_assert_eq!(toss.phase(), WagerPhase::Idle);
        match streak.cashed {
            Some(banked) => {
                summary.cashed += 1;
                summary.returned += banked;
            }
            None => summary.busted += 1,
        }
    }

    tracing::info!(
        rounds,
        target,
        balance = wallet.balance(),
        "simulation finished"
    );
    Ok(summary)
}

fn print_summary(summary: &Summary, bet: u64) {
    let rate = if summary.rounds == 0 {
        0.0
    } else {
        f64::from(summary.cashed) * 100.0 / f64::from(summary.rounds)
    };

    println!("Rounds:    {}", summary.rounds);
    println!("Bet:       {}", bet);
    println!("Cashed:    {} ({:.1}%)", summary.cashed, rate);
    println!("Busted:    {}", summary.busted);
    println!("Staked:    {}", summary.staked);
    println!("Returned:  {}", summary.returned);
    println!("Net:       {}", summary.net());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_streak_ends_in_cash_or_bust() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let mut wallet = Wallet::new(1000);
            let mut toss = CoinToss::new(100);
            let streak =
                play_streak(&mut toss, &mut wallet, CoinSide::Heads, 2, &mut rng).unwrap();

            assert_eq!(toss.phase(), WagerPhase::Idle);
            match streak.cashed {
                Some(banked) => {
                    assert_eq!(streak.flips.len(), 2);
                    assert!(streak.flips.iter().all(|f| f.won));
                    assert_eq!(wallet.balance(), 900 + banked);
                }
                None => {
                    assert!(!streak.flips.last().unwrap().won);
                    assert_eq!(wallet.balance(), 900);
                }
            }
        }
    }

    #[test]
    fn test_streak_rejects_zero_target() {
        let mut wallet = Wallet::new(1000);
        let mut toss = CoinToss::new(100);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(play_streak(&mut toss, &mut wallet, CoinSide::Tails, 0, &mut rng).is_err());
        assert_eq!(wallet.balance(), 1000);
    }

    #[test]
    fn test_streak_without_funds() {
        let mut wallet = Wallet::new(50);
        let mut toss = CoinToss::new(100);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(play_streak(&mut toss, &mut wallet, CoinSide::Heads, 1, &mut rng).is_err());
        assert_eq!(wallet.balance(), 50);
    }

    #[test]
    fn test_simulate_accounts_every_round() {
        let mut rng = StdRng::seed_from_u64(17);
        let summary = simulate(1_000, 1, 10, &mut rng).unwrap();

        assert_eq!(summary.cashed + summary.busted, 1_000);
        assert_eq!(summary.staked, 10_000);
        // One win banks 4x the bet
        assert_eq!(summary.returned, u64::from(summary.cashed) * 40);
        let rate = f64::from(summary.cashed) / 1_000.0;
        assert!((rate - 0.5).abs() < 0.06, "cash-out rate {}", rate);
    }
}
