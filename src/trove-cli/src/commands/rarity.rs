//! Rarity table command handlers

use crate::cli::RarityCommand;
use anyhow::Result;
use trove::{odds_display, RARITY_TIERS, VARIANTS};

pub fn handle(command: RarityCommand) -> Result<()> {
    match command {
        RarityCommand::List => {
            list();
            Ok(())
        }
    }
}

fn list() {
    print!("{:<4} {:<12} {:<10}", "ID", "Tier", "Color");
    for variant in VARIANTS {
        print!(" {:>14}", variant.name);
    }
    println!();
    println!("{}", "-".repeat(28 + 15 * VARIANTS.len()));

    for tier in RARITY_TIERS {
        print!("{:<4} {:<12} {:<10}", tier.id, tier.name, tier.color);
        for variant in VARIANTS {
            let odds = odds_display(tier.id, variant.id).unwrap_or_else(|| "-".to_string());
            print!(" {:>14}", odds);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_does_not_panic() {
        assert!(handle(RarityCommand::List).is_ok());
    }
}
