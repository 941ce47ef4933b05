//! Gacha terminal command handlers

use super::rng_from;
use crate::cli::SlotsCommand;
use crate::config::Config;
use anyhow::{Context, Result};
use rand::Rng;
use trove::reference::SLOT_SYMBOLS;
use trove::slots::probability;
use trove::{
    evaluate, format_probability, BalanceStore, GachaTerminal, SpinStats, TerminalRules, Wallet,
};

/// Handle the slots command
pub fn handle(command: SlotsCommand, config: &Config) -> Result<()> {
    match command {
        SlotsCommand::Odds => {
            odds(&config.terminal);
            Ok(())
        }
        SlotsCommand::Simulate { spins, seed } => {
            let mut rng = rng_from(config.seed_or(seed));
            let stats = simulate(spins, &config.terminal, &mut rng)?;
            print_stats(&stats, spins);
            Ok(())
        }
    }
}

/// Chance that all three reels land on the same symbol, per symbol
fn triple_odds() -> Vec<f64> {
    (0..SLOT_SYMBOLS.len())
        .map(|i| probability(SLOT_SYMBOLS, i).unwrap_or(0.0).powi(3))
        .collect()
}

fn odds(rules: &TerminalRules) {
    println!(
        "{:<8} {:<5} {:>6} {:>8} {:>14} {:>8}",
        "Symbol", "", "Weight", "Draw", "Triple", "Payout"
    );
    println!("{}", "-".repeat(54));

    let triples = triple_odds();
    for (i, symbol) in SLOT_SYMBOLS.iter().enumerate() {
        let draw = probability(SLOT_SYMBOLS, i).unwrap_or(0.0);
        let triple = if triples[i] > 0.0 {
            format_probability(1.0 / triples[i], 1.0)
        } else {
            "-".to_string()
        };
        println!(
            "{:<8} {:<5} {:>6} {:>7.1}% {:>14} {:>8}",
            symbol.code,
            symbol.glyph,
            symbol.weight,
            draw * 100.0,
            triple,
            evaluate(
                symbol,
                symbol,
                symbol,
                rules.base_jackpot,
                rules.consolation
            )
        );
    }

    let jackpot: f64 = triples.iter().sum();
    let clean: f64 = SLOT_SYMBOLS
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.excluded)
        .map(|(i, _)| probability(SLOT_SYMBOLS, i).unwrap_or(0.0))
        .sum::<f64>()
        .powi(3);
    let clean_triples: f64 = SLOT_SYMBOLS
        .iter()
        .zip(&triples)
        .filter(|(s, _)| !s.excluded)
        .map(|(_, p)| p)
        .sum();
    let consolation = clean - clean_triples;

    println!();
    println!("Spin cost:   {}", rules.spin_cost);
    println!("Jackpot:     {:>6.2}%", jackpot * 100.0);
    println!(
        "Consolation: {:>6.2}% (pays {})",
        consolation * 100.0,
        rules.consolation
    );
    println!(
        "Bust:        {:>6.2}%",
        (1.0 - jackpot - consolation) * 100.0
    );
}

/// Buy `spins` credits with exactly enough balance and spend them all
fn simulate<R: Rng>(spins: u32, rules: &TerminalRules, rng: &mut R) -> Result<SpinStats> {
    let cost = rules.spin_cost;
    let mut wallet = Wallet::new(cost.saturating_mul(u64::from(spins)));
    let mut terminal = GachaTerminal::new(rules.clone());
    let mut stats = SpinStats::default();

    if spins == 0 {
        return Ok(stats);
    }
    terminal
        .buy_credits(spins, &mut wallet)
        .context("Failed to buy spin credits")?;

    while terminal.credits() > 0 {
        let outcome = terminal.spin(rng, &mut wallet).context("Spin failed")?;
        stats.record(&outcome, cost);
    }

    tracing::info!(
        spins,
        balance = wallet.balance(),
        paid = stats.paid,
        "simulation finished"
    );
    Ok(stats)
}

fn print_stats(stats: &SpinStats, spins: u32) {
    let pct = |n: u64| {
        if stats.spins == 0 {
            0.0
        } else {
            n as f64 * 100.0 / stats.spins as f64
        }
    };

    println!("Spins:        {}", spins);
    println!("Wagered:      {}", stats.wagered);
    println!("Paid out:     {}", stats.paid);
    println!("RTP:          {:.1}%", stats.return_to_player() * 100.0);
    println!("Hit rate:     {:.1}%", stats.hit_rate() * 100.0);
    println!();
    println!("Jackpots:     {:>8} ({:.2}%)", stats.jackpots, pct(stats.jackpots));
    println!(
        "Consolations: {:>8} ({:.2}%)",
        stats.consolations,
        pct(stats.consolations)
    );
    println!("Busts:        {:>8} ({:.2}%)", stats.busts, pct(stats.busts));

    if !stats.triples.is_empty() {
        println!();
        println!("Triples:");
        for (code, count) in &stats.triples {
            println!("  {:<8} {}", code, count);
        }
    }
}
