//! Spin credits and the three-reel spin flow

use super::payout::{classify, evaluate, SpinResult};
use super::select::{draw, total_weight};
use crate::balance::{BalanceStore, InsufficientFunds};
use crate::reference::{SlotSymbol, SLOT_SYMBOLS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerminalError {
    #[error(transparent)]
    InsufficientFunds(#[from] InsufficientFunds),

    #[error("No spin credits remaining")]
    NoCredits,

    #[error("Credit purchase must be for at least one spin")]
    ZeroCredits,

    #[error("Symbol table has nothing to draw")]
    EmptyReel,
}

/// Pricing and payout constants for the terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalRules {
    /// Balance deducted per purchased spin credit
    pub spin_cost: u64,
    pub base_jackpot: u64,
    pub consolation: u64,
    /// When each reel stops, measured from the start of the spin
    pub reel_stop_ms: [u32; 3],
}

impl Default for TerminalRules {
    fn default() -> Self {
        Self {
            spin_cost: 100,
            base_jackpot: 1000,
            consolation: 50,
            reel_stop_ms: [600, 1200, 1800],
        }
    }
}

/// One reel coming to rest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReelStop<'a> {
    pub reel: usize,
    pub symbol: &'a SlotSymbol,
    pub delay: Duration,
}

/// Result of a committed spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpinOutcome<'a> {
    /// Reels in stopping order (reel 1, 2, 3)
    pub stops: [ReelStop<'a>; 3],
    pub result: SpinResult,
    pub payout: u64,
}

impl<'a> SpinOutcome<'a> {
    pub fn symbols(&self) -> [&'a SlotSymbol; 3] {
        [self.stops[0].symbol, self.stops[1].symbol, self.stops[2].symbol]
    }

    /// Glyphs joined for display, e.g. "🍒 🔔 💀"
    pub fn glyphs(&self) -> String {
        self.symbols()
            .iter()
            .map(|s| s.glyph)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Slot-machine terminal holding purchased spin credits
#[derive(Debug, Clone)]
pub struct GachaTerminal<'a> {
    symbols: &'a [SlotSymbol],
    rules: TerminalRules,
    credits: u32,
}

impl GachaTerminal<'static> {
    /// Terminal over the built-in symbol table
    pub fn new(rules: TerminalRules) -> Self {
        Self::with_symbols(SLOT_SYMBOLS, rules)
    }
}

impl<'a> GachaTerminal<'a> {
    pub fn with_symbols(symbols: &'a [SlotSymbol], rules: TerminalRules) -> Self {
        Self {
            symbols,
            rules,
            credits: 0,
        }
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn rules(&self) -> &TerminalRules {
        &self.rules
    }

    pub fn symbols(&self) -> &'a [SlotSymbol] {
        self.symbols
    }

    /// Buy `count` spin credits, debiting the balance once.
    ///
    /// Returns the new credit total.
    pub fn buy_credits<B: BalanceStore + ?Sized>(
        &mut self,
        count: u32,
        balance: &mut B,
    ) -> Result<u32, TerminalError> {
        if count == 0 {
            return Err(TerminalError::ZeroCredits);
        }
        let credits = self.credits.saturating_add(count);
        let cost = self
            .rules
            .spin_cost
            .checked_mul(u64::from(count))
            .ok_or(InsufficientFunds {
                required: u64::MAX,
                available: balance.balance(),
            })?;

        if let Err(e) = balance.try_debit(cost) {
            tracing::debug!(count, cost, available = e.available, "credit purchase rejected");
            return Err(e.into());
        }
        self.credits = credits;
        tracing::debug!(count, cost, credits, "credits purchased");
        Ok(credits)
    }

    /// Consume one credit, stop the three reels, and credit any payout.
    pub fn spin<R: Rng + ?Sized, B: BalanceStore + ?Sized>(
        &mut self,
        rng: &mut R,
        balance: &mut B,
    ) -> Result<SpinOutcome<'a>, TerminalError> {
        if self.credits == 0 {
            tracing::debug!("spin rejected: no credits");
            return Err(TerminalError::NoCredits);
        }
        if total_weight(self.symbols) == 0 {
            return Err(TerminalError::EmptyReel);
        }

        let stops = self.stop_reels(rng)?;
        self.credits -= 1;

        let [a, b, c] = [stops[0].symbol, stops[1].symbol, stops[2].symbol];
        let result = classify(a, b, c);
        let payout = evaluate(a, b, c, self.rules.base_jackpot, self.rules.consolation);
        if payout > 0 {
            balance.credit(payout);
        }

        tracing::debug!(
            reels = ?[a.code, b.code, c.code],
            %result,
            payout,
            credits = self.credits,
            "spin resolved"
        );

        Ok(SpinOutcome {
            stops,
            result,
            payout,
        })
    }

    /// Three throw-away draws for the spinning animation. Touches neither
    /// credits nor balance.
    pub fn decoy_frame<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<[&'a SlotSymbol; 3]> {
        Some([
            draw(self.symbols, rng)?,
            draw(self.symbols, rng)?,
            draw(self.symbols, rng)?,
        ])
    }

    fn stop_reels<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<[ReelStop<'a>; 3], TerminalError> {
        let mut stop = |reel: usize| -> Result<ReelStop<'a>, TerminalError> {
            let symbol = draw(self.symbols, rng).ok_or(TerminalError::EmptyReel)?;
            Ok(ReelStop {
                reel,
                symbol,
                delay: Duration::from_millis(u64::from(self.rules.reel_stop_ms[reel])),
            })
        };
        Ok([stop(0)?, stop(1)?, stop(2)?])
    }
}

/// Running totals over many spins
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpinStats {
    pub spins: u64,
    pub wagered: u64,
    pub paid: u64,
    pub jackpots: u64,
    pub consolations: u64,
    pub busts: u64,
    /// Spins with a non-zero payout
    pub wins: u64,
    /// Triple matches per symbol code
    pub triples: BTreeMap<&'static str, u64>,
}

impl SpinStats {
    pub fn record(&mut self, outcome: &SpinOutcome<'_>, cost: u64) {
        self.spins += 1;
        self.wagered += cost;
        self.paid += outcome.payout;
        if outcome.payout > 0 {
            self.wins += 1;
        }
        match outcome.result {
            SpinResult::Jackpot => {
                self.jackpots += 1;
                *self.triples.entry(outcome.stops[0].symbol.code).or_default() += 1;
            }
            SpinResult::Consolation => self.consolations += 1,
            SpinResult::Bust => self.busts += 1,
        }
    }

    /// Paid out / wagered (0 before any spin)
    pub fn return_to_player(&self) -> f64 {
        if self.wagered == 0 {
            return 0.0;
        }
        self.paid as f64 / self.wagered as f64
    }

    /// Fraction of spins that paid anything
    pub fn hit_rate(&self) -> f64 {
        if self.spins == 0 {
            return 0.0;
        }
        self.wins as f64 / self.spins as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::Wallet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ONLY_CHERRY: &[SlotSymbol] = &[SlotSymbol {
        code: "CHERRY",
        glyph: "🍒",
        name: "Cherry",
        weight: 1,
        multiplier: 2,
        excluded: false,
    }];

    const ONLY_SKULL: &[SlotSymbol] = &[SlotSymbol {
        code: "SKULL",
        glyph: "💀",
        name: "Skull",
        weight: 4,
        multiplier: 0,
        excluded: true,
    }];

    #[test]
    fn test_buy_credits_debits_once() {
        let mut terminal = GachaTerminal::new(TerminalRules::default());
        let mut wallet = Wallet::new(1000);
        assert_eq!(terminal.buy_credits(3, &mut wallet), Ok(3));
        assert_eq!(wallet.balance(), 700);
        assert_eq!(terminal.credits(), 3);
    }

    #[test]
    fn test_buy_credits_insufficient_funds() {
        let mut terminal = GachaTerminal::new(TerminalRules::default());
        let mut wallet = Wallet::new(250);
        let err = terminal.buy_credits(3, &mut wallet).unwrap_err();
        assert!(matches!(err, TerminalError::InsufficientFunds(_)));
        assert_eq!(wallet.balance(), 250);
        assert_eq!(terminal.credits(), 0);
        assert_eq!(terminal.buy_credits(0, &mut wallet), Err(TerminalError::ZeroCredits));
    }

    #[test]
    fn test_spin_requires_credit() {
        let mut terminal = GachaTerminal::new(TerminalRules::default());
        let mut wallet = Wallet::new(1000);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            terminal.spin(&mut rng, &mut wallet).unwrap_err(),
            TerminalError::NoCredits
        );
        assert_eq!(wallet.balance(), 1000);
    }

    #[test]
    fn test_spin_jackpot_credits_payout() {
        let mut terminal = GachaTerminal::with_symbols(ONLY_CHERRY, TerminalRules::default());
        let mut wallet = Wallet::new(100);
        let mut rng = StdRng::seed_from_u64(5);
        terminal.buy_credits(1, &mut wallet).unwrap();
        assert_eq!(wallet.balance(), 0);

        let outcome = terminal.spin(&mut rng, &mut wallet).unwrap();
        assert_eq!(outcome.result, SpinResult::Jackpot);
        assert_eq!(outcome.payout, 2000);
        assert_eq!(wallet.balance(), 2000);
        assert_eq!(terminal.credits(), 0);
        assert_eq!(outcome.glyphs(), "🍒 🍒 🍒");
    }

    #[test]
    fn test_triple_skull_pays_nothing() {
        let mut terminal = GachaTerminal::with_symbols(ONLY_SKULL, TerminalRules::default());
        let mut wallet = Wallet::new(100);
        let mut rng = StdRng::seed_from_u64(5);
        terminal.buy_credits(1, &mut wallet).unwrap();
        let outcome = terminal.spin(&mut rng, &mut wallet).unwrap();
        assert_eq!(outcome.result, SpinResult::Jackpot);
        assert_eq!(outcome.payout, 0);
        assert_eq!(wallet.balance(), 0);
    }

    #[test]
    fn test_reels_stop_in_order() {
        let mut terminal = GachaTerminal::new(TerminalRules::default());
        let mut wallet = Wallet::new(100);
        let mut rng = StdRng::seed_from_u64(9);
        terminal.buy_credits(1, &mut wallet).unwrap();
        let outcome = terminal.spin(&mut rng, &mut wallet).unwrap();
        let reels: Vec<usize> = outcome.stops.iter().map(|s| s.reel).collect();
        assert_eq!(reels, vec![0, 1, 2]);
        assert!(outcome.stops.windows(2).all(|w| w[0].delay < w[1].delay));
    }

    #[test]
    fn test_empty_reel_keeps_credit() {
        let empty: &[SlotSymbol] = &[];
        let mut terminal = GachaTerminal::with_symbols(empty, TerminalRules::default());
        let mut wallet = Wallet::new(100);
        let mut rng = StdRng::seed_from_u64(2);
        terminal.buy_credits(1, &mut wallet).unwrap();
        assert_eq!(
            terminal.spin(&mut rng, &mut wallet).unwrap_err(),
            TerminalError::EmptyReel
        );
        assert_eq!(terminal.credits(), 1);
        assert!(terminal.decoy_frame(&mut rng).is_none());
    }

    #[test]
    fn test_decoy_frame_is_free() {
        let terminal = GachaTerminal::new(TerminalRules::default());
        let mut rng = StdRng::seed_from_u64(4);
        assert!(terminal.decoy_frame(&mut rng).is_some());
        assert_eq!(terminal.credits(), 0);
    }

    #[test]
    fn test_balance_conserved_over_many_spins() {
        let rules = TerminalRules::default();
        let mut terminal = GachaTerminal::new(rules.clone());
        let mut wallet = Wallet::new(1_000_000);
        let mut rng = StdRng::seed_from_u64(42);
        let mut stats = SpinStats::default();

        terminal.buy_credits(500, &mut wallet).unwrap();
        for _ in 0..500 {
            let outcome = terminal.spin(&mut rng, &mut wallet).unwrap();
            stats.record(&outcome, rules.spin_cost);
        }

        assert_eq!(stats.spins, 500);
        assert_eq!(stats.jackpots + stats.consolations + stats.busts, 500);
        assert_eq!(wallet.balance(), 1_000_000 - stats.wagered + stats.paid);
        assert!(stats.hit_rate() > 0.0);
    }

    #[test]
    fn test_rules_priced_per_credit() {
        let rules = TerminalRules {
            spin_cost: 40,
            ..TerminalRules::default()
        };
        let mut terminal = GachaTerminal::new(rules.clone());
        assert_eq!(terminal.rules(), &rules);

        let mut wallet = Wallet::new(100);
        assert_eq!(terminal.buy_credits(2, &mut wallet), Ok(2));
        assert_eq!(wallet.balance(), 100 - 2 * terminal.rules().spin_cost);
    }
}
