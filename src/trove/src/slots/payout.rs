//! Payout rules for a three-reel result

use crate::reference::SlotSymbol;
use serde::Serialize;

/// Which payout rule a reel result falls under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinResult {
    /// All three symbols identical (pays `base_jackpot * multiplier`, which
    /// is 0 for a symbol with multiplier 0)
    Jackpot,
    /// No match and no excluded symbol
    Consolation,
    /// Excluded symbol present without a triple
    Bust,
}

impl std::fmt::Display for SpinResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpinResult::Jackpot => write!(f, "Jackpot"),
            SpinResult::Consolation => write!(f, "Consolation"),
            SpinResult::Bust => write!(f, "Bust"),
        }
    }
}

/// Classify three symbols. Reel order does not matter.
pub fn classify(a: &SlotSymbol, b: &SlotSymbol, c: &SlotSymbol) -> SpinResult {
    if a.code == b.code && b.code == c.code {
        SpinResult::Jackpot
    } else if !(a.excluded || b.excluded || c.excluded) {
        SpinResult::Consolation
    } else {
        SpinResult::Bust
    }
}

/// Payout for three symbols.
///
/// Triple skulls go through the jackpot rule and pay `base_jackpot * 0`;
/// keep both paths when touching these rules.
pub fn evaluate(
    a: &SlotSymbol,
    b: &SlotSymbol,
    c: &SlotSymbol,
    base_jackpot: u64,
    consolation: u64,
) -> u64 {
    match classify(a, b, c) {
        SpinResult::Jackpot => base_jackpot.saturating_mul(a.multiplier),
        SpinResult::Consolation => consolation,
        SpinResult::Bust => 0,
    }
}
