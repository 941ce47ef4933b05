//! Gacha terminal: weighted reel draws, payout rules, and the spin flow.

mod payout;
mod select;
mod terminal;

pub use payout::{classify, evaluate, SpinResult};
pub use select::{draw, probability, total_weight, Weighted};
pub use terminal::{GachaTerminal, ReelStop, SpinOutcome, SpinStats, TerminalError, TerminalRules};
