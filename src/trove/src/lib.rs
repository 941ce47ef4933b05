//! # trove
//!
//! Reward resolution and collection aggregation core for the trove
//! collection game.
//!
//! This library provides:
//! - Static catalogs of rarity tiers, cosmetic variants and reel symbols
//! - Weighted symbol draws and slot payout rules for the gacha terminal
//! - The double-or-nothing coin toss as an explicit state machine
//! - Grouping, sorting and completion math for inventory screens
//!
//! Rendering is someone else's job: callers hand in the player's balance
//! and item lists, and get back view-model values and state transitions.
//!
//! ## Example
//!
//! ```
//! use trove::{BalanceStore, CoinSide, CoinToss, ManualScheduler, Wallet};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut wallet = Wallet::new(1000);
//! let mut scheduler = ManualScheduler::new();
//! let mut toss = CoinToss::new(100);
//!
//! // Stake the bet; the flip resolves when the scheduler fires
//! toss.place_bet(CoinSide::Heads, &mut wallet, &mut scheduler)?;
//! assert_eq!(wallet.balance(), 900);
//!
//! let flip = scheduler.fire().ok_or("flip was not scheduled")?;
//! let outcome = toss.settle(flip, CoinSide::Heads)?;
//! assert!(outcome.won);
//!
//! let banked = toss.cash_out(&mut wallet)?;
//! assert_eq!(wallet.balance(), 900 + banked);
//! # Ok(())
//! # }
//! ```

pub mod balance;
pub mod catalog;
pub mod collection;
pub mod reference;
pub mod slots;
pub mod wager;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used items
#[doc(inline)]
pub use balance::{BalanceStore, InsufficientFunds, Wallet};
#[doc(inline)]
pub use catalog::{
    merge_inventories, Catalog, CatalogEntry, CatalogError, CatalogSlot, Category, InventoryRow,
    ResourceStack,
};
#[doc(inline)]
pub use collection::{
    compute_completion, counts, discovered_phrases, discovered_resources, format_probability,
    group, sort_for_display, tier_progress, CollectedItem, Collection, ItemKey, PhraseKey,
    TierProgress,
};
#[doc(inline)]
pub use slots::{
    classify, draw, evaluate, GachaTerminal, SpinOutcome, SpinResult, SpinStats, TerminalError,
    TerminalRules, Weighted,
};
#[doc(inline)]
pub use wager::{
    CoinSide, CoinToss, FlipOutcome, ManualScheduler, PendingFlip, Scheduler, WagerError,
    WagerPhase, WagerState, FLIP_DELAY,
};

// Reference data (rarities, variants, reel symbols)
#[doc(inline)]
pub use reference::{
    excluded_symbol, odds_display, rarity_by_code, rarity_by_id, rarity_probability,
    symbol_by_code, variant_by_code, variant_by_id, RarityTier, SlotSymbol, Variant, VariantId,
    RARITY_TIERS, SLOT_SYMBOLS, VARIANTS,
};
