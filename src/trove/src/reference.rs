//! Reference data for trove items and minigames
//!
//! Hardcoded catalogs for rarity tiers, cosmetic variants, and slot symbols.
//! Everything here is immutable and defined once; the minigames and the
//! collection aggregator only ever borrow from these tables.

mod rarity;
mod symbol;
mod variant;

pub use rarity::{rarity_by_code, rarity_by_id, rarity_probability, RarityTier, RARITY_TIERS};
pub use symbol::{excluded_symbol, symbol_by_code, SlotSymbol, SLOT_SYMBOLS};
pub use variant::{variant_by_code, variant_by_id, Variant, VariantId, VARIANTS};

use crate::collection::format_probability;

/// Display odds for a rarity tier combined with a cosmetic variant
/// (e.g. "1 in 5.0k" for a shiny Epic).
pub fn odds_display(rarity_id: u8, variant_id: VariantId) -> Option<String> {
    let rarity = rarity_by_id(rarity_id)?;
    let variant = variant_by_id(variant_id)?;
    Some(format_probability(
        rarity.denominator as f64,
        variant.multiplier,
    ))
}
