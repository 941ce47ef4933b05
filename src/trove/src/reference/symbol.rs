//! Slot machine symbol definitions

use serde::Serialize;

/// A symbol on the gacha terminal's reels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSymbol {
    pub code: &'static str,
    pub glyph: &'static str,
    pub name: &'static str,
    /// Relative draw weight; only the ratio to the table total matters
    pub weight: u32,
    /// Applied to the base jackpot on a triple match
    pub multiplier: u64,
    /// Presence of an excluded symbol blocks the consolation payout
    pub excluded: bool,
}

/// All reel symbols. Weights sum to 100 by convention only.
pub const SLOT_SYMBOLS: &[SlotSymbol] = &[
    SlotSymbol {
        code: "CHERRY",
        glyph: "🍒",
        name: "Cherry",
        weight: 30,
        multiplier: 2,
        excluded: false,
    },
    SlotSymbol {
        code: "LEMON",
        glyph: "🍋",
        name: "Lemon",
        weight: 22,
        multiplier: 3,
        excluded: false,
    },
    SlotSymbol {
        code: "BELL",
        glyph: "🔔",
        name: "Bell",
        weight: 18,
        multiplier: 5,
        excluded: false,
    },
    SlotSymbol {
        code: "BAR",
        glyph: "🟫",
        name: "Bar",
        weight: 12,
        multiplier: 10,
        excluded: false,
    },
    SlotSymbol {
        code: "SEVEN",
        glyph: "7️⃣",
        name: "Seven",
        weight: 5,
        multiplier: 25,
        excluded: false,
    },
    SlotSymbol {
        code: "DIAMOND",
        glyph: "💎",
        name: "Diamond",
        weight: 3,
        multiplier: 100,
        excluded: false,
    },
    SlotSymbol {
        code: "SKULL",
        glyph: "💀",
        name: "Skull",
        weight: 10,
        multiplier: 0,
        excluded: true,
    },
];

/// Get symbol by code (case-insensitive)
pub fn symbol_by_code(code: &str) -> Option<&'static SlotSymbol> {
    SLOT_SYMBOLS
        .iter()
        .find(|s| s.code.eq_ignore_ascii_case(code))
}

/// The symbol that blocks consolation payouts
pub fn excluded_symbol() -> Option<&'static SlotSymbol> {
    SLOT_SYMBOLS.iter().find(|s| s.excluded)
}
