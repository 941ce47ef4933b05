//! Cosmetic variant definitions

use serde::{Deserialize, Serialize};

/// Identifier of a cosmetic variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub u8);

impl VariantId {
    pub const NONE: VariantId = VariantId(0);
    pub const SHINY: VariantId = VariantId(1);
    pub const FOIL: VariantId = VariantId(2);
    pub const GOLDEN: VariantId = VariantId(3);
}

impl Default for VariantId {
    fn default() -> Self {
        Self::NONE
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match variant_by_id(*self) {
            Some(v) => write!(f, "{}", v.code),
            None => write!(f, "VARIANT_{}", self.0),
        }
    }
}

/// Variant information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    pub id: VariantId,
    pub code: &'static str,
    pub name: &'static str,
    /// Applied on top of the rarity denominator
    pub multiplier: f64,
    pub color: &'static str,
}

/// All variants
pub const VARIANTS: &[Variant] = &[
    Variant {
        id: VariantId::NONE,
        code: "NONE",
        name: "Standard",
        multiplier: 1.0,
        color: "inherit",
    },
    Variant {
        id: VariantId::SHINY,
        code: "SHINY",
        name: "Shiny",
        multiplier: 5.0,
        color: "#FFF6A0",
    },
    Variant {
        id: VariantId::FOIL,
        code: "FOIL",
        name: "Foil",
        multiplier: 25.0,
        color: "#C0F0FF",
    },
    Variant {
        id: VariantId::GOLDEN,
        code: "GOLDEN",
        name: "Golden",
        multiplier: 100.0,
        color: "#FFD700",
    },
];

/// Get variant by id
pub fn variant_by_id(id: VariantId) -> Option<&'static Variant> {
    VARIANTS.iter().find(|v| v.id == id)
}

/// Get variant by code (case-insensitive)
pub fn variant_by_code(code: &str) -> Option<&'static Variant> {
    VARIANTS.iter().find(|v| v.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_lookup() {
        assert_eq!(variant_by_id(VariantId::NONE).map(|v| v.multiplier), Some(1.0));
        assert_eq!(variant_by_code("golden").map(|v| v.id), Some(VariantId::GOLDEN));
        assert!(variant_by_id(VariantId(9)).is_none());
    }

    #[test]
    fn test_variant_display() {
        assert_eq!(VariantId::FOIL.to_string(), "FOIL");
        assert_eq!(VariantId(42).to_string(), "VARIANT_42");
        assert_eq!(VariantId::default(), VariantId::NONE);
    }
}
