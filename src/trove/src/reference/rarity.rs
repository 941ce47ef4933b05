//! Rarity tier definitions

use serde::Serialize;

/// Rarity tier information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RarityTier {
    /// Ordering key; higher id = rarer
    pub id: u8,
    pub code: &'static str,
    pub name: &'static str,
    /// Items of this tier are found with chance `1 / denominator`
    pub denominator: u64,
    pub color: &'static str,
    pub glow: &'static str,
    /// Whether the badge pulses when rendered
    pub pulse: bool,
}

/// All rarity tiers in order
pub const RARITY_TIERS: &[RarityTier] = &[
    RarityTier {
        id: 1,
        code: "COMMON",
        name: "Common",
        denominator: 2,
        color: "#B0B0B0",
        glow: "none",
        pulse: false,
    },
    RarityTier {
        id: 2,
        code: "UNCOMMON",
        name: "Uncommon",
        denominator: 10,
        color: "#4CD964",
        glow: "none",
        pulse: false,
    },
    RarityTier {
        id: 3,
        code: "RARE",
        name: "Rare",
        denominator: 50,
        color: "#3A8DFF",
        glow: "0 0 6px #3A8DFF",
        pulse: false,
    },
    RarityTier {
        id: 4,
        code: "EPIC",
        name: "Epic",
        denominator: 250,
        color: "#A64DFF",
        glow: "0 0 8px #A64DFF",
        pulse: false,
    },
    RarityTier {
        id: 5,
        code: "LEGENDARY",
        name: "Legendary",
        denominator: 1_000,
        color: "#FFA500",
        glow: "0 0 10px #FFA500",
        pulse: true,
    },
    RarityTier {
        id: 6,
        code: "MYTHIC",
        name: "Mythic",
        denominator: 10_000,
        color: "#FF3B30",
        glow: "0 0 12px #FF3B30",
        pulse: true,
    },
    RarityTier {
        id: 7,
        code: "ASCENDED",
        name: "Ascended",
        denominator: 250_000,
        color: "#FFFFFF",
        glow: "0 0 14px #FFF6A0",
        pulse: true,
    },
    RarityTier {
        id: 8,
        code: "CELESTIAL",
        name: "Celestial",
        denominator: 5_000_000,
        color: "#7FFFD4",
        glow: "0 0 16px #7FFFD4",
        pulse: true,
    },
    RarityTier {
        id: 9,
        code: "COSMIC",
        name: "Cosmic",
        denominator: 750_000_000,
        color: "#FF00FF",
        glow: "0 0 18px #FF00FF",
        pulse: true,
    },
    RarityTier {
        id: 10,
        code: "THE_ONE",
        name: "The One",
        denominator: 1_000_000_000_000,
        color: "#000000",
        glow: "0 0 24px #FFFFFF",
        pulse: true,
    },
];

/// Get rarity tier by id
pub fn rarity_by_id(id: u8) -> Option<&'static RarityTier> {
    RARITY_TIERS.iter().find(|r| r.id == id)
}

/// Get rarity tier by code (case-insensitive)
pub fn rarity_by_code(code: &str) -> Option<&'static RarityTier> {
    RARITY_TIERS
        .iter()
        .find(|r| r.code.eq_ignore_ascii_case(code))
}

/// Get the chance of finding an item of this tier (1 / denominator)
pub fn rarity_probability(id: u8) -> Option<f64> {
    rarity_by_id(id).map(|r| 1.0 / r.denominator as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_lookup() {
        assert_eq!(rarity_by_id(1).map(|r| r.name), Some("Common"));
        assert_eq!(rarity_by_id(10).map(|r| r.name), Some("The One"));
        assert_eq!(rarity_by_code("rare").map(|r| r.id), Some(3));
        assert!(rarity_by_id(0).is_none());
    }

    #[test]
    fn test_tiers_ordered_by_rarity() {
        for pair in RARITY_TIERS.windows(2) {
            assert!(pair[0].id < pair[1].id);
            assert!(pair[0].denominator < pair[1].denominator);
        }
    }

    #[test]
    fn test_rarity_probability() {
        assert_eq!(rarity_probability(1), Some(0.5));
        let legendary = rarity_probability(5).unwrap();
        assert!((legendary - 0.001).abs() < f64::EPSILON);
        assert_eq!(rarity_probability(11), None);
    }
}
