//! Discovery sets and completion percentages.
//!
//! Phrase catalogs match on `(rarity, text)`; resource catalogs (ores, fish,
//! plants, dream items) match on the numeric entry id. The two key shapes
//! are built separately and never mixed.

use super::CollectedItem;
use crate::catalog::{Category, ResourceStack};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// Discovery key for phrase-style catalogs
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PhraseKey {
    pub rarity: u8,
    pub text: String,
}

impl PhraseKey {
    pub fn new(rarity: u8, text: impl Into<String>) -> Self {
        Self {
            rarity,
            text: text.into(),
        }
    }
}

/// `floor(discovered / catalog * 100)`, clamped to `[0, 100]`.
///
/// An empty catalog is 0% complete.
pub fn compute_completion<K: Eq + Hash>(discovered: &HashSet<K>, catalog: &[K]) -> u8 {
    if catalog.is_empty() {
        return 0;
    }
    let percent = discovered.len() * 100 / catalog.len();
    percent.min(100) as u8
}

/// Phrase keys for every collected item, regardless of variant
pub fn discovered_phrases<'a, I>(items: I) -> HashSet<PhraseKey>
where
    I: IntoIterator<Item = &'a CollectedItem>,
{
    items
        .into_iter()
        .map(|item| PhraseKey::new(item.rarity, item.text.clone()))
        .collect()
}

/// Ids of every resource in `category` the player holds at least one of
pub fn discovered_resources<'a, I>(stacks: I, category: Category) -> HashSet<u32>
where
    I: IntoIterator<Item = &'a ResourceStack>,
{
    stacks
        .into_iter()
        .filter(|s| s.category == category && s.count > 0)
        .map(|s| s.id)
        .collect()
}
