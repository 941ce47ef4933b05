//! Collected items: identity, grouping, and summaries for inventory screens.
//!
//! Everything here is derived state. The owner of the item list calls in on
//! every render and keeps nothing between calls.

mod completion;
mod format;

pub use completion::{compute_completion, discovered_phrases, discovered_resources, PhraseKey};
pub use format::format_probability;

use crate::catalog::Catalog;
use crate::reference::VariantId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

fn default_count() -> u32 {
    1
}

/// One distinct kind of item the player has found at least once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedItem {
    pub text: String,
    #[serde(default)]
    pub description: String,
    /// Rarity tier id
    pub rarity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantId>,
    /// Times this exact item has been found
    #[serde(default = "default_count")]
    pub count: u32,
}

/// Identity of a collected item; duplicates share a key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub rarity: u8,
    pub variant: VariantId,
    pub text: String,
}

impl CollectedItem {
    pub fn new(text: impl Into<String>, rarity: u8) -> Self {
        Self {
            text: text.into(),
            description: String::new(),
            rarity,
            variant: None,
            count: 1,
        }
    }

    pub fn with_variant(mut self, variant: VariantId) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Variant, treating an absent one as [`VariantId::NONE`]
    pub fn variant_or_none(&self) -> VariantId {
        self.variant.unwrap_or(VariantId::NONE)
    }

    pub fn key(&self) -> ItemKey {
        ItemKey {
            rarity: self.rarity,
            variant: self.variant_or_none(),
            text: self.text.clone(),
        }
    }

    fn same_key(&self, other: &CollectedItem) -> bool {
        self.rarity == other.rarity
            && self.variant_or_none() == other.variant_or_none()
            && self.text == other.text
    }
}

/// A player's found items with duplicates folded into counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    items: Vec<CollectedItem>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a find. A duplicate bumps the existing entry's count by the
    /// found item's count (at least one); a new item is appended.
    ///
    /// Returns the entry's count after recording.
    pub fn record(&mut self, item: CollectedItem) -> u32 {
        let found = item.count.max(1);
        if let Some(existing) = self.items.iter_mut().find(|i| i.same_key(&item)) {
            existing.count = existing.count.saturating_add(found);
            return existing.count;
        }
        self.items.push(CollectedItem {
            count: found,
            ..item
        });
        found
    }

    pub fn get(&self, key: &ItemKey) -> Option<&CollectedItem> {
        self.items.iter().find(|i| {
            i.rarity == key.rarity && i.variant_or_none() == key.variant && i.text == key.text
        })
    }

    pub fn items(&self) -> &[CollectedItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CollectedItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total finds including duplicates
    pub fn total_found(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.count)).sum()
    }
}

impl FromIterator<CollectedItem> for Collection {
    fn from_iter<T: IntoIterator<Item = CollectedItem>>(iter: T) -> Self {
        let mut collection = Collection::new();
        for item in iter {
            collection.record(item);
        }
        collection
    }
}

/// Display order: rarer first, then more-owned first. Stable, so equal
/// items keep their incoming order.
pub fn sort_for_display(items: &mut [&CollectedItem]) {
    items.sort_by(|a, b| b.rarity.cmp(&a.rarity).then(b.count.cmp(&a.count)));
}

/// Group items by variant, each group in display order
pub fn group(items: &[CollectedItem]) -> BTreeMap<VariantId, Vec<&CollectedItem>> {
    let mut groups: BTreeMap<VariantId, Vec<&CollectedItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.variant_or_none()).or_default().push(item);
    }
    for members in groups.values_mut() {
        sort_for_display(members);
    }
    groups
}

/// Distinct entries per variant (not summed quantities)
pub fn counts(items: &[CollectedItem]) -> BTreeMap<VariantId, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.variant_or_none()).or_default() += 1;
    }
    counts
}

/// Discovery progress within one rarity tier of the phrase catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierProgress {
    pub rarity: u8,
    pub discovered: usize,
    pub total: usize,
    pub percent: u8,
}

/// Per-tier phrase discovery, rarest tier first. Tiers with no catalog
/// entries are skipped.
pub fn tier_progress(items: &[CollectedItem], catalog: &Catalog) -> Vec<TierProgress> {
    let discovered = discovered_phrases(items);
    let all_keys = catalog.phrase_keys();

    let mut by_tier: BTreeMap<u8, Vec<PhraseKey>> = BTreeMap::new();
    for key in all_keys {
        by_tier.entry(key.rarity).or_default().push(key);
    }

    by_tier
        .into_iter()
        .rev()
        .map(|(rarity, keys)| {
            let found: HashSet<PhraseKey> = keys
                .iter()
                .filter(|k| discovered.contains(*k))
                .cloned()
                .collect();
            TierProgress {
                rarity,
                discovered: found.len(),
                total: keys.len(),
                percent: compute_completion(&found, &keys),
            }
        })
        .collect()
}
