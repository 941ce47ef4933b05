//! Master catalogs of every findable item.
//!
//! Phrases, ores, fish, plants and dream items all share one entry shape
//! tagged by [`Category`]. Catalogs are read-only during play; they exist to
//! size completion math and to render undiscovered placeholders.

use crate::collection::{CollectedItem, PhraseKey};
use crate::reference::VariantId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate {category} entry with id {id}")]
    DuplicateEntry { category: Category, id: u32 },

    #[error("Duplicate phrase in tier {rarity}: {text}")]
    DuplicatePhrase { rarity: u8, text: String },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Phrase,
    Ore,
    Fish,
    Plant,
    Dream,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Phrase,
        Category::Ore,
        Category::Fish,
        Category::Plant,
        Category::Dream,
    ];

    /// Whether entries are matched by numeric id rather than `(tier, name)`
    pub fn is_resource(self) -> bool {
        self != Category::Phrase
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Phrase => write!(f, "phrase"),
            Category::Ore => write!(f, "ore"),
            Category::Fish => write!(f, "fish"),
            Category::Plant => write!(f, "plant"),
            Category::Dream => write!(f, "dream"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = CatalogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "phrase" | "phrases" => Ok(Category::Phrase),
            "ore" | "ores" => Ok(Category::Ore),
            "fish" => Ok(Category::Fish),
            "plant" | "plants" => Ok(Category::Plant),
            "dream" | "dreams" => Ok(Category::Dream),
            _ => Err(CatalogError::UnknownCategory(s.to_string())),
        }
    }
}

/// One possible item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub category: Category,
    pub id: u32,
    /// Display text (the phrase itself for phrase entries)
    pub name: String,
    /// Rarity tier id
    pub tier: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow: Option<String>,
}

impl CatalogEntry {
    pub fn phrase(id: u32, text: impl Into<String>, rarity: u8) -> Self {
        Self {
            category: Category::Phrase,
            id,
            name: text.into(),
            tier: rarity,
            glow: None,
        }
    }

    pub fn resource(category: Category, id: u32, name: impl Into<String>, tier: u8) -> Self {
        Self {
            category,
            id,
            name: name.into(),
            tier,
            glow: None,
        }
    }

    pub fn with_glow(mut self, glow: impl Into<String>) -> Self {
        self.glow = Some(glow.into());
        self
    }

    pub fn phrase_key(&self) -> PhraseKey {
        PhraseKey::new(self.tier, self.name.clone())
    }
}

/// On-disk catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogManifest {
    pub version: u32,
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids within a category and
    /// duplicate phrases within a tier
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut phrases = HashSet::new();
        for entry in &entries {
            if !ids.insert((entry.category, entry.id)) {
                return Err(CatalogError::DuplicateEntry {
                    category: entry.category,
                    id: entry.id,
                });
            }
            if entry.category == Category::Phrase && !phrases.insert(entry.phrase_key()) {
                return Err(CatalogError::DuplicatePhrase {
                    rarity: entry.tier,
                    text: entry.name.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let manifest: CatalogManifest = serde_json::from_str(json)?;
        Self::from_entries(manifest.entries)
    }

    /// Load a catalog manifest file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Catalog compiled into the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        const JSON: &str = include_str!("../data/catalog.json");
        Self::from_json(JSON)
    }

    pub fn all(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self, category: Category) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn get(&self, category: Category, id: u32) -> Option<&CatalogEntry> {
        self.entries(category).find(|e| e.id == id)
    }

    /// Discovery keys of every phrase entry
    pub fn phrase_keys(&self) -> Vec<PhraseKey> {
        self.entries(Category::Phrase)
            .map(CatalogEntry::phrase_key)
            .collect()
    }

    /// Numeric ids of every entry in a resource category
    pub fn resource_ids(&self, category: Category) -> Vec<u32> {
        self.entries(category).map(|e| e.id).collect()
    }

    /// Phrase entries as display slots, rarest tier first
    pub fn phrase_slots(&self, discovered: &HashSet<PhraseKey>) -> Vec<CatalogSlot<'_>> {
        let mut slots: Vec<CatalogSlot<'_>> = self
            .entries(Category::Phrase)
            .map(|entry| CatalogSlot {
                discovered: discovered.contains(&entry.phrase_key()),
                entry,
            })
            .collect();
        slots.sort_by(|a, b| b.entry.tier.cmp(&a.entry.tier));
        slots
    }

    /// Resource entries as display slots, in catalog order
    pub fn resource_slots(
        &self,
        category: Category,
        discovered: &HashSet<u32>,
    ) -> Vec<CatalogSlot<'_>> {
        self.entries(category)
            .map(|entry| CatalogSlot {
                discovered: discovered.contains(&entry.id),
                entry,
            })
            .collect()
    }
}

/// A catalog entry as shown on a collection screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSlot<'a> {
    entry: &'a CatalogEntry,
    pub discovered: bool,
}

impl<'a> CatalogSlot<'a> {
    pub const PLACEHOLDER: &'static str = "???";

    /// Name, or a placeholder for undiscovered entries
    pub fn label(&self) -> &'a str {
        if self.discovered {
            self.entry.name.as_str()
        } else {
            Self::PLACEHOLDER
        }
    }

    pub fn tier(&self) -> u8 {
        self.entry.tier
    }

    /// Full entry for the detail view. Undiscovered entries cannot be
    /// inspected.
    pub fn inspect(&self) -> Option<&'a CatalogEntry> {
        if self.discovered {
            Some(self.entry)
        } else {
            tracing::trace!(
                category = %self.entry.category,
                id = self.entry.id,
                "inspect of undiscovered entry ignored"
            );
            None
        }
    }
}

/// Quantity of one resource held by the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStack {
    pub category: Category,
    pub id: u32,
    pub count: u32,
}

impl ResourceStack {
    pub fn new(category: Category, id: u32, count: u32) -> Self {
        Self {
            category,
            id,
            count,
        }
    }
}

/// One line of the merged inventory view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    pub category: Category,
    pub name: String,
    pub tier: u8,
    pub variant: VariantId,
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glow: Option<String>,
}

/// Merge collected phrases and resource stacks into one list, rarest tier
/// first and then most-owned first. Empty stacks and stacks whose id is not
/// in the catalog are left out.
pub fn merge_inventories(
    items: &[CollectedItem],
    stacks: &[ResourceStack],
    catalog: &Catalog,
) -> Vec<InventoryRow> {
    let phrases = items.iter().map(|item| InventoryRow {
        category: Category::Phrase,
        name: item.text.clone(),
        tier: item.rarity,
        variant: item.variant_or_none(),
        count: item.count,
        glow: None,
    });

    let resources = stacks.iter().filter(|s| s.count > 0).filter_map(|stack| {
        let Some(entry) = catalog.get(stack.category, stack.id) else {
            tracing::debug!(category = %stack.category, id = stack.id, "stack not in catalog");
            return None;
        };
        Some(InventoryRow {
            category: stack.category,
            name: entry.name.clone(),
            tier: entry.tier,
            variant: VariantId::NONE,
            count: stack.count,
            glow: entry.glow.clone(),
        })
    });

    let mut rows: Vec<InventoryRow> = phrases.chain(resources).collect();
    rows.sort_by(|a, b| b.tier.cmp(&a.tier).then(b.count.cmp(&a.count)));
    rows
}
