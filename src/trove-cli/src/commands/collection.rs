//! Collection summary command handlers

use crate::cli::CollectionCommand;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use trove::{
    compute_completion, counts, discovered_phrases, discovered_resources, group, merge_inventories,
    rarity_by_id, tier_progress, variant_by_id, Catalog, Category, CollectedItem, Collection,
    ResourceStack,
};

/// Handle the collection command
pub fn handle(command: CollectionCommand) -> Result<()> {
    match command {
        CollectionCommand::Summary {
            items,
            stacks,
            catalog,
        } => summary(&items, stacks.as_deref(), catalog.as_deref()),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Catalog::builtin().context("Built-in catalog is invalid"),
    }
}

/// Read an item export, folding duplicate entries into counts
fn load_items(path: &Path) -> Result<Vec<CollectedItem>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read items from {}", path.display()))?;
    let raw: Vec<CollectedItem> =
        serde_json::from_str(&contents).context("Failed to parse items JSON")?;
    let folded: Collection = raw.into_iter().collect();
    Ok(folded.into_items())
}

fn load_stacks(path: &Path) -> Result<Vec<ResourceStack>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read stacks from {}", path.display()))?;
    serde_json::from_str(&contents).context("Failed to parse stacks JSON")
}

fn tier_name(rarity: u8) -> String {
    rarity_by_id(rarity)
        .map(|t| t.name.to_string())
        .unwrap_or_else(|| format!("Tier {}", rarity))
}

/// Phrase completion against `catalog`, ignoring phrases it doesn't list
fn phrase_completion(items: &[CollectedItem], catalog: &Catalog) -> u8 {
    let keys = catalog.phrase_keys();
    let discovered: HashSet<_> = discovered_phrases(items)
        .into_iter()
        .filter(|k| keys.contains(k))
        .collect();
    compute_completion(&discovered, &keys)
}

fn resource_completion(stacks: &[ResourceStack], category: Category, catalog: &Catalog) -> u8 {
    let ids = catalog.resource_ids(category);
    let discovered: HashSet<u32> = discovered_resources(stacks, category)
        .into_iter()
        .filter(|id| ids.contains(id))
        .collect();
    compute_completion(&discovered, &ids)
}

fn summary(items_path: &Path, stacks_path: Option<&Path>, catalog_path: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let items = load_items(items_path)?;

    let tallies = counts(&items);
    for (variant, members) in group(&items) {
        let name = variant_by_id(variant).map(|v| v.name).unwrap_or("Unknown");
        println!(
            "{} ({})",
            name,
            tallies.get(&variant).copied().unwrap_or(members.len())
        );
        for item in members {
            println!(
                "  {:<12} x{:<4} {}",
                tier_name(item.rarity),
                item.count,
                item.text
            );
        }
        println!();
    }

    println!(
        "Phrases: {}% complete ({} catalogued)",
        phrase_completion(&items, &catalog),
        catalog.phrase_keys().len()
    );
    for tier in tier_progress(&items, &catalog) {
        println!(
            "  {:<12} {:>3}/{:<3} {:>3}%",
            tier_name(tier.rarity),
            tier.discovered,
            tier.total,
            tier.percent
        );
    }

    if let Some(path) = stacks_path {
        let stacks = load_stacks(path)?;
        println!();
        for category in Category::ALL.into_iter().filter(|c| c.is_resource()) {
            println!(
                "{:<8} {:>3}%",
                category.to_string(),
                resource_completion(&stacks, category, &catalog)
            );
        }

        println!();
        println!("{:<8} {:<28} {:<12} {:>6}", "Kind", "Name", "Tier", "Count");
        println!("{}", "-".repeat(57));
        for row in merge_inventories(&items, &stacks, &catalog) {
            println!(
                "{:<8} {:<28} {:<12} {:>6}",
                row.category.to_string(),
                row.name,
                tier_name(row.tier),
                row.count
            );
        }
    }

    Ok(())
}
