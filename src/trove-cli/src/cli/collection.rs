//! CLI definitions for the collection command

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum CollectionCommand {
    /// Group, sort and score a JSON list of collected items
    Summary {
        /// JSON array of collected items
        items: PathBuf,

        /// JSON array of resource stacks to merge into the inventory view
        #[arg(long)]
        stacks: Option<PathBuf>,

        /// Catalog manifest (uses the built-in catalog if not provided)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}
