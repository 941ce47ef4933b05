//! CLI argument definitions for trove
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod coin;
mod collection;
mod core;
mod slots;

pub use coin::CoinCommand;
pub use collection::CollectionCommand;
pub use core::{Cli, Commands, RarityCommand};
pub use slots::SlotsCommand;
