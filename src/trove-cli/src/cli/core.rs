//! Core CLI definitions

use clap::{Parser, Subcommand};

use super::coin::CoinCommand;
use super::collection::CollectionCommand;
use super::slots::SlotsCommand;

#[derive(Parser)]
#[command(name = "trove")]
#[command(about = "Reward rules and collection tools for trove", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Balance each run starts from
        #[arg(long)]
        balance: Option<u64>,

        /// Default coin toss bet
        #[arg(long)]
        bet: Option<u64>,

        /// Fixed RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Cost of one gacha terminal spin credit
        #[arg(long)]
        spin_cost: Option<u64>,
    },

    /// Gacha terminal odds and simulation
    #[command(visible_alias = "s")]
    Slots {
        #[command(subcommand)]
        command: SlotsCommand,
    },

    /// Double-or-nothing coin toss
    Coin {
        #[command(subcommand)]
        command: CoinCommand,
    },

    /// Rarity tiers and variant odds
    #[command(visible_alias = "r")]
    Rarity {
        #[command(subcommand)]
        command: RarityCommand,
    },

    /// Inspect a collection export
    #[command(visible_alias = "col")]
    Collection {
        #[command(subcommand)]
        command: CollectionCommand,
    },
}

#[derive(Subcommand)]
pub enum RarityCommand {
    /// List every tier with its odds per variant
    List,
}
