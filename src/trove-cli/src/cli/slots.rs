//! CLI definitions for the slots command

use clap::Subcommand;

#[derive(Subcommand)]
pub enum SlotsCommand {
    /// Show the symbol table with draw probabilities and payouts
    Odds,

    /// Spin many times and report hit rates and return-to-player
    Simulate {
        /// Number of spins
        #[arg(short = 'n', long, default_value_t = 10_000)]
        spins: u32,

        /// RNG seed (uses configured seed if not provided)
        #[arg(long, env = "TROVE_SEED")]
        seed: Option<u64>,
    },
}
