//! CLI definitions for the coin command

use clap::Subcommand;

#[derive(Subcommand)]
pub enum CoinCommand {
    /// Play one streak: call a side until busting or reaching the target
    Play {
        /// Side to call on every flip (heads/tails)
        #[arg(long, default_value = "heads")]
        side: String,

        /// Cash out after this many wins
        #[arg(short, long, default_value_t = 3)]
        flips: u32,

        /// Bet (uses configured default if not provided)
        #[arg(short, long)]
        bet: Option<u64>,

        /// RNG seed (uses configured seed if not provided)
        #[arg(long, env = "TROVE_SEED")]
        seed: Option<u64>,
    },

    /// Play many streaks with a fixed cash-out target
    Simulate {
        /// Number of streaks
        #[arg(short = 'n', long, default_value_t = 10_000)]
        rounds: u32,

        /// Cash out after this many wins
        #[arg(short, long, default_value_t = 1)]
        target: u32,

        /// Bet (uses configured default if not provided)
        #[arg(short, long)]
        bet: Option<u64>,

        /// RNG seed (uses configured seed if not provided)
        #[arg(long, env = "TROVE_SEED")]
        seed: Option<u64>,
    },
}
