//! Command handlers for the trove CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod coin;
pub mod collection;
pub mod configure;
pub mod rarity;
pub mod slots;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded RNG when a seed is given, OS entropy otherwise
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            tracing::info!(seed, "using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}
