//! Subcommand implementations.
//!
//! Each command renders its result to a `String`; `main` owns stdout.

pub mod generate;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Seeded generator when `seed` is given, OS entropy otherwise.
pub fn rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}
