//! Seeded random streams.
//!
//! Every stochastic call in the engine receives an explicit generator. Each
//! population owns its own stream, derived from the master seed and the
//! population index, so a run is reproducible no matter how rayon schedules
//! the populations.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// The generator type threaded through the engine.
pub type GaRng = StdRng;

/// Creates a generator from a seed.
pub fn create_rng(seed: u64) -> GaRng {
    StdRng::seed_from_u64(seed)
}

/// Derives the seed of stream `index` from a master seed.
///
/// Uses the SplitMix64 finalizer so that adjacent indices give unrelated
/// streams.
pub fn stream_seed(master: u64, index: usize) -> u64 {
    let mut z = master.wrapping_add((index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Creates the generator for stream `index`.
pub fn stream_rng(master: u64, index: usize) -> GaRng {
    create_rng(stream_seed(master, index))
}
