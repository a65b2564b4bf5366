//! Deterministic random number generation.
//!
//! Dice rolls and the AI tie-breaker draw from a single `GameRng` owned by
//! the engine. The same seed produces the identical sequence, so a seeded
//! game replays exactly; `from_entropy` covers interactive play.
//!
//! Uses ChaCha8 for speed while maintaining cryptographic quality
//! randomness.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG for dice and tie-breaking.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a new RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Roll a single die: uniform in 1..=6.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    /// Uniform f32 in [0, 1).
    pub fn gen_f32(&mut self) -> f32 {
        self.inner.gen()
    }
}
