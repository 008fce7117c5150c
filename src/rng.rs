//! Random sources for the stochastic policies.
//!
//! Policies never reach for a global generator: each bandit owns one
//! [`UniformSource`], so tests can inject a fixed seed (or a scripted source)
//! and get reproducible selections.
//!
//! Nothing here is cryptographic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A narrow "next uniform" capability.
pub trait UniformSource: Send {
    /// A uniform draw in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// A uniform index in `[0, n)`.
    ///
    /// `n` must be positive; `0` is returned for `n == 0`.
    fn next_index(&mut self, n: usize) -> usize {
        let i = (self.next_uniform() * n as f64) as usize;
        i.min(n.saturating_sub(1))
    }

    /// Return the source to the state it had right after construction.
    fn reseed(&mut self);
}

/// `StdRng`-backed source that remembers its seed so it can be rewound.
#[derive(Debug, Clone)]
pub struct SeededUniform {
    seed: u64,
    rng: StdRng,
}

impl SeededUniform {
    /// Create a source with a fixed seed (reproducible).
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// The seed this source was built with (and rewinds to).
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl UniformSource for SeededUniform {
    fn next_uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.random_range(0..n)
    }

    fn reseed(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}

/// Derive the `n`-th seed of a family from a base seed.
///
/// Factories use this so bandits built from one configured seed are
/// reproducible without all sharing the same stream.
///
/// SplitMix64 finalizer over `base ^ n`.
#[must_use]
pub fn derive_seed(base: u64, n: u64) -> u64 {
    let mut z = (base ^ n).wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
