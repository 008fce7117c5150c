//! Policy configuration and ready-made bandit factories.
//!
//! A [`BanditFactory`](crate::BanditFactory) is the seam through which a
//! caller picks the strategy for every experiment in a
//! [`Trials`](crate::Trials) registry. The configs here build one.
//!
//! Seeding: `seed: None` draws a fresh seed per bandit. `Some(s)` makes the
//! `n`-th bandit a factory builds use [`derive_seed(s, n)`](crate::derive_seed),
//! so a registry built twice from the same definition routes identically.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::rng::derive_seed;
use crate::{Bandit, EpsilonGreedy, Result, Softmax};

/// Configuration for [`EpsilonGreedy`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EpsilonGreedyConfig {
    /// Exploration probability in `[0, 1]`.
    pub epsilon: f64,
    /// Base seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EpsilonGreedyConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            seed: None,
        }
    }
}

impl EpsilonGreedyConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build one bandit over `arms` arms: the same bandit `factory()` builds
    /// first.
    pub fn build(&self, arms: usize) -> Result<EpsilonGreedy> {
        match self.seed {
            Some(seed) => EpsilonGreedy::with_seed(arms, self.epsilon, derive_seed(seed, 0)),
            None => EpsilonGreedy::new(arms, self.epsilon),
        }
    }

    /// A factory building one epsilon-greedy bandit per experiment.
    pub fn factory(self) -> impl Fn(usize) -> Result<Box<dyn Bandit>> {
        BanditConfig::EpsilonGreedy(self).factory()
    }
}

/// Configuration for [`Softmax`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SoftmaxConfig {
    /// Temperature `τ >= 0`.
    pub temperature: f64,
    /// Base seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SoftmaxConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            seed: None,
        }
    }
}

impl SoftmaxConfig {
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build one bandit over `arms` arms: the same bandit `factory()` builds
    /// first.
    pub fn build(&self, arms: usize) -> Result<Softmax> {
        match self.seed {
            Some(seed) => Softmax::with_seed(arms, self.temperature, derive_seed(seed, 0)),
            None => Softmax::new(arms, self.temperature),
        }
    }

    /// A factory building one softmax bandit per experiment.
    pub fn factory(self) -> impl Fn(usize) -> Result<Box<dyn Bandit>> {
        BanditConfig::Softmax(self).factory()
    }
}

/// Strategy choice, e.g. loaded from a service's config file.
///
/// With `serde`:
///
/// ```json
/// { "strategy": "softmax", "temperature": 0.2, "seed": 7 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "strategy", rename_all = "snake_case")
)]
pub enum BanditConfig {
    EpsilonGreedy(EpsilonGreedyConfig),
    Softmax(SoftmaxConfig),
}

impl Default for BanditConfig {
    fn default() -> Self {
        Self::EpsilonGreedy(EpsilonGreedyConfig::default())
    }
}

impl BanditConfig {
    fn seed(&self) -> Option<u64> {
        match self {
            Self::EpsilonGreedy(c) => c.seed,
            Self::Softmax(c) => c.seed,
        }
    }

    /// Build one boxed bandit over `arms` arms, seeded with `seed` if given.
    pub fn build(&self, arms: usize, seed: Option<u64>) -> Result<Box<dyn Bandit>> {
        Ok(match (*self, seed) {
            (Self::EpsilonGreedy(c), Some(s)) => {
                Box::new(EpsilonGreedy::with_seed(arms, c.epsilon, s)?)
            }
            (Self::EpsilonGreedy(c), None) => Box::new(EpsilonGreedy::new(arms, c.epsilon)?),
            (Self::Softmax(c), Some(s)) => Box::new(Softmax::with_seed(arms, c.temperature, s)?),
            (Self::Softmax(c), None) => Box::new(Softmax::new(arms, c.temperature)?),
        })
    }

    /// A factory building one bandit per call, deriving per-bandit seeds from
    /// the configured seed.
    pub fn factory(self) -> impl Fn(usize) -> Result<Box<dyn Bandit>> {
        let built = AtomicU64::new(0);
        move |arms| {
            let n = built.fetch_add(1, Ordering::Relaxed);
            self.build(arms, self.seed().map(|s| derive_seed(s, n)))
        }
    }
}
