//! Epsilon-greedy arm selection.
//!
//! With probability `1 - epsilon` the arm with the best running mean is
//! chosen (earliest arm on ties); otherwise a uniformly random arm is chosen,
//! the current best included.
//!
//! Notes:
//! - This policy is **seedable** so selection can be reproducible in tests.
//! - [`EpsilonGreedy::new`] seeds from entropy; use [`EpsilonGreedy::with_seed`]
//!   or [`EpsilonGreedy::with_source`] for deterministic runs.

use tracing::trace;

use crate::alloc::first_argmax;
use crate::policy::check_arms;
use crate::rng::{SeededUniform, UniformSource};
use crate::{ArmStats, Bandit, Decision, DecisionPolicy, Error, Result, SelectionKind};

/// Seedable epsilon-greedy bandit.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<R = SeededUniform> {
    epsilon: f64,
    stats: ArmStats,
    rng: R,
}

impl EpsilonGreedy {
    /// Create an epsilon-greedy bandit seeded from entropy.
    ///
    /// Fails with [`Error::InvalidParameter`] unless `epsilon ∈ [0, 1]` and
    /// `arms > 0`.
    pub fn new(arms: usize, epsilon: f64) -> Result<Self> {
        Self::with_source(arms, epsilon, SeededUniform::from_entropy())
    }

    /// Create an epsilon-greedy bandit with a fixed seed (reproducible).
    pub fn with_seed(arms: usize, epsilon: f64, seed: u64) -> Result<Self> {
        Self::with_source(arms, epsilon, SeededUniform::new(seed))
    }
}

impl<R: UniformSource> EpsilonGreedy<R> {
    /// Create an epsilon-greedy bandit drawing from `rng`.
    pub fn with_source(arms: usize, epsilon: f64, rng: R) -> Result<Self> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                value: epsilon,
                reason: "not in [0, 1]",
            });
        }
        check_arms(arms)?;
        Ok(Self {
            epsilon,
            stats: ArmStats::new(arms),
            rng,
        })
    }

    /// Exploration probability.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl<R: UniformSource> Bandit for EpsilonGreedy<R> {
    fn decide(&mut self) -> Decision {
        let u = self.rng.next_uniform();
        let (idx, kind) = if u > self.epsilon {
            (first_argmax(&self.stats.values), SelectionKind::Exploit)
        } else {
            (self.rng.next_index(self.stats.arms()), SelectionKind::Explore)
        };
        self.stats.record_pull(idx);
        trace!(arm = idx + 1, ?kind, "epsilon-greedy selection");
        Decision {
            policy: DecisionPolicy::EpsilonGreedy,
            arm: idx + 1,
            kind,
            probs: None,
        }
    }

    fn update(&mut self, arm: usize, reward: f64) -> Result<()> {
        self.stats.observe(arm, reward)
    }

    fn reset(&mut self) {
        self.stats.clear();
        self.rng.reseed();
    }

    fn version(&self) -> String {
        format!("EpsilonGreedy(epsilon={:.2})", self.epsilon)
    }

    fn stats(&self) -> &ArmStats {
        &self.stats
    }
}
