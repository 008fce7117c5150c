//! Softmax (Boltzmann) arm selection.
//!
//! Each arm is chosen with probability `exp(v_i / τ) / Σ_j exp(v_j / τ)`,
//! where `v_i` is its running mean and `τ` the temperature. Low temperatures
//! approach greedy selection, high temperatures approach uniform selection.
//!
//! Sampling is inverse-CDF: one uniform draw `u ∈ [0, 1)`, probabilities
//! accumulated in ordinal order, and the first arm whose cumulative sum
//! exceeds `u` wins. The last arm is only a rounding fallback.
//!
//! `τ = 0` is treated as its limit: the first arm with the greatest mean is
//! chosen without consuming randomness.

use tracing::trace;

use crate::alloc::{first_argmax, softmax};
use crate::policy::check_arms;
use crate::rng::{SeededUniform, UniformSource};
use crate::{ArmStats, Bandit, Decision, DecisionPolicy, Error, Result, SelectionKind};

/// Seedable softmax bandit.
#[derive(Debug, Clone)]
pub struct Softmax<R = SeededUniform> {
    tau: f64,
    stats: ArmStats,
    rng: R,
}

impl Softmax {
    /// Create a softmax bandit seeded from entropy.
    ///
    /// Fails with [`Error::InvalidParameter`] unless `temperature >= 0` and
    /// `arms > 0`.
    pub fn new(arms: usize, temperature: f64) -> Result<Self> {
        Self::with_source(arms, temperature, SeededUniform::from_entropy())
    }

    /// Create a softmax bandit with a fixed seed (reproducible).
    pub fn with_seed(arms: usize, temperature: f64, seed: u64) -> Result<Self> {
        Self::with_source(arms, temperature, SeededUniform::new(seed))
    }
}

impl<R: UniformSource> Softmax<R> {
    /// Create a softmax bandit drawing from `rng`.
    pub fn with_source(arms: usize, temperature: f64, rng: R) -> Result<Self> {
        if !(temperature >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "tau",
                value: temperature,
                reason: "not in [0, ∞]",
            });
        }
        check_arms(arms)?;
        Ok(Self {
            tau: temperature,
            stats: ArmStats::new(arms),
            rng,
        })
    }

    /// The temperature `τ`.
    pub fn temperature(&self) -> f64 {
        self.tau
    }

    /// Current selection probabilities, in ordinal order.
    ///
    /// At `τ = 0` this is a point mass on the first best arm.
    pub fn probabilities(&self) -> Vec<f64> {
        if self.tau == 0.0 {
            let mut p = vec![0.0; self.stats.arms()];
            p[first_argmax(&self.stats.values)] = 1.0;
            return p;
        }
        softmax(&self.stats.values, self.tau)
    }
}

impl<R: UniformSource> Bandit for Softmax<R> {
    fn decide(&mut self) -> Decision {
        let probs = self.probabilities();
        let (idx, kind) = if self.tau == 0.0 {
            (first_argmax(&self.stats.values), SelectionKind::Exploit)
        } else {
            let u = self.rng.next_uniform();
            let mut cdf = 0.0;
            let mut chosen = None;
            for (i, p) in probs.iter().enumerate() {
                cdf += p;
                if cdf > u {
                    chosen = Some(i);
                    break;
                }
            }
            match chosen {
                Some(i) => (i, SelectionKind::Sampled),
                // Numerical fallback.
                None => (probs.len() - 1, SelectionKind::NumericalFallback),
            }
        };
        self.stats.record_pull(idx);
        trace!(arm = idx + 1, ?kind, "softmax selection");
        Decision {
            policy: DecisionPolicy::Softmax,
            arm: idx + 1,
            kind,
            probs: Some(probs),
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
        format!("Softmax(tau={:.2})", self.tau)
    }

    fn stats(&self) -> &ArmStats {
        &self.stats
    }
}
