//! The `Bandit` trait shared by every arm-selection strategy.
//!
//! [`EpsilonGreedy`](crate::EpsilonGreedy) and [`Softmax`](crate::Softmax)
//! share one interface: pick an arm, fold in a reward, reset, describe
//! yourself. Trials hold strategies as `Box<dyn Bandit>`, so the choice of
//! policy lives entirely in the factory.
//!
//! Arms are addressed by **1-based ordinals** throughout, matching
//! [`Variant::ordinal`](crate::Variant::ordinal).
//!
//! # Example
//!
//! ```rust
//! use bandit::{Bandit, EpsilonGreedy, Softmax};
//!
//! fn run_policy(policy: &mut dyn Bandit) {
//!     for _ in 0..10 {
//!         let arm = policy.select_arm();
//!         // ... route traffic, observe an outcome ...
//!         policy.update(arm, 0.8).unwrap();
//!     }
//! }
//!
//! let mut eg = EpsilonGreedy::with_seed(3, 0.1, 0).unwrap();
//! let mut sm = Softmax::with_seed(3, 0.2, 0).unwrap();
//!
//! run_policy(&mut eg);
//! run_policy(&mut sm);
//! ```

use crate::{Decision, Error, Result};

/// Per-arm statistics.
///
/// `pulls` counts selections and `counts` counts observed rewards; each is
/// incremented in exactly one place, and `values` is the mean over `counts`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmStats {
    pub pulls: Vec<u64>,
    pub counts: Vec<u64>,
    pub values: Vec<f64>,
}

impl ArmStats {
    /// All-zero statistics for `arms` arms.
    pub fn new(arms: usize) -> Self {
        Self {
            pulls: vec![0; arms],
            counts: vec![0; arms],
            values: vec![0.0; arms],
        }
    }

    /// Number of arms.
    pub fn arms(&self) -> usize {
        self.values.len()
    }

    /// Total rewards observed across all arms.
    pub fn total_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Zero every counter and mean, keeping the arm count.
    pub fn clear(&mut self) {
        *self = Self::new(self.arms());
    }

    /// Running mean of arm `ordinal`, if it exists.
    pub fn value(&self, ordinal: usize) -> Option<f64> {
        ordinal
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .copied()
    }

    /// Record a selection of the 0-based arm `idx`.
    pub(crate) fn record_pull(&mut self, idx: usize) {
        if let Some(p) = self.pulls.get_mut(idx) {
            *p = p.saturating_add(1);
        }
    }

    /// Fold `reward` into arm `ordinal`'s running mean.
    ///
    /// `value ← value · (count − 1) / count + reward / count`, which stays
    /// finite for any finite rewards.
    pub(crate) fn observe(&mut self, ordinal: usize, reward: f64) -> Result<()> {
        let arms = self.arms();
        if ordinal == 0 || ordinal > arms {
            return Err(Error::UnknownOrdinal { ordinal, arms });
        }
        if !reward.is_finite() {
            return Err(Error::InvalidParameter {
                name: "reward",
                value: reward,
                reason: "must be finite",
            });
        }
        let i = ordinal - 1;
        self.counts[i] = self.counts[i].saturating_add(1);
        let n = self.counts[i] as f64;
        self.values[i] = self.values[i] * ((n - 1.0) / n) + reward / n;
        Ok(())
    }
}

/// Common interface for stateful arm-selection policies.
pub trait Bandit: Send {
    /// Choose an arm and report how it was chosen.
    ///
    /// Increments the chosen arm's pull counter.
    fn decide(&mut self) -> Decision;

    /// Fold an observed `reward` into arm `arm`'s running mean.
    ///
    /// Returns [`Error::UnknownOrdinal`] (leaving state untouched) when `arm`
    /// is outside `[1, arms]`.
    fn update(&mut self, arm: usize, reward: f64) -> Result<()>;

    /// Return to the just-constructed state: statistics zeroed, random source
    /// re-seeded. Parameters are untouched.
    fn reset(&mut self);

    /// Human-readable identity of the strategy and its parameters.
    fn version(&self) -> String;

    /// Current per-arm statistics.
    fn stats(&self) -> &ArmStats;

    /// Select an arm, returning its 1-based ordinal in `[1, arms]`.
    fn select_arm(&mut self) -> usize {
        self.decide().arm
    }

    /// Number of arms this bandit chooses between.
    fn arms(&self) -> usize {
        self.stats().arms()
    }
}

/// Reject an arm count no policy can select from.
pub(crate) fn check_arms(arms: usize) -> Result<()> {
    if arms == 0 {
        return Err(Error::InvalidParameter {
            name: "arms",
            value: 0.0,
            reason: "a bandit needs at least one arm",
        });
    }
    Ok(())
}
