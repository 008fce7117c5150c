//! Decision envelope for policy outputs.
//!
//! Routing services often want one audit-friendly record of a selection that
//! can be logged or replayed. [`Bandit::decide`](crate::Bandit::decide)
//! returns a [`Decision`]; [`Bandit::select_arm`](crate::Bandit::select_arm)
//! is the same call with everything but the ordinal dropped.

/// Which policy produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecisionPolicy {
    EpsilonGreedy,
    Softmax,
}

/// How the chosen arm was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionKind {
    /// The first arm with the greatest running mean.
    Exploit,

    /// A uniformly random arm (epsilon-greedy exploration).
    Explore,

    /// Sampled from a probability distribution over arms.
    Sampled,

    /// The cumulative distribution fell short of the draw through rounding;
    /// the last arm was chosen.
    NumericalFallback,
}

/// A single policy decision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    /// The policy that produced this decision.
    pub policy: DecisionPolicy,
    /// 1-based ordinal of the chosen arm.
    pub arm: usize,
    /// Why this arm.
    pub kind: SelectionKind,
    /// Per-arm probabilities, in ordinal order, when the policy sampled from a
    /// distribution.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub probs: Option<Vec<f64>>,
}

impl Decision {
    /// Whether the choice was driven by randomness rather than the current best arm.
    pub fn is_exploratory(&self) -> bool {
        !matches!(self.kind, SelectionKind::Exploit)
    }
}
