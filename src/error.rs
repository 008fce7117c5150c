//! Crate-wide error type.

use thiserror::Error;

/// Errors produced by bandit construction, experiment parsing and trial routing.
///
/// Every failure is recoverable: nothing in this crate aborts the process.
#[derive(Debug, Error)]
pub enum Error {
    /// A policy parameter (or a reward) is outside its domain.
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A record of the experiment definition could not be accepted.
    #[error("line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// An experiment's ordinals are not exactly `1..=n`.
    #[error("{experiment}: variant {ordinal} noncontiguous")]
    NonContiguousOrdinals { experiment: String, ordinal: i64 },

    /// An arm ordinal outside `[1, arms]`.
    #[error("ordinal {ordinal} not in [1,{arms}]")]
    UnknownOrdinal { ordinal: usize, arms: usize },

    /// No registered variant carries this tag.
    #[error("could not find variant '{0}'")]
    UnknownTag(String),

    /// No trial is registered under this experiment name.
    #[error("unknown experiment '{0}'")]
    UnknownExperiment(String),

    /// A bandit and an experiment disagree on the number of arms.
    #[error("experiment {experiment} has {variants} variants but the bandit has {bandit} arms")]
    ArmCountMismatch {
        experiment: String,
        bandit: usize,
        variants: usize,
    },

    /// The bandit factory rejected construction for an experiment.
    #[error("could not build bandit for experiment {experiment}: {source}")]
    FactoryFailure {
        experiment: String,
        #[source]
        source: Box<Error>,
    },

    /// A thread panicked while holding a trial's bandit lock.
    #[error("bandit lock poisoned")]
    LockPoisoned,

    /// Reading an experiment definition failed.
    #[error("could not read experiments: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
