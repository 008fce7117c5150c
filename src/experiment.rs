//! Experiments and their variants.
//!
//! A [`Variant`] is the externally meaningful face of a bandit arm: a URL to
//! route to and a tag callers can use to pin it directly. An [`Experiment`]
//! holds its variants in ordinal order, with ordinals exactly `1..=n`; the
//! parser is the only producer and enforces that.

use std::collections::BTreeMap;

use crate::{Error, Result};

/// One arm of an experiment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variant {
    /// 1-based arm ordinal.
    pub ordinal: usize,
    /// Where traffic for this variant goes. Opaque to this crate.
    pub url: String,
    /// Stable identifier, `"<experiment>:<suffix>"`.
    pub tag: String,
}

/// A named, ordinal-ordered set of variants.
///
/// Only serializable: deserializing would bypass the parser's validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Experiment {
    pub(crate) name: String,
    pub(crate) variants: Vec<Variant>,
}

/// Experiments indexed by name.
pub type Experiments = BTreeMap<String, Experiment>;

impl Experiment {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variants in ascending ordinal order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Number of arms a bandit for this experiment must have.
    pub fn arms(&self) -> usize {
        self.variants.len()
    }

    /// The variant with 1-based `ordinal`.
    pub fn variant(&self, ordinal: usize) -> Result<&Variant> {
        let arms = self.arms();
        ordinal
            .checked_sub(1)
            .and_then(|i| self.variants.get(i))
            .ok_or(Error::UnknownOrdinal { ordinal, arms })
    }

    /// The variant carrying `tag`.
    pub fn tagged_variant(&self, tag: &str) -> Result<&Variant> {
        self.variants
            .iter()
            .find(|v| v.tag == tag)
            .ok_or_else(|| Error::UnknownTag(tag.to_string()))
    }
}
