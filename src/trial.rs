//! Trials: one bandit bound to one experiment, and the registry of them.
//!
//! [`Trials`] is the front door for a routing service:
//!
//! ```text
//! let trials = Trials::new(tsv, factory)?;      // once, at startup
//! let v = trials.trial("signup")?.select()?;     // per request
//! route_to(&v.url);                              // your code
//! trials.trial("signup")?.update(v.ordinal, r)?; // when the outcome is known
//! ```
//!
//! ## Concurrency
//!
//! Each [`Trial`] serializes access to its own bandit behind a mutex; trials
//! of different experiments never contend. The registry itself is immutable
//! after construction, so share it as `Arc<Trials>` and replace the whole
//! `Arc` to reload definitions.

use std::collections::BTreeMap;
use std::io::Read;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, trace, warn};

use crate::{
    parse_experiments, read_experiments, ArmStats, Bandit, Error, Experiment, Experiments,
    Result, Variant,
};

/// Builds a bandit for an experiment with the given number of arms.
///
/// Any `Fn(usize) -> Result<Box<dyn Bandit>>` is a factory; see
/// [`BanditConfig::factory`](crate::BanditConfig::factory) for ready-made ones.
pub trait BanditFactory: Fn(usize) -> Result<Box<dyn Bandit>> {}

impl<F> BanditFactory for F where F: Fn(usize) -> Result<Box<dyn Bandit>> {}

/// A bandit set up against an experiment.
pub struct Trial {
    experiment: Experiment,
    bandit: Mutex<Box<dyn Bandit>>,
}

impl std::fmt::Debug for Trial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trial")
            .field("experiment", &self.experiment.name)
            .field("arms", &self.experiment.arms())
            .finish_non_exhaustive()
    }
}

impl Trial {
    /// Pair `bandit` with `experiment`.
    ///
    /// Fails with [`Error::ArmCountMismatch`] unless the bandit has exactly one
    /// arm per variant; that equality then holds for the trial's lifetime.
    pub fn new(experiment: Experiment, bandit: Box<dyn Bandit>) -> Result<Self> {
        let (arms, variants) = (bandit.arms(), experiment.arms());
        if arms != variants {
            return Err(Error::ArmCountMismatch {
                experiment: experiment.name,
                bandit: arms,
                variants,
            });
        }
        Ok(Self {
            experiment,
            bandit: Mutex::new(bandit),
        })
    }

    pub fn experiment(&self) -> &Experiment {
        &self.experiment
    }

    fn bandit(&self) -> Result<MutexGuard<'_, Box<dyn Bandit>>> {
        self.bandit.lock().map_err(|_| {
            warn!(experiment = %self.experiment.name, "bandit lock poisoned");
            Error::LockPoisoned
        })
    }

    /// Let the bandit pick an arm and return the matching variant.
    pub fn select(&self) -> Result<Variant> {
        let arm = self.bandit()?.select_arm();
        let variant = self.experiment.variant(arm)?;
        trace!(experiment = %self.experiment.name, tag = %variant.tag, "selected variant");
        Ok(variant.clone())
    }

    /// Report `reward` for the variant with `ordinal`.
    pub fn update(&self, ordinal: usize, reward: f64) -> Result<()> {
        self.bandit()?.update(ordinal, reward).map_err(|e| {
            warn!(experiment = %self.experiment.name, ordinal, error = %e, "rejected update");
            e
        })
    }

    /// Reset the bandit to its just-constructed state.
    pub fn reset(&self) -> Result<()> {
        self.bandit()?.reset();
        debug!(experiment = %self.experiment.name, "reset bandit");
        Ok(())
    }

    /// The bandit's [`Bandit::version`].
    pub fn version(&self) -> Result<String> {
        Ok(self.bandit()?.version())
    }

    /// A snapshot of the bandit's per-arm statistics.
    pub fn stats(&self) -> Result<ArmStats> {
        Ok(self.bandit()?.stats().clone())
    }
}

/// Experiment name → [`Trial`].
#[derive(Debug, Default)]
pub struct Trials {
    trials: BTreeMap<String, Trial>,
}

impl Trials {
    /// Parse `source` and build one bandit per experiment with `factory`.
    ///
    /// All-or-nothing: a parse error or any factory error fails the whole
    /// registry.
    ///
    /// ```rust
    /// use bandit::{EpsilonGreedyConfig, Trials};
    ///
    /// let tsv = "signup\t1\t/v1/signup\tsignup:control\n\
    ///            signup\t2\t/v2/signup\tsignup:variant_b\n";
    /// let factory = EpsilonGreedyConfig::default().with_seed(1).factory();
    /// let trials = Trials::new(tsv, factory).unwrap();
    ///
    /// let trial = trials.trial("signup").unwrap();
    /// let v = trial.select().unwrap();
    /// trial.update(v.ordinal, 1.0).unwrap();
    ///
    /// let (exp, pinned) = trials.get_variant("signup:variant_b").unwrap();
    /// assert_eq!((exp.name(), pinned.url.as_str()), ("signup", "/v2/signup"));
    /// ```
    pub fn new(source: &str, factory: impl BanditFactory) -> Result<Self> {
        Self::from_experiments(parse_experiments(source)?, factory)
    }

    /// Like [`Trials::new`], reading the definition from `reader`.
    pub fn read<R: Read>(reader: R, factory: impl BanditFactory) -> Result<Self> {
        Self::from_experiments(read_experiments(reader)?, factory)
    }

    /// Build one bandit per already-parsed experiment.
    pub fn from_experiments(experiments: Experiments, factory: impl BanditFactory) -> Result<Self> {
        let mut trials = BTreeMap::new();
        for (name, experiment) in experiments {
            let bandit = factory(experiment.arms()).map_err(|e| Error::FactoryFailure {
                experiment: name.clone(),
                source: Box::new(e),
            })?;
            debug!(
                experiment = %name,
                arms = experiment.arms(),
                version = %bandit.version(),
                "built trial"
            );
            trials.insert(name, Trial::new(experiment, bandit)?);
        }
        Ok(Self { trials })
    }

    pub fn get(&self, name: &str) -> Option<&Trial> {
        self.trials.get(name)
    }

    /// The trial for experiment `name`, or [`Error::UnknownExperiment`].
    pub fn trial(&self, name: &str) -> Result<&Trial> {
        self.get(name)
            .ok_or_else(|| Error::UnknownExperiment(name.to_string()))
    }

    /// The experiment and variant carrying `tag`, searched across all trials.
    pub fn get_variant(&self, tag: &str) -> Result<(&Experiment, &Variant)> {
        self.trials
            .values()
            .find_map(|t| {
                let exp = &t.experiment;
                exp.variants.iter().find(|v| v.tag == tag).map(|v| (exp, v))
            })
            .ok_or_else(|| Error::UnknownTag(tag.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trials.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Trial)> {
        self.trials.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }
}
