//! `bandit`: multi-armed bandit policies bound to tagged A/B/n experiments.
//!
//! Designed for routing live traffic among the variants of running
//! experiments: every experiment is a small set of arms (URLs to send a
//! request to), a policy picks one per request, and observed rewards are fed
//! back so later picks favour what works.
//!
//! **Policies** (both implement [`Bandit`]):
//! - [`EpsilonGreedy`]: the best-mean arm with probability `1 - ε`, a uniform
//!   arm otherwise.
//! - [`Softmax`]: arms sampled with Boltzmann weights `exp(v_i / τ)`.
//!
//! Both are **seedable** through an injected [`UniformSource`], so tests and
//! replays are reproducible.
//!
//! **Experiments:**
//! - [`parse_experiments`] / [`read_experiments`]: validate a tab-separated
//!   definition (`name, ordinal, url, tag`) into [`Experiments`].
//! - [`Trials`]: one [`Trial`] (bandit + experiment) per experiment, built
//!   with a caller-supplied [`BanditFactory`]; lookup by tag with
//!   [`Trials::get_variant`].
//!
//! **Conventions:**
//! - Arms are 1-based ordinals everywhere, matching [`Variant::ordinal`].
//! - `select` counts a *pull*, `update` counts a *reward*; running means are
//!   averaged over rewards only.
//! - Errors are values ([`Error`]); nothing here panics on bad input.
//!
//! **Non-goals:**
//! - No contextual or Bayesian (Thompson) policies.
//! - No persistence or cross-process state; this is an in-memory component.
//!
//! ```rust
//! use bandit::{SoftmaxConfig, Trials};
//!
//! let tsv = "checkout\t1\t/checkout\tcheckout:control\n\
//!            checkout\t2\t/checkout-fast\tcheckout:fast\n";
//! let trials = Trials::new(tsv, SoftmaxConfig::default().with_seed(7).factory()).unwrap();
//! let trial = trials.trial("checkout").unwrap();
//!
//! for _ in 0..100 {
//!     let v = trial.select().unwrap();
//!     let converted = v.tag == "checkout:fast";
//!     trial.update(v.ordinal, if converted { 1.0 } else { 0.0 }).unwrap();
//! }
//!
//! let stats = trial.stats().unwrap();
//! assert!(stats.value(2).unwrap() > stats.value(1).unwrap());
//! ```

#![forbid(unsafe_code)]

mod error;
pub use error::{Error, Result};

mod rng;
pub use rng::{derive_seed, SeededUniform, UniformSource};

mod alloc;
pub use alloc::{first_argmax, softmax};

mod decision;
pub use decision::*;

mod policy;
pub use policy::{ArmStats, Bandit};

mod epsilon_greedy;
pub use epsilon_greedy::EpsilonGreedy;

mod softmax;
pub use self::softmax::Softmax;

mod config;
pub use config::{BanditConfig, EpsilonGreedyConfig, SoftmaxConfig};

mod experiment;
pub use experiment::{Experiment, Experiments, Variant};

mod parse;
pub use parse::{parse_experiments, read_experiments};

mod trial;
pub use trial::{BanditFactory, Trial, Trials};
