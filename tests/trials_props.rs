//! Property tests for the parser and the trials registry.

use bandit::{parse_experiments, EpsilonGreedyConfig, Error, SoftmaxConfig, Trials};
use proptest::prelude::*;

/// A well-formed definition: `sizes[i]` variants for experiment `e{i}`,
/// rows emitted in a scrambled order.
fn definition(sizes: &[usize], shuffle: u64) -> String {
    let mut rows = Vec::new();
    for (e, &n) in sizes.iter().enumerate() {
        for ord in 1..=n {
            rows.push(format!("e{e}\t{ord}\t/e{e}/{ord}\te{e}:v{ord}"));
        }
    }
    let len = rows.len().max(1) as u64;
    rows.rotate_left((shuffle % len) as usize);
    rows.reverse();
    rows.join("\n")
}

proptest! {
    /// Any well-formed table parses, in ordinal order, whatever the row order.
    #[test]
    fn well_formed_tables_parse(
        sizes in proptest::collection::vec(1usize..6, 1..5),
        shuffle in any::<u64>(),
    ) {
        let exps = parse_experiments(&definition(&sizes, shuffle)).unwrap();
        prop_assert_eq!(exps.len(), sizes.len());
        for (e, &n) in sizes.iter().enumerate() {
            let exp = &exps[&format!("e{e}")];
            prop_assert_eq!(exp.arms(), n);
            for (i, v) in exp.variants().iter().enumerate() {
                prop_assert_eq!(v.ordinal, i + 1);
                prop_assert_eq!(&v.tag, &format!("e{e}:v{}", i + 1));
            }
        }
    }

    /// Dropping any row except the last of an experiment leaves a gap.
    #[test]
    fn removing_an_inner_ordinal_is_noncontiguous(n in 2usize..8, drop in 1usize..7) {
        let drop = 1 + drop % (n - 1); // in 1..n, never the last ordinal
        let src: String = (1..=n)
            .filter(|&o| o != drop)
            .map(|o| format!("x\t{o}\t/x\tx:{o}\n"))
            .collect();
        let err = parse_experiments(&src).unwrap_err();
        let is_gap = matches!(
            err,
            Error::NonContiguousOrdinals { ordinal, .. } if ordinal == drop as i64 + 1
        );
        prop_assert!(is_gap);
    }

    /// Every selection maps to a variant of its own experiment, and every tag resolves.
    #[test]
    fn registry_select_and_lookup(
        sizes in proptest::collection::vec(1usize..6, 1..5),
        seed in any::<u64>(),
        softmax in any::<bool>(),
        rounds in 0usize..40,
    ) {
        let src = definition(&sizes, seed);
        let trials = if softmax {
            Trials::new(&src, SoftmaxConfig::default().with_seed(seed).factory()).unwrap()
        } else {
            Trials::new(&src, EpsilonGreedyConfig::default().with_seed(seed).factory()).unwrap()
        };
        prop_assert_eq!(trials.len(), sizes.len());

        for (name, trial) in trials.iter() {
            for i in 0..rounds {
                let v = trial.select().unwrap();
                let (exp, found) = trials.get_variant(&v.tag).unwrap();
                prop_assert_eq!(exp.name(), name);
                prop_assert_eq!(found, &v);
                trial.update(v.ordinal, (i % 2) as f64).unwrap();
            }
            let stats = trial.stats().unwrap();
            prop_assert_eq!(stats.total_count(), rounds as u64);
            prop_assert_eq!(stats.arms(), trial.experiment().arms());
        }
        let is_unknown = matches!(trials.get_variant("nope:nope"), Err(Error::UnknownTag(_)));
        prop_assert!(is_unknown);
    }
}
