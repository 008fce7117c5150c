use bandit::{
    parse_experiments, Bandit, EpsilonGreedy, EpsilonGreedyConfig, Error, Softmax, SoftmaxConfig,
    Trials,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::thread;

const SIGNUP: &str = "signup_flow\t1\t/v1/signup\tsignup_flow:control\n\
                      signup_flow\t2\t/v2/signup\tsignup_flow:variant_b\n";

#[test]
fn parses_the_two_variant_example() {
    let exps = parse_experiments("exp\t1\t/a\texp:a\nexp\t2\t/b\texp:b\n").unwrap();
    assert_eq!(exps.len(), 1);
    let exp = &exps["exp"];
    let got: Vec<(usize, &str)> = exp
        .variants()
        .iter()
        .map(|v| (v.ordinal, v.tag.as_str()))
        .collect();
    assert_eq!(got, vec![(1, "exp:a"), (2, "exp:b")]);
}

#[test]
fn rejects_gap_and_foreign_prefix() {
    assert!(matches!(
        parse_experiments("exp\t1\t/a\texp:a\nexp\t3\t/b\texp:b\n"),
        Err(Error::NonContiguousOrdinals { ordinal: 3, .. })
    ));
    assert!(matches!(
        parse_experiments("exp\t1\t/a\tother:a\n"),
        Err(Error::MalformedRecord { .. })
    ));
}

#[test]
fn epsilon_greedy_converges_on_the_better_variant() {
    let factory = EpsilonGreedyConfig::default().with_epsilon(0.1).with_seed(3).factory();
    let trials = Trials::new(SIGNUP, factory).unwrap();
    let trial = trials.trial("signup_flow").unwrap();

    // Variant b converts at 30%, control at 10%.
    let mut world = StdRng::seed_from_u64(11);
    let mut b_picks = 0usize;
    let rounds = 5_000;
    for _ in 0..rounds {
        let v = trial.select().unwrap();
        let p = if v.ordinal == 2 { 0.3 } else { 0.1 };
        if v.ordinal == 2 {
            b_picks += 1;
        }
        let reward = if world.random::<f64>() < p { 1.0 } else { 0.0 };
        trial.update(v.ordinal, reward).unwrap();
    }

    let stats = trial.stats().unwrap();
    assert!(stats.value(2).unwrap() > stats.value(1).unwrap(), "{stats:?}");
    assert!(b_picks as f64 / rounds as f64 > 0.8, "b_picks={b_picks}");
    assert_eq!(stats.total_count(), rounds as u64);
    assert_eq!(stats.pulls.iter().sum::<u64>(), rounds as u64);
}

#[test]
fn softmax_prefers_the_better_variant() {
    let trials =
        Trials::new(SIGNUP, SoftmaxConfig::default().with_temperature(0.1).with_seed(5).factory())
            .unwrap();
    let trial = trials.trial("signup_flow").unwrap();

    let mut world = StdRng::seed_from_u64(12);
    for _ in 0..3_000 {
        let v = trial.select().unwrap();
        let p = if v.ordinal == 2 { 0.6 } else { 0.2 };
        let reward = if world.random::<f64>() < p { 1.0 } else { 0.0 };
        trial.update(v.ordinal, reward).unwrap();
    }

    let stats = trial.stats().unwrap();
    assert!(stats.pulls[1] > stats.pulls[0], "{stats:?}");
}

#[test]
fn softmax_frequency_matches_boltzmann_probability() {
    let mut b = Softmax::with_seed(2, 1.0, 31).unwrap();
    b.update(1, 1.0).unwrap();
    b.update(2, 0.0).unwrap();

    let n = 50_000;
    let hits = (0..n).filter(|_| b.select_arm() == 1).count();
    let share = hits as f64 / n as f64;
    let e = std::f64::consts::E;
    assert!((share - e / (e + 1.0)).abs() < 0.015, "share={share}");
}

#[test]
fn pinned_variant_lookup_by_tag() {
    let trials = Trials::new(SIGNUP, EpsilonGreedyConfig::default().factory()).unwrap();
    let (exp, v) = trials.get_variant("signup_flow:variant_b").unwrap();
    assert_eq!(exp.name(), "signup_flow");
    assert_eq!(v.url, "/v2/signup");
    assert!(matches!(
        trials.get_variant("signup_flow:missing"),
        Err(Error::UnknownTag(_))
    ));
}

#[test]
fn concurrent_select_and_update_keep_counts_consistent() {
    let tsv = "a\t1\t/a1\ta:1\na\t2\t/a2\ta:2\na\t3\t/a3\ta:3\n\
               b\t1\t/b1\tb:1\nb\t2\t/b2\tb:2\n";
    let trials = Arc::new(
        Trials::new(tsv, EpsilonGreedyConfig::default().with_epsilon(0.5).with_seed(1).factory())
            .unwrap(),
    );

    let threads = 8;
    let per_thread = 500;
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let trials = Arc::clone(&trials);
            thread::spawn(move || {
                let name = if t % 2 == 0 { "a" } else { "b" };
                let trial = trials.trial(name).unwrap();
                for i in 0..per_thread {
                    let v = trial.select().unwrap();
                    trial.update(v.ordinal, (i % 3) as f64).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    for name in ["a", "b"] {
        let stats = trials.trial(name).unwrap().stats().unwrap();
        let expected = (threads / 2 * per_thread) as u64;
        assert_eq!(stats.total_count(), expected, "{name}");
        assert_eq!(stats.pulls.iter().sum::<u64>(), expected, "{name}");
        for &v in &stats.values {
            assert!((0.0..=2.0).contains(&v), "{name}: mean {v}");
        }
    }
}

#[test]
fn reset_through_the_registry_restores_fresh_behaviour() {
    let factory = SoftmaxConfig::default().with_temperature(0.5).with_seed(9).factory();
    let trials = Trials::new(SIGNUP, factory).unwrap();
    let trial = trials.trial("signup_flow").unwrap();

    let first: Vec<usize> = (0..30).map(|_| trial.select().unwrap().ordinal).collect();
    trial.update(1, 4.0).unwrap();
    trial.reset().unwrap();
    let again: Vec<usize> = (0..30).map(|_| trial.select().unwrap().ordinal).collect();
    assert_eq!(first, again);
}

#[test]
fn custom_factory_can_mix_strategies() {
    let tsv = "small\t1\t/s1\tsmall:1\nsmall\t2\t/s2\tsmall:2\n\
               wide\t1\t/w1\twide:1\nwide\t2\t/w2\twide:2\n\
               wide\t3\t/w3\twide:3\nwide\t4\t/w4\twide:4\n";
    let factory = |arms: usize| -> bandit::Result<Box<dyn Bandit>> {
        if arms > 3 {
            Ok(Box::new(Softmax::with_seed(arms, 0.2, 0)?))
        } else {
            Ok(Box::new(EpsilonGreedy::with_seed(arms, 0.1, 0)?))
        }
    };
    let trials = Trials::new(tsv, factory).unwrap();
    assert_eq!(
        trials.trial("small").unwrap().version().unwrap(),
        "EpsilonGreedy(epsilon=0.10)"
    );
    assert_eq!(trials.trial("wide").unwrap().version().unwrap(), "Softmax(tau=0.20)");
}
