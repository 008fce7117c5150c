use bandit::{BanditConfig, SoftmaxConfig, Trials};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

const DEFINITION: &str = "\
signup_flow\t1\t/v1/signup\tsignup_flow:control
signup_flow\t2\t/v2/signup\tsignup_flow:variant_b
pricing\t1\t/pricing\tpricing:control
pricing\t2\t/pricing-annual\tpricing:annual_first
pricing\t3\t/pricing-calc\tpricing:calculator
";

fn main() -> Result<(), bandit::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Softmax explores in proportion to how promising each variant looks.
    let cfg = BanditConfig::Softmax(SoftmaxConfig::default().with_temperature(0.1).with_seed(0));
    let trials = Trials::new(DEFINITION, cfg.factory())?;

    // Simulated true conversion rates, keyed by tag.
    let truth = |tag: &str| match tag {
        "signup_flow:variant_b" => 0.32,
        "pricing:annual_first" => 0.18,
        "pricing:calculator" => 0.25,
        _ => 0.20,
    };

    // Separate RNG to simulate the visitors.
    let mut env = StdRng::seed_from_u64(123);

    for t in 0..2_000u64 {
        for (name, trial) in trials.iter() {
            let v = trial.select()?;
            let reward = if env.random::<f64>() < truth(&v.tag) { 1.0 } else { 0.0 };
            trial.update(v.ordinal, reward)?;

            if t % 500 == 0 {
                eprintln!("t={t:4} {name}: routed to {} ({}) reward={reward}", v.url, v.tag);
            }
        }
    }

    for (name, trial) in trials.iter() {
        let stats = trial.stats()?;
        println!("{name} [{}]", trial.version()?);
        for v in trial.experiment().variants() {
            let i = v.ordinal - 1;
            println!(
                "  {:<24} pulls={:5} mean={:.3}",
                v.tag, stats.pulls[i], stats.values[i]
            );
        }
    }

    // Out-of-band pinning: a caller that must show a specific variant.
    let (exp, pinned) = trials.get_variant("pricing:calculator")?;
    println!("pinned {} -> {}", exp.name(), pinned.url);
    Ok(())
}
