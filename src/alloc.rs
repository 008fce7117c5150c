//! Allocation helpers (probabilities, softmax).
//!
//! Deterministic utilities for turning per-arm values into a probability
//! distribution in a stable (reproducible) way.

/// Compute a stable softmax distribution over per-arm values.
///
/// - `temperature` must be `> 0`; `+inf` yields the uniform distribution.
///   Callers handle the `temperature == 0` greedy limit themselves.
/// - Uses the standard max-trick, so large values do not overflow `exp`.
/// - Returns a distribution that sums to 1 (or empty if input is empty).
pub fn softmax(values: &[f64], temperature: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let uniform = || vec![1.0 / values.len() as f64; values.len()];
    if !(temperature > 0.0) {
        return uniform();
    }

    let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut out: Vec<f64> = Vec::with_capacity(values.len());
    let mut denom = 0.0;
    for &v in values {
        let x = ((v - max_value) / temperature).exp();
        denom += x;
        out.push(x);
    }
    if denom <= 0.0 || !denom.is_finite() {
        // Degenerate fallback: uniform.
        return uniform();
    }

    for p in &mut out {
        *p /= denom;
    }
    out
}

/// Index of the first maximal value (ascending scan, earliest wins ties).
///
/// Returns `0` for an empty slice.
pub fn first_argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn softmax_sums_to_one() {
        let p = softmax(&[0.0, 1.0, -2.0], 1.0);
        let s: f64 = p.iter().sum();
        assert!((s - 1.0).abs() < 1e-9, "sum={}", s);
    }

    #[test]
    fn softmax_matches_boltzmann_weights() {
        let p = softmax(&[1.0, 0.0], 1.0);
        let e = std::f64::consts::E;
        assert!((p[0] - e / (e + 1.0)).abs() < 1e-12);
        assert!((p[1] - 1.0 / (e + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn infinite_temperature_is_uniform() {
        let p = softmax(&[3.0, -1.0, 0.5, 9.0], f64::INFINITY);
        for x in p {
            assert!((x - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn first_argmax_keeps_the_earliest_tie() {
        assert_eq!(first_argmax(&[0.0, 2.0, 2.0, 1.0]), 1);
        assert_eq!(first_argmax(&[0.0, 0.0, 0.0]), 0);
        assert_eq!(first_argmax(&[]), 0);
    }

    proptest! {
        #[test]
        fn softmax_is_a_distribution(
            // Keep bounded: small slices, bounded magnitudes.
            values in proptest::collection::vec(-1.0e6f64..1.0e6f64, 0..20),
            temperature in prop_oneof![
                Just(f64::NAN),
                Just(0.0),
                Just(-1.0),
                Just(f64::INFINITY),
                1.0e-6f64..1.0e6f64,
            ],
        ) {
            let p = softmax(&values, temperature);

            // Deterministic.
            let p2 = softmax(&values, temperature);
            prop_assert_eq!(&p, &p2);

            prop_assert_eq!(p.len(), values.len());
            if !values.is_empty() {
                let sum: f64 = p.iter().sum();
                prop_assert!((sum - 1.0).abs() < 1e-9, "sum={}", sum);
                for &x in &p {
                    prop_assert!(x.is_finite());
                    prop_assert!((0.0..=1.0).contains(&x));
                }
            }
        }
    }
}
