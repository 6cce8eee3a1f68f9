//! Property tests for Platt scaling and conformal calibration.

use proptest::prelude::*;

use hindsight_learning::{calibrate, interval, PlattModel};

proptest! {
    #[test]
    fn prop_apply_stays_in_open_unit_interval(
        a in -5.0f64..5.0,
        b in -2.0f64..2.0,
        s in -2.0f64..2.0,
    ) {
        let m = PlattModel { a, b };
        let p = m.apply(s);
        prop_assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    fn prop_apply_monotonic_when_a_negative(
        a in -5.0f64..-0.01,
        b in -2.0f64..2.0,
        s1 in -2.0f64..2.0,
        delta in 0.01f64..1.0,
    ) {
        // Ranges keep the exponent away from f64 sigmoid saturation.
        let m = PlattModel { a, b };
        prop_assert!(m.apply(s1) < m.apply(s1 + delta));
    }

    #[test]
    fn prop_fit_never_panics_and_output_bounded(
        samples in prop::collection::vec((0.0f64..1.0, 0.0f64..1.0), 0..32),
    ) {
        let scores: Vec<f64> = samples.iter().map(|(s, _)| *s).collect();
        let labels: Vec<f64> = samples.iter().map(|(_, l)| *l).collect();
        let m = PlattModel::fit(&scores, &labels);
        for s in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let p = m.apply(s);
            prop_assert!(p > 0.0 && p < 1.0);
        }
    }

    #[test]
    fn prop_conformal_quantile_is_an_element(
        scores in prop::collection::vec(0.0f64..1.0, 1..64),
        alpha in 0.01f64..0.99,
    ) {
        let q = calibrate(&scores, alpha).unwrap();
        prop_assert!(scores.iter().any(|&s| s == q));
    }

    #[test]
    fn prop_quantile_covers_at_least_nominal_fraction(
        scores in prop::collection::vec(0.0f64..1.0, 4..64),
        alpha in 0.05f64..0.5,
    ) {
        // The conservative rank guarantees at least ⌈(n+1)(1−α)⌉ − 1 + 1
        // of n calibration scores sit at or below the quantile.
        let q = calibrate(&scores, alpha).unwrap();
        let covered = scores.iter().filter(|&&s| s <= q).count();
        let n = scores.len() as f64;
        let needed = (((n + 1.0) * (1.0 - alpha)).ceil() - 1.0).max(0.0).min(n - 1.0) as usize + 1;
        prop_assert!(covered >= needed);
    }

    #[test]
    fn prop_interval_symmetric_around_prediction(
        pred in -10.0f64..10.0,
        q in 0.0f64..5.0,
        alpha in 0.01f64..0.99,
    ) {
        let iv = interval(pred, q, alpha);
        prop_assert!((iv.upper - pred - (pred - iv.lower)).abs() < 1e-9);
        prop_assert!((iv.coverage - (1.0 - alpha)).abs() < 1e-12);
    }
}
