//! Property-based tests for lc-math numerical code.
//!
//! Uses proptest to verify that scaling and fitting behave sanely across
//! many random inputs, not just hand-picked fixtures.

use lc_math::{Lasso, StandardScaler};
use proptest::prelude::*;

const TOL: f64 = 1e-9;

fn row_strategy(width: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0..100.0f64, width)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Transformed training columns have (near) zero mean.
    #[test]
    fn scaler_centers_training_data(rows in prop::collection::vec(row_strategy(4), 2..40)) {
        let scaler = StandardScaler::fit(&rows);
        let scaled = scaler.transform(&rows);
        let n = scaled.len() as f64;
        for j in 0..4 {
            let mean: f64 = scaled.iter().map(|r| r[j]).sum::<f64>() / n;
            prop_assert!(mean.abs() < 1e-6, "column {} mean {}", j, mean);
        }
    }

    /// Scaling never produces NaN or infinity, including degenerate
    /// zero-variance columns.
    #[test]
    fn scaler_output_is_finite(
        rows in prop::collection::vec(row_strategy(3), 1..30),
        probe in row_strategy(3),
    ) {
        let scaler = StandardScaler::fit(&rows);
        for v in scaler.transform_row(&probe) {
            prop_assert!(v.is_finite(), "non-finite transform output {}", v);
        }
    }

    /// Fitting twice on the same data gives byte-identical models.
    #[test]
    fn lasso_is_deterministic(
        rows in prop::collection::vec(row_strategy(3), 5..40),
        noise in prop::collection::vec(-0.5..0.5f64, 40),
    ) {
        let y: Vec<f64> = rows
            .iter()
            .zip(noise.iter())
            .map(|(r, e)| r[0] * 0.5 - r[2] * 0.25 + e)
            .collect();
        let lasso = Lasso::default();
        let a = lasso.fit(&rows, &y);
        let b = lasso.fit(&rows, &y);
        prop_assert_eq!(a.coefficients, b.coefficients);
        prop_assert!((a.intercept - b.intercept).abs() < TOL);
    }

    /// A constant target series is recovered exactly regardless of the
    /// feature values (the degrade case the forecaster leans on).
    #[test]
    fn lasso_recovers_constant_target(
        rows in prop::collection::vec(row_strategy(5), 25..60),
        c in -10.0..10.0f64,
    ) {
        let scaler = StandardScaler::fit(&rows);
        let scaled = scaler.transform(&rows);
        let y = vec![c; scaled.len()];
        let model = Lasso::default().fit(&scaled, &y);
        let probe = scaler.transform_row(&rows[0]);
        let pred = model.predict(&probe);
        prop_assert!((pred - c).abs() < 0.05, "predicted {} for constant {}", pred, c);
    }

    /// Predictions are finite for finite inputs.
    #[test]
    fn lasso_predictions_are_finite(
        rows in prop::collection::vec(row_strategy(2), 5..30),
        probe in row_strategy(2),
    ) {
        let y: Vec<f64> = rows.iter().map(|r| r[0] + r[1]).collect();
        let model = Lasso::default().fit(&rows, &y);
        prop_assert!(model.predict(&probe).is_finite());
    }
}
