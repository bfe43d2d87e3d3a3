//! The forecaster: standardize, ordered split, fit, predict, clamp.

use lc_math::{Lasso, StandardScaler};
use tracing::debug;

use crate::features::SupervisedDataset;

/// Forecast floor; utilization cannot be negative.
pub const FORECAST_MIN: f64 = 0.0;
/// Forecast ceiling: 200% of the configured limit. Absorbs model
/// extrapolation error on steep ramps.
pub const FORECAST_MAX: f64 = 2.0;
/// Held-out share of the chronological split.
pub const TEST_FRACTION: f64 = 0.2;

/// Clamp a raw model output into the publishable range. NaN (possible
/// when Prometheus hands back NaN samples) collapses to the floor
/// rather than poisoning the gauge.
pub fn clamp_forecast(raw: f64) -> f64 {
    if raw.is_nan() {
        return FORECAST_MIN;
    }
    raw.clamp(FORECAST_MIN, FORECAST_MAX)
}

/// Train partition size for an ordered 80/20 split of `n` rows.
/// The test partition is `ceil(n * TEST_FRACTION)` trailing rows.
pub fn train_split_len(n: usize) -> usize {
    let test = ((n as f64) * TEST_FRACTION).ceil() as usize;
    n.saturating_sub(test)
}

/// One-step-ahead forecaster. Stateless across iterations: every call
/// fits a fresh scaler and model and discards both afterwards.
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    pub lasso: Lasso,
}

impl Forecaster {
    /// Fit on the dataset and predict the next value from `latest`, the
    /// most-recent-first lag window. The result is clamped to
    /// `[FORECAST_MIN, FORECAST_MAX]`.
    ///
    /// The caller guarantees the dataset passed the minimum-row check;
    /// `latest` must have the same width as the training rows.
    pub fn forecast(&self, dataset: &SupervisedDataset, latest: &[f64]) -> f64 {
        // Standardization statistics come from the full feature matrix
        // and are reused unchanged for the live window.
        let scaler = StandardScaler::fit(&dataset.rows);
        let scaled = scaler.transform(&dataset.rows);

        // Chronological split; the held-out tail is not used for gating
        // yet, but the split keeps training free of look-ahead leakage.
        let n_train = train_split_len(scaled.len());
        let model = self
            .lasso
            .fit(&scaled[..n_train], &dataset.targets[..n_train]);
        debug!(
            train_rows = n_train,
            test_rows = scaled.len() - n_train,
            iterations = model.iterations,
            converged = model.converged,
            "model fitted"
        );

        let raw = model.predict(&scaler.transform_row(latest));
        clamp_forecast(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{latest_window, make_supervised};

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_forecast(-1.0), 0.0);
        assert_eq!(clamp_forecast(0.5), 0.5);
        assert_eq!(clamp_forecast(5.0), 2.0);
        assert_eq!(clamp_forecast(0.0), 0.0);
        assert_eq!(clamp_forecast(2.0), 2.0);
        assert_eq!(clamp_forecast(f64::NAN), 0.0);
    }

    #[test]
    fn split_sizes_match_ceil_rule() {
        assert_eq!(train_split_len(100), 80);
        assert_eq!(train_split_len(21), 16); // test = ceil(4.2) = 5
        assert_eq!(train_split_len(20), 16);
        assert_eq!(train_split_len(1), 0);
    }

    #[test]
    fn constant_series_forecasts_the_constant() {
        let values = vec![0.4; 120];
        let lags = 10;
        let ds = make_supervised(&values, lags);
        let latest = latest_window(&values, lags).unwrap();
        let forecast = Forecaster::default().forecast(&ds, &latest);
        assert!(
            (forecast - 0.4).abs() < 1e-6,
            "expected ~0.4, got {}",
            forecast
        );
    }

    #[test]
    fn steep_ramp_hits_the_clamp_ceiling() {
        // Values rise 0.05 per step; by the end the next true value is
        // far above 2.0, so the published forecast must be exactly 2.0.
        let values: Vec<f64> = (0..200).map(|i| i as f64 * 0.05).collect();
        let lags = 10;
        let ds = make_supervised(&values, lags);
        let latest = latest_window(&values, lags).unwrap();
        let forecast = Forecaster::default().forecast(&ds, &latest);
        assert_eq!(forecast, 2.0);
    }

    #[test]
    fn forecast_is_deterministic() {
        let values: Vec<f64> = (0..150).map(|i| 0.3 + 0.1 * (i as f64 * 0.2).sin()).collect();
        let lags = 12;
        let ds = make_supervised(&values, lags);
        let latest = latest_window(&values, lags).unwrap();
        let forecaster = Forecaster::default();
        assert_eq!(
            forecaster.forecast(&ds, &latest),
            forecaster.forecast(&ds, &latest)
        );
    }

    #[test]
    fn noisy_stationary_series_stays_in_band() {
        // Deterministic pseudo-noise around 0.5; forecast should stay
        // near the band, nowhere near the clamp bounds.
        let values: Vec<f64> = (0..300)
            .map(|i| 0.5 + 0.05 * ((i as f64 * 1.7).sin() + (i as f64 * 0.9).cos()))
            .collect();
        let lags = 20;
        let ds = make_supervised(&values, lags);
        let latest = latest_window(&values, lags).unwrap();
        let forecast = Forecaster::default().forecast(&ds, &latest);
        assert!(forecast > 0.3 && forecast < 0.7, "forecast {}", forecast);
    }
}
