//! Lagged feature engineering: univariate series → supervised dataset.
//!
//! For lag count L, row i pairs the features
//! `(v[i+L-1], v[i+L-2], ..., v[i])` — that is, lag_1 through lag_L of
//! the target — with target `v[i+L]`. Rows stay in chronological order;
//! the ordered train/test split downstream depends on that.

/// Too few rows to fit anything trustworthy; below this the loop
/// publishes 0.0 instead of invoking the forecaster at all.
pub const MIN_TRAIN_ROWS: usize = 20;

/// Lagged feature matrix plus aligned targets. Row count is
/// `series length - lags`, or zero when the series is too short.
#[derive(Debug, Clone, PartialEq)]
pub struct SupervisedDataset {
    pub rows: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

impl SupervisedDataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether there is enough data to fit a model.
    pub fn has_enough_rows(&self) -> bool {
        self.len() >= MIN_TRAIN_ROWS
    }
}

/// Build the supervised dataset for `lags` from a dense value series.
/// Indices below `lags` are dropped (insufficient history).
pub fn make_supervised(values: &[f64], lags: usize) -> SupervisedDataset {
    if lags == 0 || values.len() <= lags {
        return SupervisedDataset {
            rows: Vec::new(),
            targets: Vec::new(),
        };
    }

    let n_rows = values.len() - lags;
    let mut rows = Vec::with_capacity(n_rows);
    let mut targets = Vec::with_capacity(n_rows);
    for i in 0..n_rows {
        let target_idx = i + lags;
        // lag_1 first: the most recent value before the target.
        let row: Vec<f64> = (1..=lags).map(|k| values[target_idx - k]).collect();
        rows.push(row);
        targets.push(values[target_idx]);
    }
    SupervisedDataset { rows, targets }
}

/// The live prediction input: the `lags` most recent values, most
/// recent first, mirroring the training row layout. `None` when the
/// series is shorter than `lags`.
pub fn latest_window(values: &[f64], lags: usize) -> Option<Vec<f64>> {
    if lags == 0 || values.len() < lags {
        return None;
    }
    Some((1..=lags).map(|k| values[values.len() - k]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_count_is_len_minus_lags() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let ds = make_supervised(&values, 60);
        assert_eq!(ds.len(), 40);
        assert_eq!(ds.targets.len(), 40);
    }

    #[test]
    fn rows_are_chronologically_aligned() {
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        let lags = 3;
        let ds = make_supervised(&values, lags);
        assert_eq!(ds.len(), 7);
        for i in 0..ds.len() {
            assert_eq!(ds.targets[i], values[i + lags]);
            // feature[0] is lag_1, the value immediately before the target
            assert_eq!(ds.rows[i][0], values[i + lags - 1]);
            assert_eq!(ds.rows[i][lags - 1], values[i]);
        }
    }

    #[test]
    fn lags_exceeding_length_yield_empty_dataset() {
        let values = vec![1.0, 2.0, 3.0];
        let ds = make_supervised(&values, 10);
        assert!(ds.is_empty());
        assert!(!ds.has_enough_rows());
    }

    #[test]
    fn exact_length_yields_empty_dataset() {
        let values = vec![1.0; 5];
        assert!(make_supervised(&values, 5).is_empty());
    }

    #[test]
    fn enough_rows_threshold() {
        let values: Vec<f64> = (0..23).map(f64::from).collect();
        assert!(!make_supervised(&values, 4).has_enough_rows()); // 19 rows
        let values: Vec<f64> = (0..24).map(f64::from).collect();
        assert!(make_supervised(&values, 4).has_enough_rows()); // 20 rows
    }

    #[test]
    fn latest_window_is_most_recent_first() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let window = latest_window(&values, 3).unwrap();
        assert_eq!(window, vec![5.0, 4.0, 3.0]);
    }

    #[test]
    fn latest_window_requires_enough_history() {
        assert!(latest_window(&[1.0, 2.0], 3).is_none());
        assert!(latest_window(&[], 1).is_none());
    }
}
