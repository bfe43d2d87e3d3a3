//! Per-feature standardization (zero mean, unit variance).

use serde::{Deserialize, Serialize};

/// Per-feature mean and standard deviation, fit once over a feature
/// matrix and reused to transform further rows with the same statistics.
///
/// A zero-variance feature keeps a scale of 1.0 so the transform stays
/// defined (the centered value is 0 either way).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Fit mean/std per column over `rows`. All rows must share the same
    /// width; an empty matrix yields an empty scaler.
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let n = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if n == 0 {
            return Self {
                means: Vec::new(),
                stds: Vec::new(),
            };
        }

        let mut means = vec![0.0; width];
        for row in rows {
            for (j, v) in row.iter().enumerate() {
                means[j] += v;
            }
        }
        for m in &mut means {
            *m /= n as f64;
        }

        let mut stds = vec![0.0; width];
        for row in rows {
            for (j, v) in row.iter().enumerate() {
                let d = v - means[j];
                stds[j] += d * d;
            }
        }
        for (j, s) in stds.iter_mut().enumerate() {
            let sd = (*s / n as f64).sqrt();
            // A constant column accumulates ~1e-17-scale variance from
            // mean roundoff; treat anything that small as zero so the
            // scale stays at the identity instead of exploding.
            let tol = 1e-12 * means[j].abs().max(1.0);
            *s = if sd > tol { sd } else { 1.0 };
        }

        Self { means, stds }
    }

    /// Number of features this scaler was fit on.
    pub fn width(&self) -> usize {
        self.means.len()
    }

    /// Transform a single row in place-free fashion.
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(self.stds.iter()))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }

    /// Transform a whole matrix with the fitted statistics.
    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|r| self.transform_row(r)).collect()
    }
}
