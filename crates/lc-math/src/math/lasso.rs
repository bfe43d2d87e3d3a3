//! L1-regularized linear regression via cyclic coordinate descent.
//!
//! Minimizes `(1/2n) * ||y - Xw - b||^2 + alpha * ||w||_1` with
//! soft-thresholding updates. Features are expected to be standardized
//! by the caller; the intercept is handled by centering internally.
//!
//! The solver is fully deterministic for fixed input: coordinates are
//! visited in index order and there is no randomization. Convergence
//! failure inside the iteration cap is not an error; the best available
//! coefficients are returned with `converged = false`.

use serde::{Deserialize, Serialize};

/// Hyperparameters for one fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lasso {
    /// Regularization strength (sklearn-style alpha).
    pub alpha: f64,
    /// Coordinate descent sweep cap.
    pub max_iter: usize,
    /// Stop when the largest coefficient change in a sweep falls below this.
    pub tol: f64,
}

impl Default for Lasso {
    fn default() -> Self {
        Self {
            alpha: 0.0005,
            max_iter: 5000,
            tol: 1e-6,
        }
    }
}

/// Fitted coefficients for one iteration of the loop. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LassoModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Sweeps actually used.
    pub iterations: usize,
    pub converged: bool,
}

impl LassoModel {
    pub fn predict(&self, features: &[f64]) -> f64 {
        debug_assert_eq!(features.len(), self.coefficients.len());
        self.intercept
            + features
                .iter()
                .zip(self.coefficients.iter())
                .map(|(x, w)| x * w)
                .sum::<f64>()
    }
}

fn soft_threshold(rho: f64, lambda: f64) -> f64 {
    if rho > lambda {
        rho - lambda
    } else if rho < -lambda {
        rho + lambda
    } else {
        0.0
    }
}

impl Lasso {
    /// Fit on `x` (row-major feature matrix) and `y` (targets).
    ///
    /// Rows of `x` must all share the same width and `x.len() == y.len()`.
    /// An empty matrix yields the zero model with intercept 0.
    pub fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> LassoModel {
        let n = x.len();
        let width = x.first().map_or(0, Vec::len);
        if n == 0 || width == 0 {
            return LassoModel {
                coefficients: vec![0.0; width],
                intercept: if y.is_empty() {
                    0.0
                } else {
                    y.iter().sum::<f64>() / y.len() as f64
                },
                iterations: 0,
                converged: true,
            };
        }

        // Center columns and targets so the intercept drops out of the
        // coordinate updates.
        let col_means: Vec<f64> = (0..width)
            .map(|j| x.iter().map(|r| r[j]).sum::<f64>() / n as f64)
            .collect();
        let y_mean = y.iter().sum::<f64>() / n as f64;

        // Column-major centered copy; coordinate descent touches one
        // column at a time.
        let cols: Vec<Vec<f64>> = (0..width)
            .map(|j| x.iter().map(|r| r[j] - col_means[j]).collect())
            .collect();
        let yc: Vec<f64> = y.iter().map(|v| v - y_mean).collect();

        let col_sq: Vec<f64> = cols
            .iter()
            .map(|c| c.iter().map(|v| v * v).sum::<f64>())
            .collect();
        let lambda = self.alpha * n as f64;

        let mut w = vec![0.0; width];
        let mut residual = yc.clone();
        let mut iterations = 0;
        let mut converged = false;

        for sweep in 0..self.max_iter {
            iterations = sweep + 1;
            let mut max_delta = 0.0f64;
            for j in 0..width {
                if col_sq[j] == 0.0 {
                    continue; // constant column carries no signal
                }
                let old = w[j];
                // rho = x_j . (residual + x_j * w_j)
                let mut rho = 0.0;
                for (xi, ri) in cols[j].iter().zip(residual.iter()) {
                    rho += xi * (ri + xi * old);
                }
                let new = soft_threshold(rho, lambda) / col_sq[j];
                if new != old {
                    let delta = new - old;
                    for (ri, xi) in residual.iter_mut().zip(cols[j].iter()) {
                        *ri -= delta * xi;
                    }
                    w[j] = new;
                    max_delta = max_delta.max(delta.abs());
                }
            }
            if max_delta < self.tol {
                converged = true;
                break;
            }
        }

        let intercept = y_mean
            - w.iter()
                .zip(col_means.iter())
                .map(|(wj, mj)| wj * mj)
                .sum::<f64>();

        LassoModel {
            coefficients: w,
            intercept,
            iterations,
            converged,
        }
    }
}
