//! Numerical building blocks for the forecaster.
//!
//! Everything here is deterministic for fixed input: the iteration loop
//! refits from scratch every tick, so reproducibility of a single fit is
//! what makes the loop testable.

pub mod lasso;
pub mod scaler;
