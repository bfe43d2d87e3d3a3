//! Loadcast math primitives.

pub mod math;

pub use math::lasso::{Lasso, LassoModel};
pub use math::scaler::StandardScaler;
