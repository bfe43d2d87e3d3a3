//! Loadcast core library.
//!
//! One-minute-ahead CPU utilization forecasting:
//! - Pull usage history and the configured CPU limit from Prometheus
//! - Normalize the raw points into a dense uniform-cadence series
//! - Build a lagged supervised dataset and fit a small Lasso model
//! - Publish the clamped one-step forecast as a gauge for scraping
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod daemon;
pub mod exporter;
pub mod features;
pub mod forecast;
pub mod logging;
pub mod publish;
pub mod queries;
pub mod series;
