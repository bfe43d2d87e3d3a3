//! Blocking Prometheus HTTP API client.
//!
//! Wraps the two query shapes the forecaster consumes:
//!
//! - instant queries (`/api/v1/query`) for slow-moving scalars such as a
//!   configured CPU limit, and
//! - range queries (`/api/v1/query_range`) for usage history.
//!
//! Both calls are synchronous with bounded timeouts. Any transport
//! failure, non-`success` status field, or payload the schema does not
//! fit surfaces as [`PromError`]; the caller decides whether that aborts
//! its current iteration. An *empty* result set is not an error — it is
//! modeled as `None` / an empty point list.

pub mod client;
pub mod error;
pub mod response;

pub use client::{PromClient, SeriesSource, INSTANT_TIMEOUT, RANGE_TIMEOUT};
pub use error::PromError;
pub use response::{parse_instant, parse_range, Point};
