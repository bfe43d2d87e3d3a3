//! HTTP client and the `SeriesSource` contract.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::debug;

use crate::error::PromError;
use crate::response::{parse_instant, parse_range, Point};

/// Instant queries answer a single scalar; keep the bound tight.
pub const INSTANT_TIMEOUT: Duration = Duration::from_secs(30);
/// Range queries carry more data and may hit cold chunks.
pub const RANGE_TIMEOUT: Duration = Duration::from_secs(45);

/// The metric-store operations the forecasting loop consumes.
///
/// The loop is generic over this trait so iteration logic can be tested
/// against an in-memory source without a Prometheus instance.
pub trait SeriesSource {
    /// Evaluate `expr` now; `None` when the result set is empty.
    fn instant_query(&self, expr: &str) -> Result<Option<f64>, PromError>;

    /// Evaluate `expr` over `[start, end]` at `step_secs` resolution,
    /// flattened to (timestamp, value) points in server order.
    fn range_query(
        &self,
        expr: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step_secs: u64,
    ) -> Result<Vec<Point>, PromError>;
}

/// Blocking client for the Prometheus HTTP API.
#[derive(Clone)]
pub struct PromClient {
    base_url: String,
    agent: ureq::Agent,
}

impl PromClient {
    /// `base_url` without a trailing slash, e.g. `http://prom:9090`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl SeriesSource for PromClient {
    fn instant_query(&self, expr: &str) -> Result<Option<f64>, PromError> {
        debug!(query = %expr, "prometheus instant query");
        let body = self
            .agent
            .get(&format!("{}/api/v1/query", self.base_url))
            .query("query", expr)
            .timeout(INSTANT_TIMEOUT)
            .call()?
            .into_string()?;
        parse_instant(&body)
    }

    fn range_query(
        &self,
        expr: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step_secs: u64,
    ) -> Result<Vec<Point>, PromError> {
        debug!(
            query = %expr,
            start = %start,
            end = %end,
            step_secs,
            "prometheus range query"
        );
        let body = self
            .agent
            .get(&format!("{}/api/v1/query_range", self.base_url))
            .query("query", expr)
            .query("start", &start.timestamp().to_string())
            .query("end", &end.timestamp().to_string())
            .query("step", &format!("{}s", step_secs))
            .timeout(RANGE_TIMEOUT)
            .call()?
            .into_string()?;
        parse_range(&body)
    }
}
