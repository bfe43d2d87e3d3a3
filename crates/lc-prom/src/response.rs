//! Wire schema for the Prometheus HTTP API (v1).
//!
//! Only the fields the forecaster reads are modeled. Sample values come
//! over the wire as `[unix_seconds, "value"]` pairs with the value as a
//! string, so parsing to `f64` happens here, not in serde.

use serde::Deserialize;
use std::collections::HashMap;

use crate::error::PromError;

/// One flattened sample from a range query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Unix timestamp, seconds (Prometheus uses fractional seconds).
    pub unix_secs: f64,
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<QueryData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryData {
    #[serde(rename = "resultType", default)]
    #[allow(dead_code)]
    pub result_type: String,
    #[serde(default)]
    pub result: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryResult {
    #[serde(default)]
    #[allow(dead_code)]
    pub metric: HashMap<String, String>,
    /// Present on instant queries.
    #[serde(default)]
    pub value: Option<(f64, String)>,
    /// Present on range queries.
    #[serde(default)]
    pub values: Option<Vec<(f64, String)>>,
}

impl ApiResponse {
    /// Unwrap the payload, turning API-level failure into an error.
    pub(crate) fn into_data(self) -> Result<QueryData, PromError> {
        if self.status != "success" {
            return Err(PromError::QueryFailed {
                status: self.status,
                detail: self.error.unwrap_or_default(),
            });
        }
        self.data
            .ok_or_else(|| PromError::Malformed("success response without data".into()))
    }
}

pub(crate) fn parse_value(raw: &(f64, String)) -> Result<f64, PromError> {
    raw.1.parse::<f64>().map_err(|_| PromError::BadSample {
        value: raw.1.clone(),
    })
}

/// Parse an instant-query response body down to its single scalar.
pub fn parse_instant(body: &str) -> Result<Option<f64>, PromError> {
    let resp: ApiResponse =
        serde_json::from_str(body).map_err(|e| PromError::Malformed(e.to_string()))?;
    first_scalar(resp.into_data()?)
}

/// Parse a range-query response body to a flattened point list.
pub fn parse_range(body: &str) -> Result<Vec<Point>, PromError> {
    let resp: ApiResponse =
        serde_json::from_str(body).map_err(|e| PromError::Malformed(e.to_string()))?;
    flatten_range(resp.into_data()?)
}

/// Flatten every result vector of a range query into one point list.
/// Order is whatever Prometheus returned; the caller sorts.
pub(crate) fn flatten_range(data: QueryData) -> Result<Vec<Point>, PromError> {
    let mut points = Vec::new();
    for result in data.result {
        for raw in result.values.unwrap_or_default() {
            points.push(Point {
                unix_secs: raw.0,
                value: parse_value(&raw)?,
            });
        }
    }
    Ok(points)
}

/// First scalar of an instant query, `None` when the result set is empty.
pub(crate) fn first_scalar(data: QueryData) -> Result<Option<f64>, PromError> {
    match data.result.into_iter().next().and_then(|r| r.value) {
        Some(raw) => Ok(Some(parse_value(&raw)?)),
        None => Ok(None),
    }
}
