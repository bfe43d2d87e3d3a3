//! Error type for Prometheus API calls.

use thiserror::Error;

/// Failure modes of a single query. All of these are recoverable from
/// the loop's point of view: skip the iteration and retry next tick.
#[derive(Error, Debug)]
pub enum PromError {
    /// Socket / TLS / timeout / non-2xx response.
    #[error("prometheus transport error: {0}")]
    Transport(#[from] Box<ureq::Error>),

    /// HTTP succeeded but the API reported a non-success status field.
    #[error("prometheus query failed with status {status}: {detail}")]
    QueryFailed { status: String, detail: String },

    /// Body did not match the expected response schema.
    #[error("malformed prometheus payload: {0}")]
    Malformed(String),

    /// A sample value string did not parse as a float.
    #[error("unparseable sample value {value:?}")]
    BadSample { value: String },
}

impl From<ureq::Error> for PromError {
    fn from(e: ureq::Error) -> Self {
        PromError::Transport(Box::new(e))
    }
}

impl From<std::io::Error> for PromError {
    fn from(e: std::io::Error) -> Self {
        PromError::Malformed(e.to_string())
    }
}
