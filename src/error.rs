use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure modes of a probe run against a GoCD server pair.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("The event did not occur - {label}. Wait timed out")]
    TimeoutExceeded { label: String, waited: Duration },

    #[error("{0}")]
    PipelineFailed(String),

    /// An HTTP status the probe does not accept; aborts the poll.
    #[error("{url} returned {status}")]
    UnexpectedStatus { url: String, status: StatusCode },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProbeError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProbeError::TimeoutExceeded { .. })
    }
}
