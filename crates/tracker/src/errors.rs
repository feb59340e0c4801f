//! Adapter errors and their mapping onto the domain's per-item error.

use std::time::Duration;

use thiserror::Error;
use workitems::CreateItemError;

/// Failures talking to the tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The request never produced a response (DNS, TLS, connection, timeout)
    /// or the response body could not be read.
    #[error("tracker request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The tracker answered with a non-success status.
    #[error("tracker returned {status}: {message}")]
    Api {
        status: u16,
        message: String,
        /// Parsed `Retry-After` header, if any.
        retry_after: Option<Duration>,
    },

    /// The tracker answered successfully but with a body this adapter cannot use.
    #[error("unexpected tracker response: {0}")]
    UnexpectedResponse(String),

    /// The adapter was configured with an unusable value.
    #[error("invalid tracker configuration: {0}")]
    Configuration(String),
}

impl TrackerError {
    /// Returns `true` when the same request may succeed later.
    pub fn is_retryable(&self) -> bool {
        match self {
            TrackerError::Http(error) => error.is_timeout() || error.is_connect(),
            TrackerError::Api { status, .. } => *status == 429 || *status >= 500,
            TrackerError::UnexpectedResponse(_) | TrackerError::Configuration(_) => false,
        }
    }
}

impl From<TrackerError> for CreateItemError {
    fn from(error: TrackerError) -> Self {
        let retry_after = match &error {
            TrackerError::Api { retry_after, .. } => *retry_after,
            _ => None,
        };
        if error.is_retryable() {
            CreateItemError::retryable(error.to_string(), retry_after)
        } else {
            CreateItemError::new(error.to_string())
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
