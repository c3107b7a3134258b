// src/fetch/fetch_error.rs

use thiserror::Error;

/// Failures at the HTTP boundary of the fetch service.
///
/// Cancellation is its own variant so callers can tell an intentional
/// abort apart from a genuine network or server failure and suppress the
/// error display for it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("invalid base url: {0}")]
    BaseUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to fetch properties: {0}")]
    Status(String),
    #[error("failed to decode property response: {0}")]
    Decode(String),
    #[error("request cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}
