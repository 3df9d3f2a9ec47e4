//! Gateway error types.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by the inventory and payment gateways.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The catalog has no parts matching the filter.
    #[error("No parts found")]
    PartsNotFound,

    /// The remote call did not complete in time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The remote service could not be reached.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The remote service answered with a non-success status.
    #[error("Remote service rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The remote response could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Returns true if repeating the same call may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Timeout(_) | GatewayError::Unavailable(_) => true,
            GatewayError::Rejected { status, .. } => *status >= 500,
            GatewayError::PartsNotFound | GatewayError::Decode(_) => false,
        }
    }
}
