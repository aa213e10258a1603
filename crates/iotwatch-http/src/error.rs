//! Internal error types for the transport layer.
//!
//! These never reach callers directly; the classify step maps them to
//! [`ApiError`](iotwatch_core::ApiError) at the boundary.

use std::time::Duration;

use iotwatch_core::ErrorKind;
use thiserror::Error;

/// Failures that happen before a response status is available.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No response arrived within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The connection could not be established.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Network or HTTP client error after the connection was made.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Base URL and path do not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request body or query could not be encoded.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// The caller-facing classification of this failure.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout(_) | Self::Connect(_) | Self::Network(_) => {
                ErrorKind::ConnectivityFailure
            }
            Self::InvalidUrl(_) | Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }
}
