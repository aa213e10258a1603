#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
pub mod pipeline;
mod request;
mod retry;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultTransportClient, TransportClient};
pub use request::ApiRequest;

// Configuration
pub use config::{
    BASE_URL_ENV, ClientBuildError, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, TIMEOUT_ENV,
};

// Backend seam
pub use error::TransportError;
pub use http::{HttpBackend, HttpMethod, OutboundRequest, RawResponse, ReqwestBackend};

#[cfg(any(test, feature = "test-utils"))]
pub use http::testing;

// Retry helper
pub use retry::{RetryPolicy, retry};

// Silence unused dev-dependency warnings
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio_test as _;
