//! Hand the request to the backend, bounded by the configured timeout.

use std::time::Duration;

use crate::error::TransportError;
use crate::http::{HttpBackend, OutboundRequest, RawResponse};

/// Execute `request`, failing with [`TransportError::Timeout`] once
/// `timeout` elapses without a response.
pub async fn send<B: HttpBackend + ?Sized>(
    backend: &B,
    request: OutboundRequest,
    timeout: Duration,
) -> Result<RawResponse, TransportError> {
    tracing::debug!(method = %request.method, url = %request.url, "Sending request");
    tokio::time::timeout(timeout, backend.execute(request))
        .await
        .unwrap_or(Err(TransportError::Timeout(timeout)))
}
