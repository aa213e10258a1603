//! Turn a backend outcome into a resolved envelope or an [`ApiError`].
//!
//! 401, 403, 404 and 5xx carry fixed messages; any other non-2xx status
//! carries the server's message when it sent one. A 2xx envelope with
//! `success: false` is a business failure carrying the envelope message.

use iotwatch_core::{ApiError, ApiResult, Envelope, ErrorKind, error_message, normalize};

use crate::error::TransportError;
use crate::http::RawResponse;

pub fn classify(outcome: Result<RawResponse, TransportError>) -> ApiResult<Envelope> {
    let response = match outcome {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(error = %e, "No response received");
            return Err(ApiError::new(e.kind(), None));
        }
    };

    if let Some(kind) = ErrorKind::from_status(response.status) {
        let server_message = match kind {
            ErrorKind::RequestError => error_message(response.body.as_ref()),
            _ => None,
        };
        return Err(ApiError::new(kind, server_message).with_status(response.status));
    }

    let envelope = normalize(response.body);
    if !envelope.success {
        let message = envelope.server_message().map(ToString::to_string);
        return Err(ApiError::new(ErrorKind::BusinessFailure, message).with_status(response.status));
    }
    Ok(envelope)
}
