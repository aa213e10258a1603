//! Error taxonomy for calls against the platform API.
//!
//! Every failure a caller can observe from the transport client is an
//! [`ApiError`]: a [`ErrorKind`] plus the human-readable message that was
//! shown to the user. Transport-level failures and business failures
//! (`success: false` envelopes) share this one type so callers handle them
//! identically.

use thiserror::Error;

/// Classification of a failed API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The server answered 401; the local session has been destroyed.
    AuthenticationExpired,
    /// The server answered 403.
    PermissionDenied,
    /// The server answered 404.
    NotFound,
    /// The server answered with a 5xx status.
    ServerError,
    /// No response was received (connect failure, reset, or timeout).
    ConnectivityFailure,
    /// A 2xx response carried an envelope with `success: false`.
    BusinessFailure,
    /// Any other non-2xx status.
    RequestError,
    /// The request could not be built (bad URL, unencodable body).
    InvalidRequest,
    /// A 2xx response body could not be decoded into the expected type.
    InvalidResponse,
    /// The session could not be written to durable storage.
    StorageFailure,
}

impl ErrorKind {
    /// Message shown when the server did not supply one.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::AuthenticationExpired => "Your session has expired, please sign in again",
            Self::PermissionDenied => "You do not have permission to access this resource",
            Self::NotFound => "The requested resource does not exist",
            Self::ServerError => "Internal server error",
            Self::ConnectivityFailure => {
                "Network connection failed, please check your network settings"
            }
            Self::BusinessFailure | Self::RequestError => "Request failed",
            Self::InvalidRequest => "Request configuration error",
            Self::InvalidResponse => "Unexpected response from server",
            Self::StorageFailure => "Could not save the session locally",
        }
    }

    /// Classify a non-2xx HTTP status.
    ///
    /// Returns `None` for 2xx statuses, which are not failures at this level.
    pub const fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(Self::AuthenticationExpired),
            403 => Some(Self::PermissionDenied),
            404 => Some(Self::NotFound),
            500..=599 => Some(Self::ServerError),
            _ => Some(Self::RequestError),
        }
    }

    /// Whether a retry has a reasonable chance of succeeding.
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::ConnectivityFailure | Self::ServerError)
    }

    /// Stable identifier used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthenticationExpired => "authentication_expired",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::ServerError => "server_error",
            Self::ConnectivityFailure => "connectivity_failure",
            Self::BusinessFailure => "business_failure",
            Self::RequestError => "request_error",
            Self::InvalidRequest => "invalid_request",
            Self::InvalidResponse => "invalid_response",
            Self::StorageFailure => "storage_failure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected API call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
}

impl ApiError {
    /// Build an error, falling back to the kind's default message when the
    /// server did not provide a usable one.
    pub fn new(kind: ErrorKind, server_message: Option<String>) -> Self {
        let message = server_message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| kind.default_message().to_string());
        Self {
            kind,
            message,
            status: None,
        }
    }

    /// Attach the HTTP status the error was derived from.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Error classification.
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Message surfaced to the user.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, when a response was received.
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Shorthand for `kind() == AuthenticationExpired`.
    pub fn is_auth_expired(&self) -> bool {
        self.kind == ErrorKind::AuthenticationExpired
    }
}

/// Result type alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ErrorKind::from_status(200), None);
        assert_eq!(ErrorKind::from_status(204), None);
        assert_eq!(
            ErrorKind::from_status(401),
            Some(ErrorKind::AuthenticationExpired)
        );
        assert_eq!(
            ErrorKind::from_status(403),
            Some(ErrorKind::PermissionDenied)
        );
        assert_eq!(ErrorKind::from_status(404), Some(ErrorKind::NotFound));
        assert_eq!(ErrorKind::from_status(500), Some(ErrorKind::ServerError));
        assert_eq!(ErrorKind::from_status(503), Some(ErrorKind::ServerError));
        assert_eq!(ErrorKind::from_status(400), Some(ErrorKind::RequestError));
        assert_eq!(ErrorKind::from_status(422), Some(ErrorKind::RequestError));
        assert_eq!(ErrorKind::from_status(302), Some(ErrorKind::RequestError));
    }

    #[test]
    fn test_server_message_takes_priority() {
        let err = ApiError::new(ErrorKind::RequestError, Some("bad field".to_string()));
        assert_eq!(err.message(), "bad field");
        assert_eq!(err.to_string(), "bad field");
    }

    #[test]
    fn test_blank_server_message_falls_back_to_default() {
        let err = ApiError::new(ErrorKind::NotFound, Some("   ".to_string()));
        assert_eq!(err.message(), ErrorKind::NotFound.default_message());

        let err = ApiError::new(ErrorKind::ServerError, None);
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn test_with_status() {
        let err = ApiError::new(ErrorKind::PermissionDenied, None).with_status(403);
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(!err.is_auth_expired());
    }

    #[test]
    fn test_transient_kinds() {
        assert!(ErrorKind::ConnectivityFailure.is_transient());
        assert!(ErrorKind::ServerError.is_transient());
        assert!(!ErrorKind::AuthenticationExpired.is_transient());
        assert!(!ErrorKind::BusinessFailure.is_transient());
        assert!(!ErrorKind::NotFound.is_transient());
    }
}
