//! CLI-specific error types and exit code mapping.

use iotwatch_core::{ApiError, ErrorKind};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A rejected API call. Its notice has already been printed.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Argument validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (prompt, session file).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A protected command was run without a session.
    #[error("Not signed in")]
    NotSignedIn,
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// Codes follow sysexits.h where a category fits; argument errors use 2
    /// like clap does.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Api(err) => api_exit_code(err.kind()),
            Self::Arguments(_) => 2,
            Self::Io(_) => 74,     // EX_IOERR
            Self::Config(_) => 78, // EX_CONFIG
            Self::NotSignedIn => 77,
        }
    }

    /// Whether the user has already been told about this failure.
    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}

const fn api_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::AuthenticationExpired | ErrorKind::PermissionDenied => 77, // EX_NOPERM
        ErrorKind::NotFound => 66,                                            // EX_NOINPUT
        ErrorKind::ConnectivityFailure | ErrorKind::ServerError => 69,        // EX_UNAVAILABLE
        ErrorKind::BusinessFailure | ErrorKind::RequestError => 65,           // EX_DATAERR
        ErrorKind::InvalidRequest => 64,                                      // EX_USAGE
        ErrorKind::InvalidResponse => 76,                                     // EX_PROTOCOL
        ErrorKind::StorageFailure => 73,                                      // EX_CANTCREAT
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error surfaced from a handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        cli.exit_code()
    } else if let Some(api) = err.downcast_ref::<ApiError>() {
        api_exit_code(api.kind())
    } else {
        1
    }
}

/// Whether an error surfaced from a handler was already shown as a notice.
pub fn is_reported(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ApiError>().is_some()
        || err.downcast_ref::<CliError>().is_some_and(CliError::is_reported)
}
