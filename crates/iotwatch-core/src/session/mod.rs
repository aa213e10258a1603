//! Session credential and its owning context.
//!
//! The session is the only process-wide mutable state in the client. It is
//! owned by a [`SessionContext`] that is injected into the transport client;
//! nothing else holds the token.

mod context;
mod credential;

pub use context::{SessionContext, TOKEN_KEY, USER_KEY};
pub use credential::SessionCredential;

/// Session validity as observed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No credential.
    Anonymous,
    /// Token and identity both present.
    Authenticated,
}

impl SessionState {
    /// Whether requests will carry a bearer token.
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}
