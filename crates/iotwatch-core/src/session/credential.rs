use std::fmt;

use crate::domain::{AuthPayload, User};

/// A bearer token paired with the identity it was issued for.
///
/// The pair is always stored and replaced as one value, so a reader can
/// never see a token without its identity.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential {
    token: String,
    user: User,
}

impl SessionCredential {
    /// Pair a token with its identity.
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// The opaque bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The identity record.
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub(crate) fn replace_user(&mut self, user: User) {
        self.user = user;
    }

    pub(crate) fn replace_token(&mut self, token: String) {
        self.token = token;
    }
}

impl From<AuthPayload> for SessionCredential {
    fn from(payload: AuthPayload) -> Self {
        Self::new(payload.access_token, payload.user)
    }
}

// Tokens must never reach logs.
impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredential")
            .field("token", &"<redacted>")
            .field("user", &self.user.username)
            .finish()
    }
}
