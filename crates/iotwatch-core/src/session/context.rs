//! The owned session context.
//!
//! # Atomicity
//!
//! The token and identity live in one `Option<SessionCredential>` behind a
//! single `RwLock`. Every mutation (set, clear, identity overwrite) holds the
//! write lock across both the in-memory swap and the durable-storage writes,
//! so concurrent readers observe either the old pair or the new pair, never
//! half of each. Storage keys are likewise written and removed together.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{SessionCredential, SessionState};
use crate::domain::User;
use crate::ports::{MemoryStorage, SessionStorage, StorageError};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the JSON-serialized identity.
pub const USER_KEY: &str = "user";

/// Owner of the process-wide session credential.
pub struct SessionContext {
    current: RwLock<Option<SessionCredential>>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionContext {
    /// Create an anonymous context backed by `storage`.
    ///
    /// Whatever is already in storage is ignored; use [`restore`](Self::restore)
    /// to resume a persisted session.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            current: RwLock::new(None),
            storage,
        }
    }

    /// An anonymous context with in-memory storage.
    pub fn ephemeral() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Resume the session persisted in `storage`.
    ///
    /// The session is resumed only when both keys are present and the
    /// identity parses. Any other combination is treated as not
    /// authenticated and both keys are removed.
    pub fn restore(storage: Arc<dyn SessionStorage>) -> Self {
        let context = Self::new(storage);
        match context.load_persisted() {
            Ok(Some(credential)) => {
                tracing::debug!(user = %credential.user().username, "Restored persisted session");
                *context.write() = Some(credential);
            }
            Ok(None) => {
                context.remove_persisted();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable persisted session");
                context.remove_persisted();
            }
        }
        context
    }

    /// Establish a session (login, registration).
    ///
    /// Token and identity are persisted together. If persisting fails, both
    /// keys are removed, the context becomes anonymous and the error is
    /// returned.
    pub fn set_session(&self, credential: SessionCredential) -> Result<(), StorageError> {
        let user_json = serialize_user(credential.user())?;
        let mut current = self.write();

        let persisted = self
            .storage
            .set_item(TOKEN_KEY, credential.token())
            .and_then(|()| self.storage.set_item(USER_KEY, &user_json));

        if let Err(e) = persisted {
            *current = None;
            self.remove_persisted();
            return Err(e);
        }

        tracing::info!(user = %credential.user().username, "Session established");
        *current = Some(credential);
        Ok(())
    }

    /// Destroy the session (logout, expiry).
    ///
    /// Returns `true` if a session was present. Clearing an anonymous
    /// context is a no-op that returns `false`.
    pub fn clear_session(&self) -> bool {
        let mut current = self.write();
        let previous = current.take();
        self.remove_persisted();

        if let Some(credential) = &previous {
            tracing::info!(user = %credential.user().username, "Session cleared");
        }
        previous.is_some()
    }

    /// Overwrite the identity of the current session (profile refresh).
    ///
    /// Returns `false` without touching storage when no session is active.
    pub fn update_user(&self, user: User) -> Result<bool, StorageError> {
        let user_json = serialize_user(&user)?;
        let mut current = self.write();
        let Some(credential) = current.as_mut() else {
            return Ok(false);
        };
        self.storage.set_item(USER_KEY, &user_json)?;
        credential.replace_user(user);
        Ok(true)
    }

    /// Swap the bearer token of the current session (token refresh).
    ///
    /// The identity is kept. Returns `false` without touching storage when no
    /// session is active.
    pub fn replace_token(&self, token: &str) -> Result<bool, StorageError> {
        let mut current = self.write();
        let Some(credential) = current.as_mut() else {
            return Ok(false);
        };
        self.storage.set_item(TOKEN_KEY, token)?;
        credential.replace_token(token.to_string());
        tracing::debug!(user = %credential.user().username, "Session token refreshed");
        Ok(true)
    }

    /// The bearer token, if authenticated.
    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|c| c.token().to_string())
    }

    /// The identity, if authenticated.
    pub fn user(&self) -> Option<User> {
        self.read().as_ref().map(|c| c.user().clone())
    }

    /// A consistent snapshot of token and identity.
    pub fn credential(&self) -> Option<SessionCredential> {
        self.read().clone()
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        if self.read().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    /// Shorthand for `state().is_authenticated()`.
    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    fn load_persisted(&self) -> Result<Option<SessionCredential>, StorageError> {
        let token = self.storage.get_item(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let user = self.storage.get_item(USER_KEY)?;
        let (Some(token), Some(user_json)) = (token, user) else {
            return Ok(None);
        };
        let user: User =
            serde_json::from_str(&user_json).map_err(|e| StorageError::Corrupt {
                reason: format!("stored user is not valid JSON: {e}"),
            })?;
        Ok(Some(SessionCredential::new(token, user)))
    }

    fn remove_persisted(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                tracing::warn!(key, error = %e, "Failed to remove persisted session key");
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<SessionCredential>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<SessionCredential>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("current", &*self.read())
            .finish_non_exhaustive()
    }
}

fn serialize_user(user: &User) -> Result<String, StorageError> {
    serde_json::to_string(user).map_err(|e| StorageError::Corrupt {
        reason: format!("cannot serialize user: {e}"),
    })
}
