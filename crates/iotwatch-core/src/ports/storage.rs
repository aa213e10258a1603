//! Durable key-value storage for the session credential.
//!
//! Modelled on browser `localStorage`: string keys, string values, and
//! synchronous access. The session context is the only writer.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing medium could not be read or written.
    #[error("Session storage I/O failed: {reason}")]
    Io {
        /// Underlying failure description
        reason: String,
    },

    /// Persisted data exists but cannot be understood.
    #[error("Session storage is corrupt: {reason}")]
    Corrupt {
        /// What was wrong with the stored data
        reason: String,
    },
}

/// Durable string storage keyed by name.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage: Send + Sync {
    /// Read a value, `None` if the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
