//! File-backed session storage.
//!
//! Keys and values live in one small JSON object on disk. Each `set_item` or
//! `remove_item` replaces the whole file through a temporary sibling and a
//! rename, so a single write is never seen half done. A session spans two
//! writes (token, then user); a crash between them leaves a token without a
//! user, which restores as anonymous. The file is removed once it holds no
//! keys.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use iotwatch_core::{SessionStorage, StorageError};
use serde_json::{Map, Value};

/// [`SessionStorage`] persisted to a JSON file.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(io_error(&self.path, &e)),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StorageError::Corrupt {
                reason: format!("{} does not hold a JSON object", self.path.display()),
            }),
            Err(e) => Err(StorageError::Corrupt {
                reason: format!("{}: {e}", self.path.display()),
            }),
        }
    }

    fn store(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        if map.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(io_error(&self.path, &e)),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, &e))?;
        }

        let text = serde_json::to_string_pretty(map).map_err(|e| StorageError::Corrupt {
            reason: e.to_string(),
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| io_error(&tmp, &e))?;
        restrict_permissions(&tmp);
        fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, &e))
    }

    /// Drop a file that cannot be parsed so the next write starts clean.
    fn load_or_reset(&self) -> Result<Map<String, Value>, StorageError> {
        match self.load() {
            Err(StorageError::Corrupt { reason }) => {
                tracing::warn!(%reason, "Replacing unreadable session file");
                Ok(Map::new())
            }
            other => other,
        }
    }
}

impl SessionStorage for JsonFileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let map = self.load()?;
        Ok(map.get(key).and_then(Value::as_str).map(ToString::to_string))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.load_or_reset()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.store(&map)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.load_or_reset()?;
        if map.remove(key).is_none() && self.path.exists() && !map.is_empty() {
            return Ok(());
        }
        self.store(&map)
    }
}

fn io_error(path: &Path, e: &io::Error) -> StorageError {
    StorageError::Io {
        reason: format!("{}: {e}", path.display()),
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        tracing::debug!(
            path = %path.display(),
            error = %e,
            "Could not restrict session file permissions"
        );
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}
