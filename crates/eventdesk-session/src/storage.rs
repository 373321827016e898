//! Durable key/value storage behind the session store.
//!
//! The session store doesn't care where its two entries live. It only
//! needs something that can get, set and remove a string under a key,
//! the same contract a browser's `localStorage` offers. That contract
//! is the [`Storage`] trait:
//!
//! - [`MemoryStorage`] keeps entries in a map (tests, throwaway runs).
//! - [`FileStorage`] keeps them in a JSON file so a login survives a
//!   restart.
//!
//! Any other backend (OS keychain, database row) just implements the
//! trait.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::SessionError;

/// String key/value storage.
///
/// All methods are synchronous: storage access happens inside a single
/// turn of the caller and is never awaited. `Send + Sync + 'static`
/// because the store is shared by every task that makes API calls.
pub trait Storage: Send + Sync + 'static {
    /// Reads the value under `key`, `Ok(None)` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

impl<S: Storage> Storage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        S::get(self, key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        S::set(self, key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        S::remove(self, key)
    }
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// Process-local [`Storage`]. Lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

/// [`Storage`] persisted as one JSON object in a file.
///
/// Every write rewrites the whole file: the new contents go to a sibling
/// `.tmp` file first, which is then renamed over the original, so a
/// crash mid-write leaves either the old file or the new one, never half
/// of each. A missing file reads as empty. A file that isn't a JSON
/// object of strings is logged and also read as empty; the next write
/// replaces it.
///
/// The in-process lock serializes read-modify-write cycles. Two
/// processes sharing a file race (last write wins), like two browser
/// tabs sharing `localStorage`.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Uses `path` as the backing file. Nothing is touched until the
    /// first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, SessionError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(HashMap::new());
            }
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(HashMap::new());
        }
        match serde_json::from_str(&text) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "session file is corrupt, treating it as empty"
                );
                Ok(HashMap::new())
            }
        }
    }

    fn write_all(
        &self,
        entries: &HashMap<String, String>,
    ) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let tmp = self.path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock();
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock();
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}
