//! Snapshot persistence — an injectable key-value capability plus the
//! fixed-key layout save/load/clear operations.
//!
//! DESIGN
//! ======
//! The store is a capability (`get`/`set`/`delete`) so tests run against an
//! in-memory double and production runs against one file per key under a
//! data directory. The cell collection is persisted under a single fixed
//! key; saving overwrites the prior snapshot unconditionally.
//!
//! ERROR HANDLING
//! ==============
//! A malformed persisted snapshot is treated as absent: `load_layout` logs
//! a warning and returns `None`. Dropping a corrupt snapshot beats refusing
//! to start the editor.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

use crate::cell::Cell;

/// Fixed key the cell collection is persisted under.
pub const STORAGE_KEY: &str = "production-cells";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("layout snapshot could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    /// Grepable code for structured error bodies.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "E_STORAGE",
            Self::Serialize(_) => "E_STORAGE_ENCODE",
        }
    }
}

/// Key-value persistence capability.
///
/// `get` returns `None` for a missing key; `delete` of a missing key
/// succeeds. Implementations are shared behind `Arc` and must tolerate
/// concurrent calls.
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `Io` when the backing medium fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, overwriting any prior value.
    ///
    /// # Errors
    ///
    /// Returns `Io` when the backing medium fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `Io` when the backing medium fails.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// FILE STORE
// =============================================================================

/// One file per key under a data directory. The directory is created on
/// first write, so a fresh install needs no setup step.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn io_err(key: &str, source: io::Error) -> StorageError {
        StorageError::Io { key: key.to_string(), source }
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_err(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_err(key, e))?;
        fs::write(self.path_for(key), value).map_err(|e| Self::io_err(key, e))
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_err(key, e)),
        }
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Mutex-guarded map behind the same capability. The test double, also
/// handy for ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

// =============================================================================
// LAYOUT SNAPSHOTS
// =============================================================================

/// Persist the full cell collection, overwriting any prior snapshot.
///
/// # Errors
///
/// Returns `Serialize` if the collection cannot be encoded and `Io` if the
/// store rejects the write.
pub fn save_layout(store: &dyn KvStore, cells: &[Cell]) -> Result<(), StorageError> {
    let text = serde_json::to_string(cells)?;
    store.set(STORAGE_KEY, &text)
}

/// Previously saved collection, or `None` when nothing was ever saved.
///
/// An unreadable or malformed snapshot also loads as `None`; the detail
/// goes to the log, not the caller.
pub fn load_layout(store: &dyn KvStore) -> Option<Vec<Cell>> {
    let text = match store.get(STORAGE_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "layout snapshot unreadable; starting empty");
            return None;
        }
    };

    match serde_json::from_str(&text) {
        Ok(cells) => Some(cells),
        Err(e) => {
            warn!(error = %e, "layout snapshot malformed; starting empty");
            None
        }
    }
}

/// Remove the persisted collection. Idempotent.
///
/// # Errors
///
/// Returns `Io` if the store rejects the removal.
pub fn clear_layout(store: &dyn KvStore) -> Result<(), StorageError> {
    store.delete(STORAGE_KEY)
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
