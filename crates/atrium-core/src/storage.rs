//! Durable key-value storage seam.
//!
//! The portal persists small JSON blobs under fixed logical keys (session
//! identity, permission snapshot). Read, write, and remove are the only
//! operations the authorization subsystem performs; everything else about
//! the backing store is a collaborator concern.
//!
//! Two backends are provided:
//! - [`FileStorage`]: one file per key inside a directory
//! - [`MemoryStorage`]: in-process map, for tests and ephemeral contexts

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{Error, Result};

/// Logical key for the active user's id.
pub const KEY_CURRENT_USER: &str = "atrium.user";

/// Logical key for the active profile's id.
pub const KEY_CURRENT_PROFILE: &str = "atrium.profile";

/// Logical key for the cached permission snapshot.
pub const KEY_PERMISSION_SNAPSHOT: &str = "atrium.permissions";

/// String-keyed durable blob storage.
///
/// Implementations must be safe to share behind an `Arc` across the
/// subscriber tasks that read and the sync service that writes. Writes are
/// last-writer-wins; no cross-process coordination is attempted.
pub trait KeyValueStorage: Send + Sync {
    /// Read the blob stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous blob.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the blob under `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

// ============================================================================
// MemoryStorage
// ============================================================================

/// In-memory storage backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().expect("storage lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().expect("storage lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().expect("storage lock poisoned");
        entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// FileStorage
// ============================================================================

/// Filesystem storage backend: one file per logical key.
///
/// Keys map to file names directly, so only the fixed dotted keys used by
/// this subsystem are expected (no path separators).
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a backend rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            std::fs::create_dir_all(&root).map_err(|e| Error::io_with_path(e, &root))?;
        }
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content =
            std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        Ok(Some(content))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|e| Error::io_with_path(e, &path))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }
        std::fs::remove_file(&path).map_err(|e| Error::io_with_path(e, &path))
    }
}

// ============================================================================
// Tests
// ============================================================================
