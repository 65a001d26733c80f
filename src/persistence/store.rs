//! Key/value blob stores.
//!
//! The engine only needs `load(key)` and `save(key, blob)`. Blobs are opaque
//! strings; every save replaces the previous blob for the key.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::error::{RosterError, RosterResult};

/// Storage contract for persisted blobs.
pub trait KeyValueStore: Send + Sync {
    /// Returns the blob stored under `key`, or `None` if nothing was saved.
    fn load(&self, key: &str) -> RosterResult<Option<String>>;

    /// Replaces the blob stored under `key`.
    fn save(&self, key: &str, blob: &str) -> RosterResult<()>;
}

/// Volatile store kept in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(key: &str) -> RosterError {
    RosterError::Persistence {
        key: key.to_string(),
        message: "store lock poisoned".to_string(),
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> RosterResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned(key))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> RosterResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned(key))?;
        entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// Store that keeps each key in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> RosterResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| RosterError::Persistence {
            key: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    /// Returns the directory the store writes to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> RosterResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RosterError::Persistence {
                key: key.to_string(),
                message: "keys may only contain letters, digits, '-' and '_'".to_string(),
            });
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> RosterResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RosterError::Persistence {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn save(&self, key: &str, blob: &str) -> RosterResult<()> {
        let path = self.path_for(key)?;
        // Write then rename so a crash never leaves a half-written blob.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, blob)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| RosterError::Persistence {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        debug!(key, bytes = blob.len(), "Blob saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load("shifts").unwrap(), None);

        store.save("shifts", "[]").unwrap();
        store.save("shifts", "[1]").unwrap();
        assert_eq!(store.load("shifts").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.load("volunteers").unwrap(), None);
    }

    #[test]
    fn test_file_store_writes_one_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nested")).unwrap();

        store.save("volunteers", "[]").unwrap();
        assert!(store.dir().join("volunteers.json").exists());
        assert!(!store.dir().join("volunteers.json.tmp").exists());
        assert_eq!(store.load("volunteers").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.save("../escape", "x"),
            Err(RosterError::Persistence { .. })
        ));
        assert!(store.load("").is_err());
    }
}
