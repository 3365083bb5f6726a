//! Key-value persistence for quote state.
//!
//! The engine only needs `get`/`set` by string key, so both backends are thin:
//! - `MemoryStore` keeps entries in a `HashMap`; used for tests and offline runs.
//! - `FileStore` keeps one file per key inside a data directory. Writes go to a
//!   temporary sibling file first and are renamed into place, so a reader never
//!   observes a half-written collection.
//!
//! Neither backend locks across processes; the last writer wins.
use log::debug;
use quote_common::{Result, StoreKey};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Persistent string storage addressed by [`StoreKey`].
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was written yet.
    fn get(&self, key: StoreKey) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: StoreKey, value: &str) -> Result<()>;
}

/// In-memory store.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>> {
        let entries = self.entries.lock()?;
        Ok(entries.get(&key).cloned())
    }

    fn set(&self, key: StoreKey, value: &str) -> Result<()> {
        let mut entries = self.entries.lock()?;
        entries.insert(key, value.to_string());
        Ok(())
    }
}

/// Directory-backed store with one file per key.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        debug!("File store opened at {}", dir.display());
        Ok(Self { dir })
    }

    /// Directory holding the store files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: StoreKey) -> PathBuf {
        self.dir.join(key.as_ref())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: StoreKey, value: &str) -> Result<()> {
        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{}.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &target)?;
        debug!("Wrote {} bytes to {}", value.len(), target.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get(StoreKey::Quotes).unwrap(), None);
        store.set(StoreKey::Quotes, "[]").unwrap();
        store.set(StoreKey::LastCategory, "all").unwrap();
        assert_eq!(store.get(StoreKey::Quotes).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(StoreKey::LastCategory).unwrap().as_deref(), Some("all"));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            assert_eq!(store.get(StoreKey::LastCategory).unwrap(), None);
            store.set(StoreKey::LastCategory, "Life").unwrap();
            store.set(StoreKey::LastCategory, "Work").unwrap();
        }
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get(StoreKey::LastCategory).unwrap().as_deref(),
            Some("Work")
        );
        assert!(dir.path().join("lastCategory").is_file());
        assert!(!dir.path().join("lastCategory.tmp").exists());
    }

    #[test]
    fn test_file_store_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        store.set(StoreKey::Quotes, "[]").unwrap();
        assert_eq!(store.dir(), nested.as_path());
        assert!(nested.join("quotes").is_file());
    }
}
