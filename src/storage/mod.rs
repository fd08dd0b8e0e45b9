//! Durable key-value storage for workspace state.
//!
//! The store holds one serialized JSON blob per namespaced key (the saved
//! item tree under one key, the recent-request list under another). Each
//! `get`/`set` call is atomic on its own; there are no transactions across
//! calls, and concurrent writers from other processes may lose updates
//! (last write wins).

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Errors raised by a durable store.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying I/O failure (missing directory, permissions, full disk).
    Io(std::io::Error),

    /// A value could not be serialized for storage.
    Serialize(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "Storage I/O error: {}", err),
            StorageError::Serialize(msg) => write!(f, "Storage serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::Serialize(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialize(err.to_string())
    }
}

/// Workspace-scoped durable key-value storage.
///
/// An absent key is not an error: `get` returns `Ok(None)` and callers
/// default to an empty collection.
pub trait DurableStore {
    /// Reads the blob stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the blob stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store persisting one JSON file per key.
///
/// Writes go to a temporary file first and are moved into place with an
/// atomic rename, so a crash mid-write leaves the previous blob intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store under the default per-user config directory.
    ///
    /// Resolves to `~/.config/api-preview` on Unix-like systems, or the
    /// roaming AppData equivalent on Windows, creating the directory if
    /// needed.
    pub fn new() -> Result<Self, StorageError> {
        Self::with_dir(default_storage_dir()?)
    }

    /// Creates a store rooted at an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        let mut temp_file = fs::File::create(&temp_path)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;
        drop(temp_file);

        // Atomically replace the old blob with the new one.
        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

/// Resolves the default storage directory.
///
/// Mirrors the usual per-user config location: `$HOME/.config` on Unix-like
/// systems, `%USERPROFILE%\AppData\Roaming` on Windows.
fn default_storage_dir() -> Result<PathBuf, StorageError> {
    let config_dir = if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config")
    } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
        PathBuf::from(user_profile).join("AppData").join("Roaming")
    } else {
        return Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        )));
    };

    Ok(config_dir.join("api-preview"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("key", "[1,2,3]").unwrap();
        assert_eq!(store.get("key").unwrap().unwrap(), "[1,2,3]");

        store.set("key", "[]").unwrap();
        assert_eq!(store.get("key").unwrap().unwrap(), "[]");
    }

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::with_dir(temp_dir.path()).unwrap();

        assert_eq!(store.get("app.items").unwrap(), None);

        store.set("app.items", r#"[{"kind":"folder"}]"#).unwrap();
        assert_eq!(
            store.get("app.items").unwrap().unwrap(),
            r#"[{"kind":"folder"}]"#
        );
    }

    #[test]
    fn test_file_store_overwrite_is_atomic_rename() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::with_dir(temp_dir.path()).unwrap();

        store.set("blob", "first").unwrap();
        store.set("blob", "second").unwrap();

        assert_eq!(store.get("blob").unwrap().unwrap(), "second");
        // No temp file left behind after the rename.
        assert!(!temp_dir.path().join("blob.json.tmp").exists());
    }

    #[test]
    fn test_file_store_keys_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::with_dir(temp_dir.path()).unwrap();

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        assert_eq!(store.get("a").unwrap().unwrap(), "1");
        assert_eq!(store.get("b").unwrap().unwrap(), "2");
    }

    #[test]
    fn test_file_store_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("deep").join("nested");

        let store = FileStore::with_dir(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(store.get("anything").unwrap(), None);
    }
}
