//! Simple key-value storage for persisted JSON blobs
//!
//! Backends:
//! - `LocalStorage` (wasm32, browser LocalStorage)
//! - `FileStorage` (native, one `<key>.json` file per key)
//! - `MemoryStorage` (tests, or when nothing else is available)

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage failures. Never fatal: callers log them and carry on.
#[derive(Debug)]
pub enum StorageError {
    /// No backing store (no window, no data directory, ...)
    Unavailable(String),
    Io(std::io::Error),
    /// Stored data did not parse
    Malformed(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(why) => write!(f, "storage unavailable: {}", why),
            StorageError::Io(e) => write!(f, "storage I/O error: {}", e),
            StorageError::Malformed(e) => write!(f, "malformed stored data: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Unavailable(_) => None,
            StorageError::Io(e) => Some(e),
            StorageError::Malformed(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Malformed(e)
    }
}

/// String key-value store
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Read and parse a JSON value; `Ok(None)` if the key is absent
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.get_item(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Serialize and store a JSON value
pub fn save_json<T: Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)
}

/// In-memory backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    use directories::ProjectDirs;

    use super::{Storage, StorageError};

    /// One `<key>.json` file per key inside a directory
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        dir: PathBuf,
    }

    impl FileStorage {
        /// Use `dir`, creating it if needed
        pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
            let dir = dir.into();
            fs::create_dir_all(&dir)?;
            Ok(Self { dir })
        }

        /// The platform's per-user data directory for this game
        pub fn in_data_dir() -> Result<Self, StorageError> {
            let dirs = ProjectDirs::from("", "", "flappy-fish").ok_or_else(|| {
                StorageError::Unavailable("could not determine data directory".to_string())
            })?;
            Self::new(dirs.data_dir())
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path_for(&self, key: &str) -> PathBuf {
            self.dir.join(format!("{}.json", key))
        }
    }

    impl Storage for FileStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            match fs::read_to_string(self.path_for(key)) {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            // Write-then-rename so a crash never leaves a half-written file
            let path = self.path_for(key);
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, value)?;
            fs::rename(&tmp, &path)?;
            Ok(())
        }

        fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
            match fs::remove_file(self.path_for(key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{Storage, StorageError};

    /// Browser LocalStorage
    pub struct LocalStorage {
        storage: web_sys::Storage,
    }

    impl LocalStorage {
        pub fn open() -> Result<Self, StorageError> {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or_else(|| StorageError::Unavailable("no LocalStorage".to_string()))?;
            Ok(Self { storage })
        }
    }

    fn js_error(e: impl std::fmt::Debug) -> StorageError {
        StorageError::Unavailable(format!("{:?}", e))
    }

    impl Storage for LocalStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.storage.get_item(key).map_err(js_error)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.storage.set_item(key, value).map_err(js_error)
        }

        fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
            self.storage.remove_item(key).map_err(js_error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip_and_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_load_json_reports_malformed() {
        let mut storage = MemoryStorage::new();
        storage.set_item("scores", "{not json").unwrap();
        let result: Result<Option<Vec<u32>>, _> = load_json(&storage, "scores");
        assert!(matches!(result, Err(StorageError::Malformed(_))));
    }

    #[test]
    fn test_load_json_absent_is_none() {
        let storage = MemoryStorage::new();
        let result: Option<Vec<u32>> = load_json(&storage, "missing").unwrap();
        assert!(result.is_none());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_storage_round_trip() {
        let dir = std::env::temp_dir().join(format!("flappy-fish-storage-{}", std::process::id()));
        let mut storage = FileStorage::new(&dir).unwrap();

        assert_eq!(storage.get_item("board").unwrap(), None);
        save_json(&mut storage, "board", &vec![3u32, 2, 1]).unwrap();
        let back: Option<Vec<u32>> = load_json(&storage, "board").unwrap();
        assert_eq!(back, Some(vec![3, 2, 1]));

        storage.remove_item("board").unwrap();
        storage.remove_item("board").unwrap();
        assert_eq!(storage.get_item("board").unwrap(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
