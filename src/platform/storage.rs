//! Key-value storage backends
//!
//! Settings and run statistics are small JSON blobs stored under fixed
//! keys. In the browser that is LocalStorage; natively all keys share one
//! JSON file, written through a temp file so a crash never truncates it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value store that outlives the process
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile storage for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Native storage: one JSON object file holding every key
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Environment variable overriding the data file location
    pub const PATH_ENV: &'static str = "LION_SPLASH_DATA";
    const DEFAULT_FILE: &'static str = "lion_splash_data.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$LION_SPLASH_DATA`, or a file in the working directory
    pub fn from_env() -> Self {
        let path = std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced; anything else may still hold other keys
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StorageError::Json(e)) => {
                log::warn!("Discarding corrupt {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(&entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::Unavailable)
    }
}

/// The platform's persistent storage
#[cfg(target_arch = "wasm32")]
pub fn default_storage() -> Box<dyn KeyValueStorage> {
    Box::new(LocalStorage)
}

/// The platform's persistent storage
#[cfg(not(target_arch = "wasm32"))]
pub fn default_storage() -> Box<dyn KeyValueStorage> {
    Box::new(FileStorage::from_env())
}
