//! Storage adapters and the safe load/save wrapper
//!
//! Two [`StoragePort`] implementations (an in-memory map and a single-file
//! JSON store) plus [`SafeStore`], which wraps any backend with the
//! corruption policy the session relies on: loads never fail, corrupted
//! values are deleted so they cannot wedge the next start, and saves report
//! success as a plain bool.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::error::StorageError;
use crate::ports::StoragePort;

/// In-memory storage, for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// File-backed storage with an in-memory cache.
///
/// Stores key-value pairs as one JSON map in the file the caller names.
/// Reads are served from the cache; every write persists the whole map.
pub struct FileStorage {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory cache of stored values
    cache: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    /// Opens a file-backed store, loading whatever the file already holds.
    ///
    /// A missing file is an empty store. An unreadable or unparseable file
    /// is logged and treated as empty rather than refusing to start.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let storage_path = path.into();

        let cache = if storage_path.exists() {
            match fs::read_to_string(&storage_path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!("Failed to parse storage file: {}", e);
                        HashMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read storage file: {}", e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!("File storage initialized at: {:?}", storage_path);

        Self {
            storage_path,
            cache: RwLock::new(cache),
        }
    }

    /// Persist the cache to disk
    fn persist(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let cache = self.cache.read().map_err(|_| StorageError::Poisoned)?;
        let data = serde_json::to_string_pretty(&*cache)?;
        drop(cache); // Release lock before I/O
        fs::write(&self.storage_path, data)?;
        Ok(())
    }
}

impl StoragePort for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let cache = self.cache.read().map_err(|_| StorageError::Poisoned)?;
        Ok(cache.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        {
            let mut cache = self.cache.write().map_err(|_| StorageError::Poisoned)?;
            cache.insert(key.to_string(), value.to_string());
        }
        self.persist()
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        {
            let mut cache = self.cache.write().map_err(|_| StorageError::Poisoned)?;
            cache.remove(key);
        }
        self.persist()
    }
}

/// Storage wrapper that never lets corruption escape.
#[derive(Clone)]
pub struct SafeStore {
    backend: Arc<dyn StoragePort>,
}

impl SafeStore {
    pub fn new(backend: Arc<dyn StoragePort>) -> Self {
        Self { backend }
    }

    /// Loads and decodes `key`, falling back to `default` on any failure.
    ///
    /// A present-but-undecodable value is deleted so the next load starts
    /// clean. Missing keys, empty values and unreadable backends just yield
    /// the default and leave storage untouched.
    pub fn load_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                tracing::error!("Error loading from storage key \"{}\": {}", key, e);
                return default;
            }
        };
        if raw.is_empty() {
            return default;
        }

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Error loading from storage key \"{}\": {}", key, e);
                // Clear corrupted data
                if let Err(clear_err) = self.backend.remove(key) {
                    tracing::error!("Error clearing corrupted storage: {}", clear_err);
                }
                default
            }
        }
    }

    /// Encodes and writes `value` under `key`; `false` means it did not stick.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!("Error saving to storage key \"{}\": {}", key, e);
                return false;
            }
        };
        match self.backend.write(key, &encoded) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error saving to storage key \"{}\": {}", key, e);
                false
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
