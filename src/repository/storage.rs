//! Key-value slot storage backing the repositories
//!
//! A slot is a named text blob. A missing slot reads as `None`.

use std::{
    collections::HashMap,
    fs, io,
    path::PathBuf,
    sync::{Arc, RwLock},
};

use crate::{
    config::{StorageBackend, StorageConfig},
    error::StorageError,
};

/// Persistent string slots addressed by key
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStorage: Send + Sync {
    /// Read a slot, `None` when it was never written or was removed
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the whole content of a slot
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Erase a slot; removing a missing slot succeeds
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Build the backend selected in configuration
pub fn from_config(config: &StorageConfig) -> Arc<dyn KeyValueStorage> {
    match config.backend {
        StorageBackend::File => Arc::new(FileStorage::new(config.data_dir.clone())),
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
    }
}

/// One `<key>.json` file per slot inside a data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn io_error(key: &str, source: io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).map_err(|e| Self::io_error(key, e))?;

        // Readers never observe a half-written slot
        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| Self::io_error(key, e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(Self::io_error(key, e));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }
}

/// In-process slots, optionally bounded like a browser storage quota
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any write whose slots would total more than `limit` bytes
    pub fn with_quota(limit: usize) -> Self {
        Self {
            slots: RwLock::default(),
            quota: Some(limit),
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.read().unwrap_or_else(|p| p.into_inner());
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().unwrap_or_else(|p| p.into_inner());

        if let Some(limit) = self.quota {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().unwrap_or_else(|p| p.into_inner());
        slots.remove(key);
        Ok(())
    }
}
