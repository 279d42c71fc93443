//! Visitors repository
//!
//! The whole collection lives in a single slot as a JSON array in insertion
//! order. Every write rewrites the full array.
//!
//! Writes made through one repository (and its clones) are serialized by a
//! process-local lock. Two processes sharing the same slot can still lose an
//! update: `update` reads, merges and writes without any version check.

use std::sync::{Arc, Mutex};

use crate::{
    error::{AppResult, StorageError},
    models::visitor::{Visitor, VisitorPatch},
};

use super::storage::KeyValueStorage;

#[derive(Clone)]
pub struct VisitorsRepository {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    write_lock: Arc<Mutex<()>>,
}

impl VisitorsRepository {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// All visitors in insertion order.
    ///
    /// An unreadable or corrupt slot is logged and reads as empty.
    pub fn list(&self) -> Vec<Visitor> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Error loading visitors");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(visitors) => visitors,
            Err(e) => {
                tracing::error!(
                    key = %self.key,
                    error = %e,
                    "Visitor collection is corrupt, treating it as empty"
                );
                Vec::new()
            }
        }
    }

    /// First visitor with the given pass id
    pub fn get_by_id(&self, id: &str) -> Option<Visitor> {
        self.list().into_iter().find(|v| v.id == id)
    }

    /// Append a visitor. Id uniqueness is not checked here.
    pub fn create(&self, visitor: &Visitor) -> AppResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());

        let mut visitors = self.list();
        visitors.push(visitor.clone());
        self.write_all(&visitors)
    }

    /// Merge `patch` into the visitor with the given id.
    ///
    /// Returns the merged record, or `None` without writing anything when the
    /// id is unknown.
    pub fn update(&self, id: &str, patch: &VisitorPatch) -> AppResult<Option<Visitor>> {
        self.update_with(id, |_| Ok(patch.clone()))
    }

    /// Build a patch from the current record and merge it, all under the
    /// write lock.
    ///
    /// `make_patch` sees the stored record as of this write, so a state check
    /// done there cannot be invalidated by a concurrent writer in the same
    /// process. An error from `make_patch` aborts without writing.
    pub fn update_with<F>(&self, id: &str, make_patch: F) -> AppResult<Option<Visitor>>
    where
        F: FnOnce(&Visitor) -> AppResult<VisitorPatch>,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());

        let mut visitors = self.list();
        let Some(index) = visitors.iter().position(|v| v.id == id) else {
            return Ok(None);
        };

        let patch = make_patch(&visitors[index])?;
        patch.apply_to(&mut visitors[index]);
        let updated = visitors[index].clone();
        self.write_all(&visitors)?;
        Ok(Some(updated))
    }

    /// Erase the whole collection
    pub fn clear(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        self.storage.remove(&self.key)?;
        Ok(())
    }

    /// Probe the slot backend without parsing the collection
    pub fn check_readable(&self) -> Result<(), StorageError> {
        self.storage.get(&self.key).map(|_| ())
    }

    fn write_all(&self, visitors: &[Visitor]) -> AppResult<()> {
        let encoded = serde_json::to_string(visitors).map_err(StorageError::from)?;
        self.storage.set(&self.key, &encoded)?;
        Ok(())
    }
}
