//! Repository layer over the key-value slot storage

pub mod storage;
pub mod visitors;

use std::sync::Arc;

use storage::KeyValueStorage;

/// Main repository struct holding the slot storage
#[derive(Clone)]
pub struct Repository {
    pub visitors: visitors::VisitorsRepository,
}

impl Repository {
    /// Create a new repository; `visitors_key` names the visitor collection slot
    pub fn new(storage: Arc<dyn KeyValueStorage>, visitors_key: &str) -> Self {
        Self {
            visitors: visitors::VisitorsRepository::new(storage, visitors_key),
        }
    }
}
