//! Smart VMS
//!
//! Visitor management for a gated society: registers walk-in and
//! pre-approved visitors, issues passes keyed by a QR-encodable pass id,
//! records check-in/check-out and derives visitor statistics. State is kept
//! in a single key-value slot and exposed through a REST JSON API.

use std::sync::Arc;

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod repository;
pub mod search;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire repository and services for `config` on top of `storage`
    pub fn new(config: AppConfig, storage: Arc<dyn repository::storage::KeyValueStorage>) -> Self {
        let repository = repository::Repository::new(storage, &config.storage.key);
        let services = services::Services::new(repository, config.analytics.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
