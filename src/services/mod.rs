//! Business logic services

pub mod stats;
pub mod visitors;

use crate::{config::AnalyticsConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub visitors: visitors::VisitorsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, analytics_config: AnalyticsConfig) -> Self {
        Self {
            visitors: visitors::VisitorsService::new(repository.clone()),
            stats: stats::StatsService::new(repository, analytics_config),
        }
    }
}
