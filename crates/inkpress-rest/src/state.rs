//! Application state for Axum handlers.

use inkpress_core::HealthCheck;
use inkpress_service::{ArticleService, AuthorService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub article_service: Arc<dyn ArticleService>,
    pub author_service: Arc<dyn AuthorService>,
    /// Dependencies probed by `/ready`.
    pub health_checks: Arc<[Arc<dyn HealthCheck>]>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(article_service: Arc<dyn ArticleService>, author_service: Arc<dyn AuthorService>) -> Self {
        Self {
            article_service,
            author_service,
            health_checks: Arc::new([]),
        }
    }

    /// Registers the dependencies reported by the readiness probe.
    #[must_use]
    pub fn with_health_checks(mut self, checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        self.health_checks = checks.into();
        self
    }
}
