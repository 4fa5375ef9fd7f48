//! Application state
//!
//! Shared state for the axum application: service factory, database
//! bundle and settings, cloned cheaply into every handler.

use crate::config::settings::Settings;
use crate::database::{DatabasePool, DatabaseService};
use crate::middleware::rate_limit::RateLimiter;
use crate::services::ServiceFactory;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub pool: DatabasePool,
    pub database: DatabaseService,
    pub services: ServiceFactory,
    pub auth_limiter: RateLimiter,
}

impl AppState {
    /// Create a new application state
    pub fn new(settings: Settings, pool: DatabasePool, database: DatabaseService, services: ServiceFactory) -> Self {
        Self {
            settings,
            pool,
            database,
            services,
            auth_limiter: RateLimiter::default(),
        }
    }
}
