//! Application state for the PDF Insights server.
//!
//! This module defines the shared application state that is
//! passed to all handlers via Axum's state management.

use std::sync::Arc;

use pdf_insights_config::ServiceConfig;

use crate::auth::AuthSettings;
use crate::db::DbPool;

/// Shared application state.
///
/// Built once at startup from the validated configuration. Everything in it
/// is read-only after construction.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DbPool,

    /// Validated service configuration
    pub config: Arc<ServiceConfig>,

    /// Settings for the authentication collaborator
    pub auth: Arc<AuthSettings>,

    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `db` - Database connection pool
    /// * `config` - Validated service configuration
    ///
    /// # Returns
    ///
    /// A new `AppState` whose auth settings are derived from `config`.
    pub fn new(db: DbPool, config: Arc<ServiceConfig>) -> Self {
        let auth = AuthSettings::from_config(&config);
        Self {
            db,
            config,
            auth: Arc::new(auth),
            start_time: std::time::Instant::now(),
        }
    }

    /// Get the server uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
