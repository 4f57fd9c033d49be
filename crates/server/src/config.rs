//! Startup configuration for the PDF Insights server.

use std::sync::Arc;

use pdf_insights_config::{EnvMap, PoolConfig, ServiceConfig, ValidationError, SERVICE_SCHEMA};

use crate::error::StartupError;

/// Everything the server needs from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Validated service configuration, shared read-only with every component
    pub service: Arc<ServiceConfig>,

    /// Database pool tuning
    pub pool: PoolConfig,
}

impl ServerConfig {
    /// Validate the service schema and the pool knobs together.
    ///
    /// Pool-knob violations are appended after the schema violations so the
    /// operator sees every problem in one report.
    pub fn from_env_map(env: &EnvMap) -> Result<Self, ValidationError> {
        match (ServiceConfig::load(env), PoolConfig::load(env)) {
            (Ok(service), Ok(pool)) => Ok(Self {
                service: Arc::new(service),
                pool,
            }),
            (Err(mut err), Err(pool_err)) => {
                err.violations.extend(pool_err.violations);
                Err(err)
            }
            (Err(err), Ok(_)) => Err(err),
            (Ok(_), Err(pool_err)) => Err(ValidationError::new(
                SERVICE_SCHEMA.name,
                pool_err.violations,
            )),
        }
    }

    /// Load the configuration at startup.
    ///
    /// # Arguments
    ///
    /// * `env` - Environment snapshot taken at process entry
    ///
    /// # Errors
    ///
    /// Returns [`StartupError::Configuration`] when any field is invalid,
    /// after logging each violation.
    pub fn load(env: &EnvMap) -> Result<Self, StartupError> {
        Self::from_env_map(env).map_err(|err| {
            report_invalid_configuration(&err);
            StartupError::from(err)
        })
    }
}

/// Log every violation as its own event.
pub fn report_invalid_configuration(err: &ValidationError) {
    for violation in &err.violations {
        tracing::error!(
            schema = err.schema,
            key = violation.key(),
            violation = %violation,
            "Invalid configuration"
        );
    }
}
