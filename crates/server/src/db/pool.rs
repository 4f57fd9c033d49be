//! Database connection pool management.

use std::time::Duration;

use pdf_insights_config::PoolConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::error::AppResult;

/// Type alias for the PostgreSQL connection pool.
pub type DbPool = PgPool;

/// Create a lazily connecting pool for `database_url`.
///
/// No connection is opened here, so startup never blocks on the database.
/// The URL is still parsed up front and rejected if the driver cannot use it.
///
/// # Arguments
///
/// * `database_url` - Validated `postgresql://` connection string
/// * `config` - Pool tuning knobs
///
/// # Returns
///
/// A PostgreSQL pool that connects on first use.
///
/// # Errors
///
/// Returns an error if the connection string cannot be parsed.
pub fn create_pool(database_url: &str, config: &PoolConfig) -> Result<DbPool, sqlx::Error> {
    let options: PgConnectOptions = database_url.parse()?;

    tracing::info!(
        host = %options.get_host(),
        port = options.get_port(),
        database = options.get_database().unwrap_or_default(),
        max_connections = config.max_connections,
        "Database connection pool created"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout))
        .connect_lazy_with(options);

    Ok(pool)
}

/// Check that the database answers a trivial query.
///
/// # Errors
///
/// Returns [`AppError::Database`](crate::error::AppError::Database) if no
/// connection can be acquired or the query fails.
pub async fn ping(pool: &DbPool) -> AppResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
