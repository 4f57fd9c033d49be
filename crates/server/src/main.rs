//! PDF Insights Server
//!
//! Validates the service configuration before any async machinery starts,
//! then runs the HTTP server.

use anyhow::Context;

use pdf_insights_config::EnvMap;
use pdf_insights_server::config::ServerConfig;
use pdf_insights_server::logging::{init_tracing, LogSettings};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let env = EnvMap::from_process();

    let log_settings = LogSettings::from_env_map(&env);
    init_tracing(log_settings.as_ref().unwrap_or(&LogSettings::default()));
    if let Err(e) = &log_settings {
        tracing::warn!(error = %e, "Ignoring invalid logging settings");
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting PDF Insights server"
    );

    // An invalid environment ends here, before the runtime or a listener exists.
    let config = ServerConfig::load(&env)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build async runtime")?;

    runtime.block_on(pdf_insights_server::serve(config))?;

    Ok(())
}
