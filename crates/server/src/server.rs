//! Server lifecycle: wire the validated configuration into every component,
//! bind, and serve until a shutdown signal arrives.

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::db::create_pool;
use crate::error::StartupError;
use crate::router::build_router;
use crate::state::AppState;

/// Run the server with an already validated configuration.
///
/// # Errors
///
/// Returns a [`StartupError`] if the connection string is rejected, the
/// listener cannot be bound, or the server loop fails.
pub async fn serve(config: ServerConfig) -> Result<(), StartupError> {
    let ServerConfig { service, pool } = config;

    tracing::info!(
        environment = %service.environment(),
        port = service.port(),
        origins = service.frontend_origins().len(),
        "Configuration loaded"
    );

    let db_pool = create_pool(service.database_url(), &pool)?;
    let state = AppState::new(db_pool, service.clone());

    tracing::info!(
        session_cookie = %state.auth.session_cookie_name(),
        secure_cookies = state.auth.use_secure_cookies,
        signing_secret = %state.auth.signing_secret,
        "Auth settings derived"
    );

    let app = build_router(state);

    let addr = service.bind_address();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
