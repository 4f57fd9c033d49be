//! Error types for the PDF Insights server.
//!
//! [`StartupError`] covers everything that can stop the process before or
//! while serving. [`AppError`] implements `IntoResponse` for Axum handlers.

use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pdf_insights_config::ValidationError;
use serde_json::json;
use thiserror::Error;

/// Errors that abort server startup or shut the server down.
#[derive(Error, Debug)]
pub enum StartupError {
    /// Environment failed validation
    #[error(transparent)]
    Configuration(#[from] ValidationError),

    /// Connection string rejected by the database driver
    #[error("Database configuration error: {0}")]
    Database(#[from] sqlx::Error),

    /// Listener could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Server loop failed
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Application-level errors returned by handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Not found error
    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
