//! HTTP route handlers for the PDF Insights server.

pub mod health;

pub use health::{api_health, health_check};

use axum::http::Uri;

use crate::error::AppError;

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
