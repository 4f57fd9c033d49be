//! PDF Insights Server Library
//!
//! The service-facing process of PDF Insights. It owns startup:
//!
//! - **Configuration**: validate the service schema once, before anything else
//!   runs, and refuse to start with an itemized report when it is invalid
//! - **Persistence**: hand the connection string to a lazily connecting pool
//! - **Authentication**: derive the settings handed to the auth collaborator
//! - **HTTP**: health endpoints behind a CORS policy built from the allowed
//!   frontend origins
//!
//! The validated configuration is constructed exactly once in `main` and
//! passed down explicitly; nothing reads the environment after startup.
//!
//! ## Modules
//!
//! - [`config`]: Startup configuration and failure reporting
//! - [`auth`]: Settings for the authentication collaborator
//! - [`db`]: Database pool management
//! - [`error`]: Startup and HTTP error types
//! - [`handlers`]: HTTP route handlers
//! - [`logging`]: Tracing setup
//! - [`router`]: Router and CORS assembly
//! - [`state`]: Shared application state

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod router;
pub mod server;
pub mod state;

pub use error::{AppError, AppResult, StartupError};
pub use server::serve;
