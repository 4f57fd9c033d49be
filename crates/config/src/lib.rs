//! PDF Insights configuration library.
//!
//! Translates an untyped environment mapping into strongly typed, validated
//! configuration records. Every deployable process declares its fields as a
//! [`Schema`] and runs them through the same validation engine:
//!
//! - **web**: the client-facing record ([`WebConfig`])
//! - **service**: the service-facing record ([`ServiceConfig`])
//!
//! Validation never stops at the first problem. A failed load returns a
//! [`ValidationError`] listing every missing or malformed field, in schema
//! declaration order.
//!
//! ## Modules
//!
//! - [`env`]: environment mappings (process snapshot, `.env` files)
//! - [`schema`]: field declarations and the validation engine
//! - [`error`]: violation and aggregate error types
//! - [`web`] / [`service`]: the two schema variants and their records
//! - [`pool`]: optional connection-pool tuning knobs, validated by the same engine
//!
//! ## Example
//!
//! ```ignore
//! use pdf_insights_config::{EnvMap, ServiceConfig};
//!
//! let env = EnvMap::from_process();
//! let config = ServiceConfig::load(&env)?;
//! println!("listening on {}", config.bind_address());
//! ```

pub mod env;
pub mod environment;
pub mod error;
pub mod pool;
pub mod schema;
pub mod secret;
pub mod service;
pub mod web;

pub use env::{EnvMap, EnvSource};
pub use environment::Environment;
pub use error::{EnvFileError, ValidationError, Violation};
pub use pool::{PoolConfig, POOL_SCHEMA};
pub use schema::{Constraint, FieldSpec, FieldValue, Schema, ValidatedFields};
pub use secret::Secret;
pub use service::{ServiceConfig, SERVICE_SCHEMA};
pub use web::{WebConfig, WEB_SCHEMA};
