//! Database module for the PDF Insights server.
//!
//! The relational schema belongs to the persistence collaborator; this
//! module only owns the connection pool.

pub mod pool;

pub use pool::{create_pool, ping, DbPool};
