//! Service-facing configuration ("service" variant).
//!
//! | Variable | Constraint | Default |
//! |----------|------------|---------|
//! | `NODE_ENV` | `development` \| `test` \| `production` | `development` |
//! | `DATABASE_URL` | non-empty, starts with `postgresql://` | required |
//! | `PORT` | integer in `1..=65535` | required |
//! | `FRONTEND_URL` | JSON array of strings | required |
//! | `JWT_SECRET` | non-empty, secret | required |
//!
//! `PORT` is stricter than a non-empty string: values that are not a usable
//! TCP port (`http`, `0`, `70000`) are rejected as malformed.
//!
//! `FRONTEND_URL` is decoded into an ordered list of origins with any
//! trailing `/` removed from each entry, e.g.
//! `["https://a.com/", "https://b.com"]` becomes `https://a.com`, `https://b.com`.

use std::net::SocketAddr;

use crate::env::EnvSource;
use crate::environment::Environment;
use crate::error::ValidationError;
use crate::schema::{Constraint, FieldSpec, Schema};
use crate::secret::Secret;
use crate::web::{DATABASE_URL, DATABASE_URL_FIELD, ENVIRONMENT_FIELD, NODE_ENV};

pub const PORT: &str = "PORT";
pub const FRONTEND_URL: &str = "FRONTEND_URL";
pub const JWT_SECRET: &str = "JWT_SECRET";

const SERVICE_FIELDS: &[FieldSpec] = &[
    ENVIRONMENT_FIELD,
    DATABASE_URL_FIELD,
    FieldSpec::required(PORT, Constraint::Port).describe("HTTP listening port"),
    FieldSpec::required(
        FRONTEND_URL,
        Constraint::JsonStringList {
            strip_trailing_slash: true,
        },
    )
    .describe("allowed frontend origins"),
    FieldSpec::required(JWT_SECRET, Constraint::NonEmpty)
        .secret()
        .describe("token signing secret"),
];

pub static SERVICE_SCHEMA: Schema = Schema::new("service", SERVICE_FIELDS);

/// Validated service-facing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    environment: Environment,
    database_url: String,
    port: u16,
    frontend_origins: Vec<String>,
    jwt_secret: Secret,
}

impl ServiceConfig {
    /// Validate `env` against [`SERVICE_SCHEMA`].
    pub fn load<S: EnvSource + ?Sized>(env: &S) -> Result<Self, ValidationError> {
        let mut fields = SERVICE_SCHEMA.validate(env)?;

        Ok(Self {
            environment: fields.take_environment(NODE_ENV)?,
            database_url: fields.take_text(DATABASE_URL)?,
            port: fields.take_port(PORT)?,
            frontend_origins: fields.take_list(FRONTEND_URL)?,
            jwt_secret: fields.take_secret(JWT_SECRET)?,
        })
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Allowed frontend origins, in declaration order.
    pub fn frontend_origins(&self) -> &[String] {
        &self.frontend_origins
    }

    pub fn jwt_secret(&self) -> &Secret {
        &self.jwt_secret
    }

    /// Address the HTTP listener binds to (all interfaces).
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvMap;

    fn valid_env() -> EnvMap {
        [
            (DATABASE_URL, "postgresql://u:p@h/db"),
            (PORT, "8080"),
            (FRONTEND_URL, r#"["https://a.com/", "https://b.com"]"#),
            (JWT_SECRET, "jwt"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_bind_address() {
        let config = ServiceConfig::load(&valid_env()).unwrap();
        assert_eq!(config.bind_address().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_port_must_be_a_usable_port() {
        for raw in ["http", "0", "70000"] {
            let mut env = valid_env();
            env.insert(PORT, raw);
            let err = ServiceConfig::load(&env).unwrap_err();
            assert_eq!(err.violations[0].key(), PORT);
            assert!(!err.violations[0].is_missing());
        }
    }

    #[test]
    fn test_origins_stripped() {
        let config = ServiceConfig::load(&valid_env()).unwrap();
        assert_eq!(config.frontend_origins(), ["https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ServiceConfig::load(&valid_env()).unwrap();
        assert!(!format!("{config:?}").contains("\"jwt\""));
    }
}
