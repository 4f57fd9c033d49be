//! Client-facing configuration ("web" variant).
//!
//! | Variable | Constraint | Default |
//! |----------|------------|---------|
//! | `NODE_ENV` | `development` \| `test` \| `production` | `development` |
//! | `DATABASE_URL` | non-empty, starts with `postgresql://` | required |
//! | `NEXT_PUBLIC_URL` | non-empty | required |
//! | `BETTER_AUTH_SECRET` | non-empty, secret | required |
//! | `BETTER_AUTH_URL` | URL | `http://localhost:3000` |
//!
//! `BETTER_AUTH_URL` is checked for URL syntax but stored exactly as written.

use crate::env::EnvSource;
use crate::environment::{Environment, ENVIRONMENT_MODES};
use crate::error::ValidationError;
use crate::schema::{Constraint, FieldSpec, Schema};
use crate::secret::Secret;

pub const NODE_ENV: &str = "NODE_ENV";
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const NEXT_PUBLIC_URL: &str = "NEXT_PUBLIC_URL";
pub const BETTER_AUTH_SECRET: &str = "BETTER_AUTH_SECRET";
pub const BETTER_AUTH_URL: &str = "BETTER_AUTH_URL";

pub const DEFAULT_AUTH_URL: &str = "http://localhost:3000";

/// Environment mode field shared by both variants.
pub(crate) const ENVIRONMENT_FIELD: FieldSpec =
    FieldSpec::required(NODE_ENV, Constraint::OneOf(ENVIRONMENT_MODES))
        .with_default("development")
        .describe("runtime mode; production enables secure cookies");

/// Database connection string field shared by both variants.
pub(crate) const DATABASE_URL_FIELD: FieldSpec =
    FieldSpec::required(DATABASE_URL, Constraint::Prefix("postgresql://"))
        .describe("PostgreSQL connection string");

const WEB_FIELDS: &[FieldSpec] = &[
    ENVIRONMENT_FIELD,
    DATABASE_URL_FIELD,
    FieldSpec::required(NEXT_PUBLIC_URL, Constraint::NonEmpty)
        .describe("public base URL, trusted origin and callback base"),
    FieldSpec::required(BETTER_AUTH_SECRET, Constraint::NonEmpty)
        .secret()
        .describe("session and token signing secret"),
    FieldSpec::required(BETTER_AUTH_URL, Constraint::Url)
        .with_default(DEFAULT_AUTH_URL)
        .describe("base URL of the authentication service"),
];

pub static WEB_SCHEMA: Schema = Schema::new("web", WEB_FIELDS);

/// Validated client-facing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    environment: Environment,
    database_url: String,
    public_url: String,
    auth_secret: Secret,
    auth_url: String,
}

impl WebConfig {
    /// Validate `env` against [`WEB_SCHEMA`].
    pub fn load<S: EnvSource + ?Sized>(env: &S) -> Result<Self, ValidationError> {
        let mut fields = WEB_SCHEMA.validate(env)?;

        Ok(Self {
            environment: fields.take_environment(NODE_ENV)?,
            database_url: fields.take_text(DATABASE_URL)?,
            public_url: fields.take_text(NEXT_PUBLIC_URL)?,
            auth_secret: fields.take_secret(BETTER_AUTH_SECRET)?,
            auth_url: fields.take_text(BETTER_AUTH_URL)?,
        })
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn public_url(&self) -> &str {
        &self.public_url
    }

    pub fn auth_secret(&self) -> &Secret {
        &self.auth_secret
    }

    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }
}
