//! Database connection-pool tuning.
//!
//! | Variable | Constraint | Default |
//! |----------|------------|---------|
//! | `DATABASE_POOL_MAX_CONNECTIONS` | integer >= 1 | `10` |
//! | `DATABASE_POOL_MIN_CONNECTIONS` | integer >= 0, at most the maximum | `1` |
//! | `DATABASE_POOL_ACQUIRE_TIMEOUT` | seconds, integer >= 1 | `30` |

use crate::env::EnvSource;
use crate::error::{ValidationError, Violation};
use crate::schema::{Constraint, FieldSpec, Schema};

pub const MAX_CONNECTIONS: &str = "DATABASE_POOL_MAX_CONNECTIONS";
pub const MIN_CONNECTIONS: &str = "DATABASE_POOL_MIN_CONNECTIONS";
pub const ACQUIRE_TIMEOUT: &str = "DATABASE_POOL_ACQUIRE_TIMEOUT";

const U32_MAX: u64 = u32::MAX as u64;

const POOL_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(MAX_CONNECTIONS, Constraint::Integer { min: 1, max: U32_MAX })
        .with_default("10")
        .describe("maximum connections in the pool"),
    FieldSpec::required(MIN_CONNECTIONS, Constraint::Integer { min: 0, max: U32_MAX })
        .with_default("1")
        .describe("minimum idle connections"),
    FieldSpec::required(ACQUIRE_TIMEOUT, Constraint::Integer { min: 1, max: U32_MAX })
        .with_default("30")
        .describe("connection acquire timeout in seconds"),
];

pub static POOL_SCHEMA: Schema = Schema::new("pool", POOL_FIELDS);

/// Pool knobs loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum connections in the pool
    pub max_connections: u32,

    /// Minimum connections in the pool
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,
}

impl PoolConfig {
    /// Validate the pool knobs in `env` against [`POOL_SCHEMA`].
    ///
    /// Every malformed knob is reported under its own key. The minimum is
    /// only compared with the maximum once both parse.
    pub fn load<S: EnvSource + ?Sized>(env: &S) -> Result<Self, ValidationError> {
        let mut fields = POOL_SCHEMA.validate(env)?;

        let config = Self {
            max_connections: fields.take_u32(MAX_CONNECTIONS)?,
            min_connections: fields.take_u32(MIN_CONNECTIONS)?,
            acquire_timeout: fields.take_integer(ACQUIRE_TIMEOUT)?,
        };

        if config.min_connections > config.max_connections {
            return Err(ValidationError::new(
                POOL_SCHEMA.name,
                vec![Violation::malformed(
                    MIN_CONNECTIONS,
                    format!(
                        "must not exceed {MAX_CONNECTIONS} ({})",
                        config.max_connections
                    ),
                )],
            ));
        }

        Ok(config)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvMap;

    fn keys(err: &ValidationError) -> Vec<&str> {
        err.violations.iter().map(Violation::key).collect()
    }

    #[test]
    fn test_default_config() {
        let config = PoolConfig::load(&EnvMap::new()).unwrap();
        assert_eq!(config, PoolConfig::default());
        assert_eq!(config.max_connections, 10);
    }

    #[test]
    fn test_prefixed_overrides() {
        let env: EnvMap = [
            (MAX_CONNECTIONS, "25"),
            (ACQUIRE_TIMEOUT, "5"),
            ("MAX_CONNECTIONS", "99"),
        ]
        .into_iter()
        .collect();

        let config = PoolConfig::load(&env).unwrap();
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.acquire_timeout, 5);
    }

    #[test]
    fn test_every_malformed_knob_is_reported() {
        let env: EnvMap = [(MAX_CONNECTIONS, "many"), (MIN_CONNECTIONS, "few")]
            .into_iter()
            .collect();

        let err = PoolConfig::load(&env).unwrap_err();

        assert_eq!(keys(&err), [MAX_CONNECTIONS, MIN_CONNECTIONS]);
        assert!(err.violations.iter().all(|v| !v.is_missing()));
    }

    #[test]
    fn test_zero_max_connections_rejected() {
        let env: EnvMap = [(MAX_CONNECTIONS, "0")].into_iter().collect();
        let err = PoolConfig::load(&env).unwrap_err();
        assert_eq!(keys(&err), [MAX_CONNECTIONS]);
    }

    #[test]
    fn test_min_above_max_rejected() {
        let env: EnvMap = [(MAX_CONNECTIONS, "2"), (MIN_CONNECTIONS, "5")]
            .into_iter()
            .collect();

        let err = PoolConfig::load(&env).unwrap_err();

        assert_eq!(
            err.violations,
            vec![Violation::malformed(
                MIN_CONNECTIONS,
                "must not exceed DATABASE_POOL_MAX_CONNECTIONS (2)"
            )]
        );
    }

    #[test]
    fn test_min_equal_to_max_accepted() {
        let env: EnvMap = [(MAX_CONNECTIONS, "3"), (MIN_CONNECTIONS, "3")]
            .into_iter()
            .collect();
        assert!(PoolConfig::load(&env).is_ok());
    }
}
