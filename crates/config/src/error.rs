//! Error types for configuration loading.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single field failing a single constraint.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Required key absent and no default declared
    #[error("{key}: required but not set")]
    MissingField { key: String },

    /// Key present but fails its type, format or membership constraint
    #[error("{key}: {reason}")]
    MalformedValue { key: String, reason: String },
}

impl Violation {
    pub fn missing(key: impl Into<String>) -> Self {
        Violation::MissingField { key: key.into() }
    }

    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Violation::MalformedValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// The environment key this violation is about.
    pub fn key(&self) -> &str {
        match self {
            Violation::MissingField { key } | Violation::MalformedValue { key, .. } => key,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Violation::MissingField { .. })
    }
}

/// Aggregate failure: every violation found while validating one schema.
///
/// Violations are kept in schema declaration order.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Name of the schema variant that failed
    pub schema: &'static str,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(schema: &'static str, violations: Vec<Violation>) -> Self {
        Self { schema, violations }
    }

    /// Look up the violation for `key`, if any.
    pub fn violation(&self, key: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.key() == key)
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.violations.len();
        write!(
            f,
            "invalid {} configuration: {} violation{}",
            self.schema,
            count,
            if count == 1 { "" } else { "s" }
        )?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

/// Failure to read a dotenv file.
#[derive(Error, Debug)]
#[error("failed to read env file {path}: {source}")]
pub struct EnvFileError {
    pub path: String,
    #[source]
    pub source: dotenvy::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display() {
        assert_eq!(
            Violation::missing("JWT_SECRET").to_string(),
            "JWT_SECRET: required but not set"
        );
        assert_eq!(
            Violation::malformed("PORT", "must be a TCP port number").to_string(),
            "PORT: must be a TCP port number"
        );
    }

    #[test]
    fn test_validation_error_lists_every_violation() {
        let err = ValidationError::new(
            "service",
            vec![
                Violation::missing("PORT"),
                Violation::malformed("NODE_ENV", "expected one of development, test, production"),
            ],
        );

        assert_eq!(
            err.to_string(),
            "invalid service configuration: 2 violations\n  \
             - PORT: required but not set\n  \
             - NODE_ENV: expected one of development, test, production"
        );
        assert!(err.violation("PORT").unwrap().is_missing());
        assert!(err.violation("DATABASE_URL").is_none());
    }

    #[test]
    fn test_violation_serializes_with_kind_tag() {
        let json = serde_json::to_value(Violation::missing("PORT")).unwrap();
        assert_eq!(json["kind"], "missing_field");
        assert_eq!(json["key"], "PORT");
    }
}
