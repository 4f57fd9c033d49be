//! Declarative field schemas and the validation engine.
//!
//! A [`Schema`] is plain data: an ordered list of [`FieldSpec`]s, each naming an
//! environment key, the [`Constraint`] its value must satisfy, and an optional
//! default. [`Schema::validate`] is the single engine behind every schema
//! variant. It visits all fields, collects every violation, and only succeeds
//! when the whole record is valid.

use std::fmt;

use url::Url;

use crate::env::EnvSource;
use crate::environment::Environment;
use crate::error::{ValidationError, Violation};
use crate::secret::Secret;

/// Constraint applied to a raw environment value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Any non-empty string
    NonEmpty,
    /// Non-empty string starting with the given literal
    Prefix(&'static str),
    /// Absolute URL, kept exactly as written
    Url,
    /// Exactly one of the listed members
    OneOf(&'static [&'static str]),
    /// TCP port number in `1..=65535`
    Port,
    /// Decimal integer in `min..=max`
    Integer { min: u64, max: u64 },
    /// JSON array of strings
    JsonStringList { strip_trailing_slash: bool },
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::NonEmpty => f.write_str("non-empty string"),
            Constraint::Prefix(prefix) => write!(f, "non-empty, starts with `{prefix}`"),
            Constraint::Url => f.write_str("URL"),
            Constraint::OneOf(members) => write!(f, "one of {}", members.join(" | ")),
            Constraint::Port => f.write_str("port number"),
            Constraint::Integer { min, max } if *max == u64::from(u32::MAX) => {
                write!(f, "integer >= {min}")
            }
            Constraint::Integer { min, max } => write!(f, "integer in {min}..={max}"),
            Constraint::JsonStringList {
                strip_trailing_slash: true,
            } => f.write_str("JSON array of strings, trailing `/` stripped"),
            Constraint::JsonStringList { .. } => f.write_str("JSON array of strings"),
        }
    }
}

/// Declaration of one configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Environment variable name
    pub key: &'static str,
    pub constraint: Constraint,
    /// Raw value substituted when the key is absent
    pub default: Option<&'static str>,
    /// Parsed value is wrapped in [`Secret`]
    pub secret: bool,
    pub description: &'static str,
}

impl FieldSpec {
    /// A field with no default.
    pub const fn required(key: &'static str, constraint: Constraint) -> Self {
        Self {
            key,
            constraint,
            default: None,
            secret: false,
            description: "",
        }
    }

    pub const fn with_default(self, default: &'static str) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub const fn secret(self) -> Self {
        Self {
            secret: true,
            ..self
        }
    }

    pub const fn describe(self, description: &'static str) -> Self {
        Self {
            description,
            ..self
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Apply this field's constraint to a raw value.
    ///
    /// The error is the human-readable reason. It never echoes secret values.
    pub fn parse(&self, raw: &str) -> Result<FieldValue, String> {
        let value = match self.constraint {
            Constraint::NonEmpty => FieldValue::Text(non_empty(raw)?.to_string()),
            Constraint::Prefix(prefix) => {
                if !non_empty(raw)?.starts_with(prefix) {
                    return Err(format!("must start with `{prefix}`"));
                }
                FieldValue::Text(raw.to_string())
            }
            Constraint::Url => {
                Url::parse(raw).map_err(|e| format!("must be a valid URL ({e})"))?;
                FieldValue::Text(raw.to_string())
            }
            Constraint::OneOf(members) => {
                if !members.contains(&raw) {
                    return Err(format!(
                        "expected one of {}, got `{raw}`",
                        members.join(", ")
                    ));
                }
                FieldValue::Text(raw.to_string())
            }
            Constraint::Port => {
                let port = non_empty(raw)?
                    .parse::<u16>()
                    .ok()
                    .filter(|port| *port != 0)
                    .ok_or_else(|| "must be a port number between 1 and 65535".to_string())?;
                FieldValue::Port(port)
            }
            Constraint::Integer { min, max } => {
                let value = non_empty(raw)?
                    .parse::<u64>()
                    .ok()
                    .filter(|value| (min..=max).contains(value))
                    .ok_or_else(|| format!("must be an integer between {min} and {max}"))?;
                FieldValue::Integer(value)
            }
            Constraint::JsonStringList {
                strip_trailing_slash,
            } => {
                let items: Vec<String> = serde_json::from_str(non_empty(raw)?)
                    .map_err(|e| format!("must be a JSON array of strings ({e})"))?;
                let items = if strip_trailing_slash {
                    items
                        .into_iter()
                        .map(|item| item.trim_end_matches('/').to_string())
                        .collect()
                } else {
                    items
                };
                FieldValue::List(items)
            }
        };

        Ok(match value {
            FieldValue::Text(text) if self.secret => FieldValue::Secret(Secret::new(text)),
            other => other,
        })
    }
}

fn non_empty(raw: &str) -> Result<&str, String> {
    if raw.is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(raw)
    }
}

/// A typed value produced by a successful field parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Secret(Secret),
    Port(u16),
    Integer(u64),
    List(Vec<String>),
}

impl FieldValue {
    fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Secret(_) => "secret",
            FieldValue::Port(_) => "port",
            FieldValue::Integer(_) => "integer",
            FieldValue::List(_) => "list",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Secret(secret) => write!(f, "{secret}"),
            FieldValue::Port(port) => write!(f, "{port}"),
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// A named, ordered set of field declarations.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { name, fields }
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Validate every declared field against `env`.
    ///
    /// Absent keys take their default (which is parsed like any other value);
    /// absent keys without a default are reported missing. Present keys,
    /// including empty ones, go through the field's constraint.
    pub fn validate<S: EnvSource + ?Sized>(
        &self,
        env: &S,
    ) -> Result<ValidatedFields, ValidationError> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut violations = Vec::new();

        for field in self.fields {
            let raw = match (env.get(field.key), field.default) {
                (Some(raw), _) => raw,
                (None, Some(default)) => default,
                (None, None) => {
                    violations.push(Violation::missing(field.key));
                    continue;
                }
            };

            match field.parse(raw) {
                Ok(value) => values.push((field.key, value)),
                Err(reason) => violations.push(Violation::malformed(field.key, reason)),
            }
        }

        if violations.is_empty() {
            Ok(ValidatedFields {
                schema: self.name,
                values,
            })
        } else {
            Err(ValidationError::new(self.name, violations))
        }
    }
}

/// Parsed values of a fully valid schema, in declaration order.
///
/// Typed records are assembled by taking each value out by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    schema: &'static str,
    values: Vec<(&'static str, FieldValue)>,
}

impl ValidatedFields {
    pub fn schema(&self) -> &'static str {
        self.schema
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    fn take(&mut self, key: &'static str) -> Result<FieldValue, ValidationError> {
        let index = self
            .values
            .iter()
            .position(|(k, _)| *k == key)
            .ok_or_else(|| self.mismatch(key, "no value declared"))?;
        Ok(self.values.remove(index).1)
    }

    fn mismatch(&self, key: &'static str, reason: &str) -> ValidationError {
        ValidationError::new(
            self.schema,
            vec![Violation::malformed(key, format!("schema mismatch: {reason}"))],
        )
    }

    fn unexpected(&self, key: &'static str, expected: &str, value: &FieldValue) -> ValidationError {
        self.mismatch(key, &format!("expected {expected}, found {}", value.kind()))
    }

    pub fn take_text(&mut self, key: &'static str) -> Result<String, ValidationError> {
        match self.take(key)? {
            FieldValue::Text(text) => Ok(text),
            other => Err(self.unexpected(key, "text", &other)),
        }
    }

    pub fn take_secret(&mut self, key: &'static str) -> Result<Secret, ValidationError> {
        match self.take(key)? {
            FieldValue::Secret(secret) => Ok(secret),
            other => Err(self.unexpected(key, "secret", &other)),
        }
    }

    pub fn take_port(&mut self, key: &'static str) -> Result<u16, ValidationError> {
        match self.take(key)? {
            FieldValue::Port(port) => Ok(port),
            other => Err(self.unexpected(key, "port", &other)),
        }
    }

    pub fn take_integer(&mut self, key: &'static str) -> Result<u64, ValidationError> {
        match self.take(key)? {
            FieldValue::Integer(value) => Ok(value),
            other => Err(self.unexpected(key, "integer", &other)),
        }
    }

    /// Take an integer field declared with a `u32` upper bound.
    pub fn take_u32(&mut self, key: &'static str) -> Result<u32, ValidationError> {
        let value = self.take_integer(key)?;
        u32::try_from(value).map_err(|_| self.mismatch(key, "integer does not fit in u32"))
    }

    pub fn take_list(&mut self, key: &'static str) -> Result<Vec<String>, ValidationError> {
        match self.take(key)? {
            FieldValue::List(items) => Ok(items),
            other => Err(self.unexpected(key, "list", &other)),
        }
    }

    pub fn take_environment(&mut self, key: &'static str) -> Result<Environment, ValidationError> {
        let text = self.take_text(key)?;
        text.parse::<Environment>()
            .map_err(|e| self.mismatch(key, &e.to_string()))
    }
}
