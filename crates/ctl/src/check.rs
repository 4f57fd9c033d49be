//! `check` and `schema` commands.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use pdf_insights_config::{
    EnvMap, FieldValue, Schema, ServiceConfig, ValidationError, WebConfig, SERVICE_SCHEMA,
    WEB_SCHEMA,
};
use serde_json::json;
use url::Url;

/// Schema variant selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// Client-facing web application
    Web,
    /// Service process
    Service,
}

impl Profile {
    pub fn schema(self) -> &'static Schema {
        match self {
            Profile::Web => &WEB_SCHEMA,
            Profile::Service => &SERVICE_SCHEMA,
        }
    }

    fn load(self, env: &EnvMap) -> Result<(), ValidationError> {
        match self {
            Profile::Web => WebConfig::load(env).map(drop),
            Profile::Service => ServiceConfig::load(env).map(drop),
        }
    }
}

pub struct CheckOutcome {
    pub valid: bool,
    pub output: String,
}

/// Build the environment to check.
pub fn build_env(env_file: Option<&Path>, include_process: bool) -> Result<EnvMap> {
    let mut env = if include_process {
        EnvMap::from_process()
    } else {
        EnvMap::new()
    };

    if let Some(path) = env_file {
        let file = EnvMap::from_env_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        env.overlay(file);
    }

    Ok(env)
}

/// Validate `env` against `profile` and render the report.
pub fn run_check(profile: Profile, env: &EnvMap, as_json: bool) -> Result<CheckOutcome> {
    let schema = profile.schema();

    let (valid, output) = match profile.load(env) {
        Ok(()) => {
            let fields = schema.validate(env)?;
            let summary: Vec<(&str, String)> = fields
                .iter()
                .map(|(key, value)| (key, display_value(value)))
                .collect();

            let output = if as_json {
                let fields: serde_json::Map<String, serde_json::Value> = summary
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value.into()))
                    .collect();
                serde_json::to_string_pretty(&json!({
                    "schema": schema.name,
                    "valid": true,
                    "fields": fields,
                }))?
            } else {
                let mut out = format!("OK: {} configuration is valid", schema.name);
                for (key, value) in summary {
                    write!(out, "\n  {key} = {value}")?;
                }
                out
            };
            (true, output)
        }
        Err(err) => {
            let output = if as_json {
                serde_json::to_string_pretty(&json!({
                    "schema": err.schema,
                    "valid": false,
                    "violations": err.violations,
                }))?
            } else {
                err.to_string()
            };
            (false, output)
        }
    };

    Ok(CheckOutcome { valid, output })
}

/// Render a value for the operator, hiding secrets and connection passwords.
///
/// URL-valued fields are stored as text, so every text value that parses as a
/// URL with a password is masked.
fn display_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => match Url::parse(text) {
            Ok(mut url) if url.password().is_some() => {
                let _ = url.set_password(Some("****"));
                url.to_string()
            }
            _ => text.clone(),
        },
        other => other.to_string(),
    }
}

/// Render the schema declaration as a table.
pub fn render_schema(profile: Profile) -> String {
    let schema = profile.schema();
    let mut out = format!("{} schema\n", schema.name);
    let _ = writeln!(
        out,
        "{:<20} {:<32} {:<50} DESCRIPTION",
        "KEY", "DEFAULT", "CONSTRAINT"
    );
    for field in schema.fields {
        let default = field.default.unwrap_or("(required)");
        let constraint = if field.secret {
            format!("{}, secret", field.constraint)
        } else {
            field.constraint.to_string()
        };
        let _ = writeln!(
            out,
            "{:<20} {:<32} {:<50} {}",
            field.key, default, constraint, field.description
        );
    }
    out
}
