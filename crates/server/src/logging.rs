//! Tracing setup.
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `RUST_LOG` | Filter directives | `info,pdf_insights_server=debug,tower_http=debug` |
//! | `LOG_FORMAT` | `json` or `pretty` | `pretty` |

use pdf_insights_config::EnvMap;
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,pdf_insights_server=debug,tower_http=debug";

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging settings read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LogSettings {
    #[serde(default)]
    pub log_format: LogFormat,
}

impl LogSettings {
    /// Read logging settings from an environment snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if `LOG_FORMAT` is set to an unknown format.
    pub fn from_env_map(env: &EnvMap) -> Result<Self, envy::Error> {
        envy::from_iter(
            env.iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        )
    }
}

/// Install the global tracing subscriber.
pub fn init_tracing(settings: &LogSettings) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let registry = tracing_subscriber::registry().with(filter);
    match settings.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        let settings = LogSettings::from_env_map(&EnvMap::new()).unwrap();
        assert_eq!(settings.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_json_format() {
        let env: EnvMap = [("LOG_FORMAT", "json"), ("PORT", "8080")]
            .into_iter()
            .collect();
        let settings = LogSettings::from_env_map(&env).unwrap();
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_format() {
        let env: EnvMap = [("LOG_FORMAT", "xml")].into_iter().collect();
        assert!(LogSettings::from_env_map(&env).is_err());
    }
}
