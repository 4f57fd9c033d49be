//! Settings handed to the authentication collaborator.
//!
//! Credential checks and session issuance belong to the external auth
//! service. This module only derives what it is configured with.

use pdf_insights_config::{Secret, ServiceConfig};

/// Prefix for every cookie the auth collaborator sets.
pub const COOKIE_PREFIX: &str = "pdfInsights";

const SECURE_COOKIE_PREFIX: &str = "__Secure-";

#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Token signing key, handed over opaquely
    pub signing_secret: Secret,

    /// Origins allowed to make credentialed requests
    pub trusted_origins: Vec<String>,

    /// Mark cookies `Secure` (production only)
    pub use_secure_cookies: bool,

    pub cookie_prefix: &'static str,
}

impl AuthSettings {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            signing_secret: config.jwt_secret().clone(),
            trusted_origins: config.frontend_origins().to_vec(),
            use_secure_cookies: config.environment().is_production(),
            cookie_prefix: COOKIE_PREFIX,
        }
    }

    /// Name of the session cookie.
    ///
    /// Secure cookies carry the `__Secure-` prefix so browsers refuse them
    /// over plain HTTP.
    pub fn session_cookie_name(&self) -> String {
        let name = format!("{}.session_token", self.cookie_prefix);
        if self.use_secure_cookies {
            format!("{SECURE_COOKIE_PREFIX}{name}")
        } else {
            name
        }
    }

    pub fn is_trusted_origin(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        self.trusted_origins.iter().any(|trusted| trusted == origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_insights_config::EnvMap;

    fn config(node_env: &str) -> ServiceConfig {
        let env: EnvMap = [
            ("NODE_ENV", node_env),
            ("DATABASE_URL", "postgresql://u:p@h/db"),
            ("PORT", "8080"),
            ("FRONTEND_URL", r#"["https://app.example.com/"]"#),
            ("JWT_SECRET", "jwt"),
        ]
        .into_iter()
        .collect();
        ServiceConfig::load(&env).unwrap()
    }

    #[test]
    fn test_secure_cookies_only_in_production() {
        assert!(AuthSettings::from_config(&config("production")).use_secure_cookies);
        assert!(!AuthSettings::from_config(&config("development")).use_secure_cookies);
        assert!(!AuthSettings::from_config(&config("test")).use_secure_cookies);
    }

    #[test]
    fn test_session_cookie_name() {
        assert_eq!(
            AuthSettings::from_config(&config("production")).session_cookie_name(),
            "__Secure-pdfInsights.session_token"
        );
        assert_eq!(
            AuthSettings::from_config(&config("development")).session_cookie_name(),
            "pdfInsights.session_token"
        );
    }

    #[test]
    fn test_trusted_origins() {
        let auth = AuthSettings::from_config(&config("test"));
        assert!(auth.is_trusted_origin("https://app.example.com"));
        assert!(auth.is_trusted_origin("https://app.example.com/"));
        assert!(!auth.is_trusted_origin("https://evil.example.com"));
        assert_eq!(auth.signing_secret.expose(), "jwt");
        assert_eq!(format!("{auth:?}").matches("jwt").count(), 0);
    }
}
