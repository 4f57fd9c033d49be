use std::collections::HashMap;

use pdf_insights_config::{
    EnvMap, Environment, ServiceConfig, ValidationError, Violation, WebConfig, SERVICE_SCHEMA,
    WEB_SCHEMA,
};

fn web_env() -> HashMap<String, String> {
    [
        ("DATABASE_URL", "postgresql://u:p@h/db"),
        ("NEXT_PUBLIC_URL", "https://app.example.com"),
        ("BETTER_AUTH_SECRET", "s3cret"),
        ("BETTER_AUTH_URL", "https://auth.example.com"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn service_env() -> EnvMap {
    [
        ("NODE_ENV", "production"),
        ("DATABASE_URL", "postgresql://svc@db:5432/app"),
        ("PORT", "4000"),
        ("FRONTEND_URL", r#"["https://a.com/", "https://b.com"]"#),
        ("JWT_SECRET", "jwt-secret"),
    ]
    .into_iter()
    .collect()
}

fn keys(err: &ValidationError) -> Vec<&str> {
    err.violations.iter().map(Violation::key).collect()
}

#[test]
fn web_config_round_trips_input_values() {
    let config = WebConfig::load(&web_env()).unwrap();

    assert_eq!(config.environment(), Environment::Development);
    assert_eq!(config.database_url(), "postgresql://u:p@h/db");
    assert_eq!(config.public_url(), "https://app.example.com");
    assert_eq!(config.auth_secret().expose(), "s3cret");
    assert_eq!(config.auth_url(), "https://auth.example.com");
}

#[test]
fn web_config_rejects_wrong_database_scheme() {
    let mut env = web_env();
    env.insert("DATABASE_URL".to_string(), "mysql://h/db".to_string());

    let err = WebConfig::load(&env).unwrap_err();

    assert_eq!(err.len(), 1);
    assert_eq!(
        err.violations[0],
        Violation::malformed("DATABASE_URL", "must start with `postgresql://`")
    );
}

#[test]
fn each_missing_required_key_is_reported_alone() {
    for field in WEB_SCHEMA.fields.iter().filter(|f| f.is_required()) {
        let mut env = web_env();
        env.remove(field.key);

        let err = WebConfig::load(&env).unwrap_err();

        assert_eq!(err.violations, vec![Violation::missing(field.key)]);
    }

    for field in SERVICE_SCHEMA.fields.iter().filter(|f| f.is_required()) {
        let mut env = service_env();
        env.remove(field.key);

        let err = ServiceConfig::load(&env).unwrap_err();

        assert_eq!(err.violations, vec![Violation::missing(field.key)]);
    }
}

#[test]
fn environment_mode_accepts_only_known_members() {
    for (raw, expected) in [
        ("development", Environment::Development),
        ("test", Environment::Test),
        ("production", Environment::Production),
    ] {
        let mut env = web_env();
        env.insert("NODE_ENV".to_string(), raw.to_string());
        assert_eq!(WebConfig::load(&env).unwrap().environment(), expected);
    }

    for raw in ["staging", "PRODUCTION", ""] {
        let mut env = web_env();
        env.insert("NODE_ENV".to_string(), raw.to_string());

        let err = WebConfig::load(&env).unwrap_err();

        assert_eq!(keys(&err), ["NODE_ENV"]);
        assert!(!err.violations[0].is_missing());
    }
}

#[test]
fn url_fields_keep_the_input_text() {
    let mut env = web_env();
    env.insert(
        "BETTER_AUTH_URL".to_string(),
        "https://Auth.Example.com".to_string(),
    );

    let config = WebConfig::load(&env).unwrap();

    assert_eq!(config.auth_url(), "https://Auth.Example.com");
}

#[test]
fn loading_twice_yields_equal_records() {
    let env = web_env();
    assert_eq!(WebConfig::load(&env).unwrap(), WebConfig::load(&env).unwrap());

    let env = service_env();
    assert_eq!(
        ServiceConfig::load(&env).unwrap(),
        ServiceConfig::load(&env).unwrap()
    );
}

#[test]
fn defaults_apply_only_to_absent_keys() {
    let mut env = web_env();
    env.remove("BETTER_AUTH_URL");
    let config = WebConfig::load(&env).unwrap();
    assert_eq!(config.auth_url(), "http://localhost:3000");

    env.insert("BETTER_AUTH_URL".to_string(), String::new());
    let err = WebConfig::load(&env).unwrap_err();
    assert_eq!(keys(&err), ["BETTER_AUTH_URL"]);
    assert!(!err.violations[0].is_missing());

    let mut env = service_env();
    env.remove("PORT");
    let err = ServiceConfig::load(&env).unwrap_err();
    assert_eq!(err.violations, vec![Violation::missing("PORT")]);
}

#[test]
fn violations_are_aggregated_in_declaration_order() {
    let mut env = web_env();
    env.remove("NEXT_PUBLIC_URL");
    env.remove("DATABASE_URL");
    env.insert("BETTER_AUTH_URL".to_string(), "not a url".to_string());

    let err = WebConfig::load(&env).unwrap_err();

    assert_eq!(err.len(), 3);
    assert_eq!(
        keys(&err),
        ["DATABASE_URL", "NEXT_PUBLIC_URL", "BETTER_AUTH_URL"]
    );
    assert!(err.violations[0].is_missing());
    assert!(err.violations[1].is_missing());
    assert!(!err.violations[2].is_missing());

    let report = err.to_string();
    assert!(report.starts_with("invalid web configuration: 3 violations"));
    assert_eq!(report.lines().count(), 4);
}

#[test]
fn service_config_decodes_frontend_origins() {
    let config = ServiceConfig::load(&service_env()).unwrap();

    assert_eq!(config.environment(), Environment::Production);
    assert_eq!(config.port(), 4000);
    assert_eq!(config.frontend_origins(), ["https://a.com", "https://b.com"]);
    assert_eq!(config.jwt_secret().expose(), "jwt-secret");
}

#[test]
fn service_config_rejects_malformed_list_and_port() {
    let mut env = service_env();
    env.insert("FRONTEND_URL", "https://a.com");
    env.insert("PORT", "http");

    let err = ServiceConfig::load(&env).unwrap_err();

    assert_eq!(keys(&err), ["PORT", "FRONTEND_URL"]);
}

#[test]
fn failure_report_never_contains_secret_values() {
    let mut env = web_env();
    env.insert("NODE_ENV".to_string(), "staging".to_string());
    let err = WebConfig::load(&env).unwrap_err();
    assert!(!err.to_string().contains("s3cret"));

    let config = ServiceConfig::load(&service_env()).unwrap();
    assert!(!format!("{config:?}").contains("jwt-secret"));
}

#[test]
fn loading_does_not_mutate_the_mapping() {
    let env = service_env();
    let before = env.clone();
    let _ = ServiceConfig::load(&env);
    assert_eq!(env, before);
}
