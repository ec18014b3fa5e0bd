//! Configuration loading from profile defaults, `config/*.toml` and the environment

use lighter_signin::config::app::load_for;
use lighter_signin::config::*;
use serial_test::serial;

mod utils {
    /// Remove every variable that could leak into a load
    pub fn clean_env_vars() {
        let keys: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| {
                key.starts_with("LIGHTER_SIGNIN")
                    || ["APP_ENV", "DATABASE_URL", "SECRET_KEY", "LOG_LEVEL", "PORT"]
                        .contains(&key.as_str())
            })
            .collect();

        for key in keys {
            unsafe { std::env::remove_var(&key) };
        }
    }

    pub fn set(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }
}

#[test]
#[serial]
fn test_development_defaults_from_files() {
    utils::clean_env_vars();

    let config = load_for(Environment::Development).unwrap();

    assert_eq!(config.app.name, "lighter-signin");
    assert_eq!(config.app.environment, Environment::Development);
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.database.url, "sqlite://lighter-signin.db?mode=rwc");
    assert_eq!(config.observability.log_level, "debug");
    assert!(!config.session.secure);
    assert_eq!(config.session.same_site, SameSitePolicy::Lax);
}

#[test]
#[serial]
fn test_testing_profile_uses_memory_database() {
    utils::clean_env_vars();

    let config = load_for(Environment::Testing).unwrap();

    assert_eq!(config.database.url, "sqlite::memory:");
    assert_eq!(config.database.max_connections, 1);
    assert!(!config.rate_limit.enabled);
}

#[test]
#[serial]
fn test_prefixed_env_vars_override_files() {
    utils::clean_env_vars();
    utils::set("LIGHTER_SIGNIN__SERVER__PORT", "8081");
    utils::set("LIGHTER_SIGNIN__SESSION__COOKIE_NAME", "sid");

    let config = load_for(Environment::Development);
    utils::clean_env_vars();

    let config = config.unwrap();
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.session.cookie_name, "sid");
}

#[test]
#[serial]
fn test_platform_vars_win() {
    utils::clean_env_vars();
    utils::set("LIGHTER_SIGNIN__SERVER__PORT", "8081");
    utils::set("PORT", "9000");
    utils::set("DATABASE_URL", "postgres://user:pass@db:5432/app");

    let config = load_for(Environment::Development);
    utils::clean_env_vars();

    let config = config.unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.database.url, "postgres://user:pass@db:5432/app");
}

#[test]
#[serial]
fn test_production_requires_secret_key() {
    utils::clean_env_vars();

    let error = load_for(Environment::Production).unwrap_err();
    assert!(error.to_string().contains("secret_key"));

    utils::set("SECRET_KEY", &"s".repeat(48));
    let config = load_for(Environment::Production);
    utils::clean_env_vars();

    let config = config.unwrap();
    assert!(config.session.secure);
    assert!(config.observability.json);
    assert_eq!(config.session.lifetime, 43200);
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
#[serial]
fn test_app_env_selects_profile() {
    utils::clean_env_vars();
    utils::set("APP_ENV", "testing");

    let config = load();
    utils::clean_env_vars();

    assert_eq!(config.unwrap().app.environment, Environment::Testing);
}

#[test]
#[serial]
fn test_invalid_env_value_rejected() {
    utils::clean_env_vars();
    utils::set("LIGHTER_SIGNIN__RATE_LIMIT__WINDOW_SECONDS", "0");

    let result = load_for(Environment::Development);
    utils::clean_env_vars();

    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}
