use serde::{Deserialize, Serialize};

use super::{
    Argon2Config, ConfigError, DatabaseConfig, ObservabilityConfig, PasswordConfig,
    RateLimitConfig, ServerConfig, SessionConfig, Validate,
};

/// Secret shipped for local development only; production refuses it.
pub const DEVELOPMENT_SECRET_KEY: &str = "dev-secret-key-change-in-production";

/// Minimum secret length accepted for cookie signing
pub const MIN_SECRET_KEY_LENGTH: usize = 32;

/// Top-level application configuration that aggregates all config modules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    pub app: AppMetadata,
    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection and schema bootstrap
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session cookie
    #[serde(default)]
    pub session: SessionConfig,
    /// Password policy and hashing
    #[serde(default)]
    pub password: PasswordConfig,
    /// Form submission throttling
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Logging
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub environment: Environment,
    /// Key used to sign session cookies
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
}

/// Deployment profile, selected by `APP_ENV`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Resolve a profile name; unknown names fall back to development
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        }
    }
}

fn default_app_name() -> String {
    "lighter-signin".to_string()
}

fn default_secret_key() -> String {
    DEVELOPMENT_SECRET_KEY.to_string()
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            environment: Environment::default(),
            secret_key: default_secret_key(),
        }
    }
}

impl AppConfig {
    /// Defaults for the given deployment profile
    pub fn for_environment(environment: Environment) -> Self {
        let mut config = Self {
            app: AppMetadata {
                environment,
                ..AppMetadata::default()
            },
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            session: SessionConfig::default(),
            password: PasswordConfig::default(),
            rate_limit: RateLimitConfig::default(),
            observability: ObservabilityConfig::default(),
        };

        match environment {
            Environment::Development => {
                config.observability.log_level = "debug".to_string();
            }
            Environment::Production => {
                config.server.host = "0.0.0.0".to_string();
                config.session.secure = true;
                config.session.lifetime = 12 * 60 * 60;
            }
            Environment::Testing => {
                config.database = DatabaseConfig::memory();
                config.password.argon2 = Argon2Config::light();
                config.rate_limit.enabled = false;
            }
        }

        config
    }

    /// Apply the plain variables that hosting platforms inject
    /// (`DATABASE_URL`, `SECRET_KEY`, `LOG_LEVEL`, `PORT`).
    pub fn apply_platform_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            self.database.url = url;
        }
        if let Some(secret) = lookup("SECRET_KEY").filter(|secret| !secret.is_empty()) {
            self.app.secret_key = secret;
        }
        if let Some(level) = lookup("LOG_LEVEL").filter(|level| !level.is_empty()) {
            self.observability.log_level = level.to_lowercase();
        }
        if let Some(port) = lookup("PORT").filter(|port| !port.is_empty()) {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::ValidationError(format!("PORT is not a valid port: {port}")))?;
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl Validate for AppMetadata {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError("app.name cannot be empty".to_string()));
        }
        if self.secret_key.len() < MIN_SECRET_KEY_LENGTH {
            return Err(ConfigError::ValidationError(format!(
                "app.secret_key must be at least {MIN_SECRET_KEY_LENGTH} bytes"
            )));
        }
        if self.environment == Environment::Production && self.secret_key == DEVELOPMENT_SECRET_KEY {
            return Err(ConfigError::ValidationError(
                "app.secret_key must be set in production".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.app.validate()?;
        self.server.validate()?;
        self.database.validate()?;
        self.session.validate()?;
        self.password.validate()?;
        self.rate_limit.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

/// Load configuration from files and environment variables
///
/// Configuration loading follows this precedence (highest to lowest):
/// 1. Platform variables: DATABASE_URL, SECRET_KEY, LOG_LEVEL, PORT
/// 2. Environment variables: LIGHTER_SIGNIN__SERVER__PORT=8080
/// 3. config/local.toml (git-ignored, developer overrides)
/// 4. config/{APP_ENV}.toml (development/production/testing)
/// 5. config/default.toml
/// 6. Built-in defaults of the selected profile
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let environment = Environment::from_name(&std::env::var("APP_ENV").unwrap_or_default());

    load_for(environment)
}

/// Load configuration for an explicit profile
pub fn load_for(environment: Environment) -> Result<AppConfig, ConfigError> {
    use config::{Config, Environment as EnvironmentSource, File};

    let defaults = Config::try_from(&AppConfig::for_environment(environment))?;

    let config = Config::builder()
        .add_source(defaults)
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", environment.as_str())).required(false))
        .add_source(File::with_name("config/local").required(false))
        .add_source(EnvironmentSource::with_prefix("LIGHTER_SIGNIN").separator("__"))
        .build()?;

    let mut app_config: AppConfig = config.try_deserialize()?;
    app_config.app.environment = environment;
    app_config.apply_platform_overrides(|key| std::env::var(key).ok())?;
    app_config.validate()?;

    Ok(app_config)
}
