pub mod app;
pub mod auth;
pub mod security;
pub mod server;

use thiserror::Error;

pub use app::{AppConfig, AppMetadata, DEVELOPMENT_SECRET_KEY, Environment, MIN_SECRET_KEY_LENGTH};
pub use auth::{Argon2Config, PasswordConfig, SameSitePolicy, SessionConfig};
pub use security::RateLimitConfig;
pub use server::{DatabaseConfig, ObservabilityConfig, ServerConfig};

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Sanity checks run after deserialization
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Load the application configuration from files and environment variables
pub fn load() -> Result<AppConfig, ConfigError> {
    app::load_config()
}
