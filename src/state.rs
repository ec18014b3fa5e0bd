use std::time::Duration;

use actix_web::cookie::Key;
use actix_web::web::{self, Data, ServiceConfig};
use anyhow::Context;
use sea_orm::DatabaseConnection;

use crate::config::{AppConfig, MIN_SECRET_KEY_LENGTH};
use crate::middlewares::v1::session::SessionCache;
use crate::security::{IpRateLimiter, PasswordHasher};
use crate::utils::{DEFAULT_TOKEN_LENGTH, generate_random_token};

/// Everything a handler needs besides the database connection
pub struct AppState {
    pub config: AppConfig,
    pub hasher: PasswordHasher,
    pub sessions: SessionCache,
    /// Signs session cookies, derived from `app.secret_key`
    pub key: Key,
    /// Shared by every worker's rate limit middleware
    pub limiter: IpRateLimiter,
    /// Verified against when no user matches a login, so unknown emails
    /// cost the same argon2 work as known ones
    pub dummy_hash: String,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let hasher = PasswordHasher::from_config(&config.password.argon2)
            .map_err(|e| anyhow::anyhow!("Invalid argon2 parameters: {e}"))?;

        if config.app.secret_key.len() < MIN_SECRET_KEY_LENGTH {
            anyhow::bail!("app.secret_key must be at least {MIN_SECRET_KEY_LENGTH} bytes");
        }

        let key = Key::derive_from(config.app.secret_key.as_bytes());
        let dummy_hash = hasher
            .hash(&generate_random_token(DEFAULT_TOKEN_LENGTH))
            .map_err(|e| anyhow::anyhow!("Failed to hash dummy password: {e}"))?;
        let limiter = IpRateLimiter::new(config.rate_limit.clone());

        Ok(Self {
            config,
            hasher,
            sessions: SessionCache::new(),
            key,
            limiter,
            dummy_hash,
        })
    }

    pub fn session_lifetime(&self) -> Duration {
        Duration::from_secs(self.config.session.lifetime)
    }
}

/// Register shared data and extractor limits on an app
pub fn configure(
    db: Data<DatabaseConnection>,
    state: Data<AppState>,
) -> impl FnOnce(&mut ServiceConfig) {
    move |app: &mut ServiceConfig| {
        let limit = state.config.server.max_content_length;

        app.app_data(db);
        app.app_data(state);
        app.app_data(web::FormConfig::default().limit(limit));
    }
}

/// Build state from configuration, with context for startup errors
pub fn build(config: AppConfig) -> anyhow::Result<Data<AppState>> {
    let state = AppState::new(config).context("Failed to build application state")?;

    Ok(Data::new(state))
}
