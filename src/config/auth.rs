use actix_web::cookie::SameSite;
use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate};

/// One year, in seconds
pub const MAX_SESSION_LIFETIME: u64 = 365 * 24 * 60 * 60;

/// Session cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session lifetime in seconds
    #[serde(default = "default_lifetime")]
    pub lifetime: u64,
    /// Interval in seconds between sweeps of expired sessions
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval: u64,
    /// Only send the cookie over HTTPS
    #[serde(default)]
    pub secure: bool,
    /// Hide the cookie from client scripts
    #[serde(default = "default_http_only")]
    pub http_only: bool,
    #[serde(default = "default_same_site")]
    pub same_site: SameSitePolicy,
}

/// SameSite attribute of the session cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    Strict,
    Lax,
    None,
}

impl From<SameSitePolicy> for SameSite {
    fn from(policy: SameSitePolicy) -> Self {
        match policy {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::Lax => SameSite::Lax,
            SameSitePolicy::None => SameSite::None,
        }
    }
}

/// Password policy and hashing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordConfig {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_true")]
    pub require_uppercase: bool,
    #[serde(default = "default_true")]
    pub require_lowercase: bool,
    #[serde(default = "default_true")]
    pub require_digits: bool,
    #[serde(default)]
    pub require_special: bool,
    /// Argon2 configuration
    #[serde(default = "Argon2Config::default")]
    pub argon2: Argon2Config,
}

/// Argon2 password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    /// Memory cost in KB (64MB = 65536 KB)
    #[serde(default = "default_argon2_memory_cost")]
    pub memory_cost: u32,
    /// Time cost (iterations)
    #[serde(default = "default_argon2_time_cost")]
    pub time_cost: u32,
    /// Parallelism (number of lanes)
    #[serde(default = "default_argon2_parallelism")]
    pub parallelism: u32,
    /// Hash length in bytes
    #[serde(default = "default_argon2_hash_length")]
    pub hash_length: u32,
}

fn default_cookie_name() -> String {
    "session".to_string()
}

fn default_lifetime() -> u64 {
    24 * 60 * 60
}

fn default_cleanup_interval() -> u64 {
    900 // 15 minutes
}

fn default_http_only() -> bool {
    true
}

fn default_same_site() -> SameSitePolicy {
    SameSitePolicy::Lax
}

fn default_min_length() -> usize {
    8
}

fn default_max_length() -> usize {
    128
}

fn default_true() -> bool {
    true
}

fn default_argon2_memory_cost() -> u32 {
    65536 // 64 MB
}

fn default_argon2_time_cost() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_argon2_hash_length() -> u32 {
    32
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            lifetime: default_lifetime(),
            cleanup_interval: default_cleanup_interval(),
            secure: false,
            http_only: default_http_only(),
            same_site: default_same_site(),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            require_uppercase: true,
            require_lowercase: true,
            require_digits: true,
            require_special: false,
            argon2: Argon2Config::default(),
        }
    }
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost: default_argon2_memory_cost(),
            time_cost: default_argon2_time_cost(),
            parallelism: default_argon2_parallelism(),
            hash_length: default_argon2_hash_length(),
        }
    }
}

impl Argon2Config {
    /// Cheap parameters for the test profile
    pub fn light() -> Self {
        Self {
            memory_cost: 19456,
            time_cost: 1,
            parallelism: 1,
            hash_length: 32,
        }
    }
}

impl Validate for SessionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.cookie_name.is_empty() {
            return Err(ConfigError::ValidationError("session.cookie_name cannot be empty".to_string()));
        }
        if self.lifetime == 0 {
            return Err(ConfigError::ValidationError("session.lifetime must be > 0".to_string()));
        }
        if self.lifetime > MAX_SESSION_LIFETIME {
            return Err(ConfigError::ValidationError(format!(
                "session.lifetime must be at most {MAX_SESSION_LIFETIME} seconds"
            )));
        }
        if self.cleanup_interval == 0 {
            return Err(ConfigError::ValidationError(
                "session.cleanup_interval must be > 0".to_string(),
            ));
        }
        if self.same_site == SameSitePolicy::None && !self.secure {
            return Err(ConfigError::ValidationError(
                "session.same_site = none requires session.secure".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for PasswordConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length == 0 {
            return Err(ConfigError::ValidationError("password.min_length must be > 0".to_string()));
        }
        if self.min_length > self.max_length {
            return Err(ConfigError::ValidationError(
                "password.min_length cannot exceed password.max_length".to_string(),
            ));
        }
        self.argon2.validate()
    }
}

impl Validate for Argon2Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_cost == 0 {
            return Err(ConfigError::ValidationError("password.argon2.memory_cost must be > 0".to_string()));
        }
        if self.time_cost == 0 {
            return Err(ConfigError::ValidationError("password.argon2.time_cost must be > 0".to_string()));
        }
        if self.parallelism == 0 {
            return Err(ConfigError::ValidationError("password.argon2.parallelism must be > 0".to_string()));
        }
        if self.hash_length == 0 {
            return Err(ConfigError::ValidationError("password.argon2.hash_length must be > 0".to_string()));
        }
        Ok(())
    }
}
