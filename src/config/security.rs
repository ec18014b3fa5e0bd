use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate};

/// Per-client throttling of form submissions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Submissions allowed per window
    #[serde(default = "default_requests")]
    pub requests: u32,
    /// Window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
    /// Key clients on `Forwarded`/`X-Forwarded-For` instead of the socket
    /// address. Only safe behind a reverse proxy that overwrites them.
    #[serde(default)]
    pub trust_forwarded: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_requests() -> u32 {
    100
}

fn default_window_seconds() -> u64 {
    3600 // "100 per hour"
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            requests: default_requests(),
            window_seconds: default_window_seconds(),
            trust_forwarded: false,
        }
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.requests == 0 {
            return Err(ConfigError::ValidationError("rate_limit.requests must be > 0".to_string()));
        }
        if self.window_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "rate_limit.window_seconds must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
