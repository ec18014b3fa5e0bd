use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::ObservabilityConfig;

/// Build the filter: `RUST_LOG` wins over the configured level
pub fn filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(config: &ObservabilityConfig) {
    let builder = fmt().with_env_filter(filter(config)).with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        ::tracing::debug!("Tracing subscriber already installed: {}", e);
    }
}
