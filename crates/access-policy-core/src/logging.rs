//! Logging bootstrap
//!
//! The library only emits `tracing` events. Binaries and test harnesses call
//! [`init`] once to install a subscriber matching the [`ProviderConfig`].

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, ProviderConfig};
use crate::error::{ProviderError, Result};

/// Build the event filter, letting `RUST_LOG` take precedence
pub fn env_filter(config: &ProviderConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_filter).map_err(|e| {
        ProviderError::config_error(format!("invalid log filter '{}': {}", config.log_filter, e))
    })
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &ProviderConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match config.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| ProviderError::config_error(format!("logging already initialized: {}", e)))
}
