//! Provider configuration
//!
//! Settings that shape how declarations are validated and how the adapter
//! logs. Values come from defaults, a TOML file, or environment variables:
//!
//! | Variable | Field | Default |
//! |---|---|---|
//! | `WEB_ACCESS_POLICY_LOG` | `log_filter` | `warn` |
//! | `WEB_ACCESS_POLICY_LOG_FORMAT` | `log_format` | `pretty` |
//! | `WEB_ACCESS_POLICY_STRICT` | `strict_schema` | `false` |

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ProviderError, Result};

/// Output format of log events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ProviderError::config_error(format!(
                "unknown log format '{}', expected 'pretty' or 'json'",
                other
            ))),
        }
    }
}

/// Provider-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// `tracing` filter directive, e.g. `info` or `access_policy_core=debug`
    pub log_filter: String,

    pub log_format: LogFormat,

    /// Treat unknown declaration fields as errors instead of warnings
    pub strict_schema: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            log_format: LogFormat::Pretty,
            strict_schema: false,
        }
    }
}

impl ProviderConfig {
    /// Create a new config builder
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::new()
    }

    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of this config
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(filter) = std::env::var("WEB_ACCESS_POLICY_LOG") {
            self.log_filter = filter;
        }
        if let Ok(format) = std::env::var("WEB_ACCESS_POLICY_LOG_FORMAT") {
            self.log_format = format.parse()?;
        }
        if let Ok(strict) = std::env::var("WEB_ACCESS_POLICY_STRICT") {
            self.strict_schema = parse_flag(&strict).ok_or_else(|| {
                ProviderError::config_error(format!(
                    "WEB_ACCESS_POLICY_STRICT must be a boolean, got '{}'",
                    strict
                ))
            })?;
        }
        Ok(self)
    }

    /// Parse config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ProviderError::config_error(e.to_string()))
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ProviderError::File(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Builder for ProviderConfig
#[derive(Debug, Default)]
pub struct ProviderConfigBuilder {
    config: ProviderConfig,
}

impl ProviderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.log_filter = filter.into();
        self
    }

    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.config.log_format = format;
        self
    }

    pub fn strict_schema(mut self, strict: bool) -> Self {
        self.config.strict_schema = strict;
        self
    }

    pub fn build(self) -> ProviderConfig {
        self.config
    }
}
