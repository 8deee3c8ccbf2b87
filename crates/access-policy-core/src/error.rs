//! Error types for the access policy adapter
//!
//! Provides structured error types for integration, remote service,
//! validation, parsing and I/O failures.

use thiserror::Error;

use crate::client::ServiceError;
use crate::schema::ValidationResult;

/// Main error type for resource operations
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider meta handed to an operation is not the expected service
    #[error("Integration error: unable to cast provider meta to {expected}")]
    Integration {
        /// Name of the type the operation required
        expected: &'static str,
    },

    /// Failure reported by the remote access-policy service
    #[error(transparent)]
    Remote(#[from] ServiceError),

    /// Declared configuration failed schema validation
    #[error("Validation failed with {} error(s): {}", .0.errors().len(), .0.summary())]
    Validation(ValidationResult),

    /// Configuration parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    File(String),

    /// Provider configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    /// Create an integration error for the given expected type
    pub fn integration(expected: &'static str) -> Self {
        ProviderError::Integration { expected }
    }

    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        ProviderError::Parse(msg.into())
    }

    /// Create a configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        ProviderError::Config(msg.into())
    }

    /// Check if this is a user-facing error (vs host/integration or remote)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ProviderError::Validation(_)
                | ProviderError::Parse(_)
                | ProviderError::File(_)
                | ProviderError::Config(_)
        )
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        ProviderError::File(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for ProviderError {
    fn from(err: serde_yaml::Error) -> Self {
        ProviderError::Parse(format!("YAML error: {}", err))
    }
}

impl From<toml::de::Error> for ProviderError {
    fn from(err: toml::de::Error) -> Self {
        ProviderError::Parse(format!("TOML error: {}", err))
    }
}

/// Result type alias for resource operations
pub type Result<T> = std::result::Result<T, ProviderError>;
