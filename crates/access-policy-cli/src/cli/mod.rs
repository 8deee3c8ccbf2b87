//! CLI module for the web access policy tooling
//!
//! Prints the resource schema and validates declarations offline, before an
//! orchestrator hands them to the service.

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};

use access_policy_core::{ProviderConfig, ProviderError};

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution, all validations passed
    Success = 0,
    /// Validation failed with errors
    ValidationError = 1,
    /// Validation passed with warnings
    ValidationWarning = 2,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from validation result
    pub fn from_validation_result(has_errors: bool, has_warnings: bool) -> Self {
        if has_errors {
            ExitCode::ValidationError
        } else if has_warnings {
            ExitCode::ValidationWarning
        } else {
            ExitCode::Success
        }
    }

    /// Map a failed command onto an exit code
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ProviderError>() {
            Some(ProviderError::File(_)) => ExitCode::FileError,
            Some(ProviderError::Validation(_)) => ExitCode::ValidationError,
            Some(e) if e.is_user_error() => ExitCode::InvalidInput,
            _ => ExitCode::InternalError,
        }
    }
}

/// Run the CLI with resolved provider settings and return the exit code
pub fn run(cli: Cli, provider: &ProviderConfig) -> ExitCode {
    let outcome = match cli.command {
        Commands::Schema { format } => commands::execute_schema(format),
        Commands::Validate {
            config,
            format,
            strict,
        } => commands::execute_validate(&config, format, strict, provider),
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from_error(&err)
        }
    }
}
