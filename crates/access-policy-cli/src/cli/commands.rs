//! CLI command definitions
//!
//! Clap-based commands for printing the web access policy schema and
//! validating declarations against it offline.

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use access_policy_core::{
    web_access_policy, DeclarationFormat, LogFormat, ProviderConfig, WEB_ACCESS_POLICY_RESOURCE,
};

use super::output::{OutputFormat, ValidationReport};
use super::ExitCode;

/// Web access policy tooling
///
/// Inspect the resource schema and validate declarations before they reach
/// the access-policy service.
#[derive(Parser, Debug)]
#[command(name = "web-access-policy")]
#[command(about = "Inspect and validate web access policy declarations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log filter directive (overrides WEB_ACCESS_POLICY_LOG)
    #[arg(long, global = true)]
    pub log: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Provider configuration file (TOML)
    #[arg(long, global = true, env = "WEB_ACCESS_POLICY_CONFIG")]
    pub provider_config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the web access policy schema
    Schema {
        #[arg(long, value_enum, default_value = "json")]
        format: SchemaFormat,
    },

    /// Validate a declaration file (JSON, YAML or TOML)
    Validate {
        /// Path to the declaration to validate
        #[arg(short, long)]
        config: PathBuf,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Treat unknown fields as errors
        #[arg(long)]
        strict: bool,
    },
}

/// Output formats of the schema command
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum SchemaFormat {
    Json,
    Yaml,
}

impl Cli {
    /// Resolve provider settings: file, then environment, then flags
    pub fn provider_config(&self) -> anyhow::Result<ProviderConfig> {
        let base = match &self.provider_config {
            Some(path) => ProviderConfig::from_toml_file(path)?,
            None => ProviderConfig::default(),
        };
        let mut config = base.with_env_overrides()?;

        if let Some(filter) = &self.log {
            config.log_filter = filter.clone();
        }
        if self.log_json {
            config.log_format = LogFormat::Json;
        }
        Ok(config)
    }
}

/// Execute the schema command
pub fn execute_schema(format: SchemaFormat) -> anyhow::Result<ExitCode> {
    let resource = web_access_policy();
    let document = json!({
        "resource": WEB_ACCESS_POLICY_RESOURCE,
        "schema": resource.schema,
    });

    match format {
        SchemaFormat::Json => println!("{}", serde_json::to_string_pretty(&document)?),
        SchemaFormat::Yaml => print!("{}", serde_yaml::to_string(&document)?),
    }
    Ok(ExitCode::Success)
}

/// Execute the validate command
pub fn execute_validate(
    path: &Path,
    format: OutputFormat,
    strict: bool,
    provider: &ProviderConfig,
) -> anyhow::Result<ExitCode> {
    let report = validate_file(path, strict || provider.strict_schema)?;
    report.render(format)?;
    Ok(ExitCode::from_validation_result(
        !report.valid,
        report.warning_count > 0,
    ))
}

/// Load and validate one declaration file
pub fn validate_file(path: &Path, strict: bool) -> access_policy_core::Result<ValidationReport> {
    let declaration = DeclarationFormat::read_file(path)?;

    tracing::debug!(file = %path.display(), strict, "validating declaration");
    let resource = web_access_policy();
    let result = resource.validate(&declaration, strict);
    let report = ValidationReport::new(path.display().to_string(), &result);

    match declaration {
        Value::Object(mut values) if result.valid => {
            resource.schema.apply_defaults(&mut values);
            Ok(report.with_resolved(Value::Object(values)))
        }
        _ => Ok(report),
    }
}
