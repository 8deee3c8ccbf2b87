//! Output formatting for the web access policy CLI
//!
//! Renders validation results as a colored table, JSON or YAML.

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

use access_policy_core::{ValidationFinding, ValidationResult, ValidationSeverity};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Validation report as rendered by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub file: String,
    pub valid: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub findings: Vec<ValidationFinding>,
    /// Declaration with schema defaults filled in, present when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<serde_json::Value>,
}

impl ValidationReport {
    pub fn new(file: impl Into<String>, result: &ValidationResult) -> Self {
        Self {
            file: file.into(),
            valid: result.valid,
            error_count: result.errors().len(),
            warning_count: result.warnings().len(),
            findings: result.findings.clone(),
            resolved: None,
        }
    }

    pub fn with_resolved(mut self, resolved: serde_json::Value) -> Self {
        self.resolved = Some(resolved);
        self
    }

    pub fn summary(&self) -> String {
        if self.valid && self.warning_count == 0 {
            format!("{}: valid", self.file)
        } else if self.valid {
            format!("{}: valid with {} warning(s)", self.file, self.warning_count)
        } else {
            format!(
                "{}: invalid, {} error(s), {} warning(s)",
                self.file, self.error_count, self.warning_count
            )
        }
    }

    /// Write the report to stdout in the given format
    pub fn render(&self, format: OutputFormat) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_to(&mut out, format)
    }

    pub fn write_to(&self, out: &mut impl Write, format: OutputFormat) -> anyhow::Result<()> {
        match format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(self)?)?,
            OutputFormat::Yaml => write!(out, "{}", serde_yaml::to_string(self)?)?,
            OutputFormat::Table => self.write_table(out)?,
        }
        Ok(())
    }

    fn write_table(&self, out: &mut impl Write) -> io::Result<()> {
        for finding in &self.findings {
            let severity = match finding.severity {
                ValidationSeverity::Error => "error".red().bold(),
                ValidationSeverity::Warning => "warning".yellow().bold(),
                ValidationSeverity::Info => "info".blue(),
            };
            writeln!(
                out,
                "{:<8} {:<16} {:<48} {}",
                severity, finding.code, finding.path, finding.message
            )?;
        }

        let summary = self.summary();
        if self.valid {
            writeln!(out, "{}", summary.green())
        } else {
            writeln!(out, "{}", summary.red())
        }
    }
}
