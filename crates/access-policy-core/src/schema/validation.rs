//! Validation findings produced while checking a declaration against a schema

use serde::{Deserialize, Serialize};

/// Severity levels for validation findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    /// Declaration is rejected
    Error,
    /// Declaration is accepted but should be fixed
    Warning,
    /// Informational finding
    Info,
}

impl std::fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationSeverity::Error => write!(f, "error"),
            ValidationSeverity::Warning => write!(f, "warning"),
            ValidationSeverity::Info => write!(f, "info"),
        }
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFinding {
    /// Severity of the finding
    pub severity: ValidationSeverity,
    /// Stable code for this finding type
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Dotted path to the offending value
    pub path: String,
}

impl ValidationFinding {
    /// Create a new error finding
    pub fn error(code: impl Into<String>, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            severity: ValidationSeverity::Error,
            code: code.into(),
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a new warning finding
    pub fn warning(code: impl Into<String>, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            severity: ValidationSeverity::Warning,
            code: code.into(),
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a new info finding
    pub fn info(code: impl Into<String>, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            severity: ValidationSeverity::Info,
            code: code.into(),
            message: message.into(),
            path: path.into(),
        }
    }
}

impl std::fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {} ({})", self.severity, self.code, self.message, self.path)
    }
}

/// Result of validating one declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the declaration is valid (no errors)
    pub valid: bool,
    /// List of findings
    pub findings: Vec<ValidationFinding>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

impl ValidationResult {
    /// Create a new valid result
    pub fn valid() -> Self {
        Self {
            valid: true,
            findings: Vec::new(),
        }
    }

    /// Create a result with findings
    pub fn with_findings(findings: Vec<ValidationFinding>) -> Self {
        let valid = !findings.iter().any(|f| f.severity == ValidationSeverity::Error);
        Self { valid, findings }
    }

    /// Add a finding
    pub fn add_finding(&mut self, finding: ValidationFinding) {
        if finding.severity == ValidationSeverity::Error {
            self.valid = false;
        }
        self.findings.push(finding);
    }

    /// Merge the findings of another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        for finding in other.findings {
            self.add_finding(finding);
        }
    }

    /// Get all errors
    pub fn errors(&self) -> Vec<&ValidationFinding> {
        self.findings
            .iter()
            .filter(|f| f.severity == ValidationSeverity::Error)
            .collect()
    }

    /// Get all warnings
    pub fn warnings(&self) -> Vec<&ValidationFinding> {
        self.findings
            .iter()
            .filter(|f| f.severity == ValidationSeverity::Warning)
            .collect()
    }

    /// One-line rendering of the error findings
    pub fn summary(&self) -> String {
        self.errors()
            .iter()
            .map(|f| format!("{}: {}", f.path, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
