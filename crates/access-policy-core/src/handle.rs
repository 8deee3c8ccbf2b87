//! Configuration handle for one declared resource instance
//!
//! [`ResourceData`] holds the declared field values as a JSON tree plus the
//! identity assigned by the remote service. The orchestrator owns it; the
//! resource operations read it, and write the service's view back into it.
//!
//! Handles are built from declaration text through [`ResourceData::load`]
//! and friends, which apply schema defaults and reject invalid input before
//! any remote call can happen.
//!
//! # Example
//!
//! ```rust
//! use access_policy_core::{web_access_policy, ResourceData, ResourceState};
//!
//! let resource = web_access_policy();
//! let data = ResourceData::from_json_str(
//!     &resource.schema,
//!     r#"{ "name": "intranet", "applications": ["app-1"] }"#,
//!     false,
//! )
//! .unwrap();
//!
//! assert_eq!(data.state(), ResourceState::Unbound);
//! assert!(data.get_bool("enabled"));
//! ```

use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{ProviderError, Result};
use crate::schema::ResourceSchema;

/// Existence of the remote object as observed through the identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    /// No identity: never created, deleted, or found missing on read
    Unbound,
    /// Identity assigned by the service
    Bound,
}

/// Declaration formats understood by the loaders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationFormat {
    Json,
    Yaml,
    Toml,
}

impl DeclarationFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(DeclarationFormat::Json),
            "yaml" | "yml" => Some(DeclarationFormat::Yaml),
            "toml" => Some(DeclarationFormat::Toml),
            _ => None,
        }
    }

    /// Parse declaration text into a JSON tree
    pub fn parse(&self, content: &str) -> Result<Value> {
        let value: Value = match self {
            DeclarationFormat::Json => serde_json::from_str(content)?,
            DeclarationFormat::Yaml => serde_yaml::from_str(content)?,
            DeclarationFormat::Toml => toml::from_str(content)?,
        };
        Ok(value)
    }

    /// Read a declaration file, detecting its format from the extension
    pub fn read_file(path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let format = Self::from_path(path).ok_or_else(|| {
            ProviderError::parse_error(format!(
                "unsupported declaration format: {}",
                path.display()
            ))
        })?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| ProviderError::File(format!("{}: {}", path.display(), e)))?;
        format.parse(&content)
    }
}

/// Mutable key/value view of one declared resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceData {
    id: String,
    values: Map<String, Value>,
}

impl ResourceData {
    /// Empty, unbound handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle carrying only an identity, as produced by a passthrough import
    pub fn import(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: Map::new(),
        }
    }

    /// Build a handle from raw values without validation
    pub fn from_values(values: Map<String, Value>) -> Self {
        Self {
            id: String::new(),
            values,
        }
    }

    /// Validate a declaration, fill its defaults and wrap it in a handle
    ///
    /// Fails with [`ProviderError::Validation`] when the declaration does not
    /// satisfy `schema`.
    pub fn load(schema: &ResourceSchema, declaration: Value, strict: bool) -> Result<Self> {
        let result = schema.validate(&declaration, strict);
        if !result.valid {
            return Err(ProviderError::Validation(result));
        }

        for warning in result.warnings() {
            tracing::warn!(path = %warning.path, code = %warning.code, "{}", warning.message);
        }

        let Value::Object(mut values) = declaration else {
            return Err(ProviderError::parse_error("declaration must be a block"));
        };
        schema.apply_defaults(&mut values);
        Ok(Self::from_values(values))
    }

    pub fn from_json_str(schema: &ResourceSchema, content: &str, strict: bool) -> Result<Self> {
        Self::load(schema, DeclarationFormat::Json.parse(content)?, strict)
    }

    pub fn from_yaml_str(schema: &ResourceSchema, content: &str, strict: bool) -> Result<Self> {
        Self::load(schema, DeclarationFormat::Yaml.parse(content)?, strict)
    }

    pub fn from_toml_str(schema: &ResourceSchema, content: &str, strict: bool) -> Result<Self> {
        Self::load(schema, DeclarationFormat::Toml.parse(content)?, strict)
    }

    /// Load a declaration file, detecting its format from the extension
    pub fn from_file(schema: &ResourceSchema, path: impl AsRef<Path>, strict: bool) -> Result<Self> {
        Self::load(schema, DeclarationFormat::read_file(path)?, strict)
    }

    /// Identity assigned by the remote service; empty when unbound
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn state(&self) -> ResourceState {
        if self.id.is_empty() {
            ResourceState::Unbound
        } else {
            ResourceState::Bound
        }
    }

    /// All top-level values
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Look up a value by dotted path; numeric segments index into lists
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.values.get(first)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Boolean at `path`; absent or non-boolean reads as `false`
    pub fn get_bool(&self, path: &str) -> bool {
        self.get(path).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// String elements of the list at `path`; non-string elements are skipped
    pub fn get_string_list(&self, path: &str) -> Vec<String> {
        self.get(path)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replace a top-level value
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }
}
