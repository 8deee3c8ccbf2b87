//! Declarative resource schemas
//!
//! A [`ResourceSchema`] describes the statically-known shape of a resource
//! declaration: which fields exist, their types, defaults, cardinality and
//! validators. Declarations are plain JSON values, so the same schema checks
//! input parsed from JSON, YAML or TOML.
//!
//! Validation is local and synchronous. It never performs I/O and is run
//! before any remote operation is attempted.
//!
//! # Example
//!
//! ```rust
//! use access_policy_core::schema::{ResourceSchema, Schema};
//! use serde_json::json;
//!
//! let schema = ResourceSchema::new()
//!     .field("name", Schema::string().required())
//!     .field("enabled", Schema::bool().default_value(json!(true)));
//!
//! let result = schema.validate(&json!({ "name": "web", "enabled": "yes" }), false);
//! assert!(!result.valid);
//! ```

pub mod validation;
pub mod validators;

pub use validation::{ValidationFinding, ValidationResult, ValidationSeverity};

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Validator hook attached to a field. Receives the value and its path.
pub type ValidateFunc = fn(&Value, &str) -> Vec<ValidationFinding>;

/// Cross-field check over a whole block. Receives the block and its path.
pub type BlockCheck = fn(&Map<String, Value>, &str) -> Vec<ValidationFinding>;

/// Type of a schema field
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "elem", rename_all = "lowercase")]
pub enum FieldType {
    /// Only literal `true`/`false`; strings and numbers are type errors
    Bool,
    String,
    /// Ordered list; the element may itself be a block
    List(Box<FieldType>),
    /// Nested object with its own schema
    Block(ResourceSchema),
}

impl FieldType {
    /// Human-readable type name used in findings
    pub fn type_name(&self) -> String {
        match self {
            FieldType::Bool => "boolean".to_string(),
            FieldType::String => "string".to_string(),
            FieldType::List(elem) => format!("list<{}>", elem.type_name()),
            FieldType::Block(_) => "block".to_string(),
        }
    }

    /// Check `value` against this type, recursing into lists and blocks.
    /// Returns `false` when the value itself has the wrong shape.
    fn check(&self, value: &Value, path: &str, strict: bool, result: &mut ValidationResult) -> bool {
        match (self, value) {
            (FieldType::Bool, Value::Bool(_)) => true,
            (FieldType::String, Value::String(_)) => true,
            (FieldType::List(elem), Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    elem.check(item, &join_path(path, &index.to_string()), strict, result);
                }
                true
            }
            (FieldType::Block(schema), Value::Object(map)) => {
                schema.validate_object(map, path, strict, result);
                true
            }
            _ => {
                result.add_finding(ValidationFinding::error(
                    "E_TYPE",
                    format!("expected {}, found {}", self.type_name(), value_type_name(value)),
                    path,
                ));
                false
            }
        }
    }
}

/// Declaration of a single field
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip)]
    pub validate: Option<ValidateFunc>,
}

impl Schema {
    fn of(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: false,
            default: None,
            max_items: None,
            description: String::new(),
            validate: None,
        }
    }

    /// Optional boolean field
    pub fn bool() -> Self {
        Self::of(FieldType::Bool)
    }

    /// Optional string field
    pub fn string() -> Self {
        Self::of(FieldType::String)
    }

    /// Optional list of scalar elements
    pub fn list(elem: FieldType) -> Self {
        Self::of(FieldType::List(Box::new(elem)))
    }

    /// Optional list-shaped nested block
    pub fn block_list(schema: ResourceSchema) -> Self {
        Self::of(FieldType::List(Box::new(FieldType::Block(schema))))
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value filled in when the field is absent
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Upper bound on list length
    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach a validator run after the type check succeeds
    pub fn validate_with(mut self, validate: ValidateFunc) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Whether the field may be omitted
    pub fn is_optional(&self) -> bool {
        !self.required
    }

    /// Nested block schema, for both `Block` and list-of-`Block` fields
    pub fn elem_block(&self) -> Option<&ResourceSchema> {
        match &self.field_type {
            FieldType::Block(schema) => Some(schema),
            FieldType::List(elem) => match elem.as_ref() {
                FieldType::Block(schema) => Some(schema),
                _ => None,
            },
            _ => None,
        }
    }

    /// Mutable access to the nested block schema
    pub fn elem_block_mut(&mut self) -> Option<&mut ResourceSchema> {
        match &mut self.field_type {
            FieldType::Block(schema) => Some(schema),
            FieldType::List(elem) => match elem.as_mut() {
                FieldType::Block(schema) => Some(schema),
                _ => None,
            },
            _ => None,
        }
    }

    fn validate_value(&self, value: &Value, path: &str, strict: bool, result: &mut ValidationResult) {
        if !self.field_type.check(value, path, strict, result) {
            return;
        }

        if let (Some(max), Value::Array(items)) = (self.max_items, value) {
            if items.len() > max {
                result.add_finding(ValidationFinding::error(
                    "E_MAX_ITEMS",
                    format!("at most {} item(s) allowed, found {}", max, items.len()),
                    path,
                ));
            }
        }

        if let Some(validate) = self.validate {
            for finding in validate(value, path) {
                result.add_finding(finding);
            }
        }
    }

    fn apply_defaults_to(&self, value: &mut Value) {
        let Some(block) = self.elem_block() else {
            return;
        };
        match value {
            Value::Object(map) => block.apply_defaults(map),
            Value::Array(items) => {
                for item in items.iter_mut() {
                    if let Value::Object(map) = item {
                        block.apply_defaults(map);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Named field declarations, kept sorted by name, plus block-level checks
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceSchema {
    #[serde(flatten)]
    fields: BTreeMap<String, Schema>,
    #[serde(skip)]
    checks: Vec<BlockCheck>,
}

impl ResourceSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field (builder pattern)
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.insert(name.into(), schema);
        self
    }

    /// Add a check run over the whole block once its fields are type-checked
    pub fn check(mut self, check: BlockCheck) -> Self {
        self.checks.push(check);
        self
    }

    /// Add or replace a field
    pub fn insert(&mut self, name: impl Into<String>, schema: Schema) {
        self.fields.insert(name.into(), schema);
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Schema> {
        self.fields.get_mut(name)
    }

    /// Mutable access to the nested schema of a block field
    pub fn block_mut(&mut self, name: &str) -> Option<&mut ResourceSchema> {
        self.fields.get_mut(name).and_then(Schema::elem_block_mut)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names, sorted by name
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate a declaration against this schema
    ///
    /// Unknown fields are reported as warnings, or as errors when `strict`
    /// is set.
    pub fn validate(&self, value: &Value, strict: bool) -> ValidationResult {
        let mut result = ValidationResult::valid();
        match value {
            Value::Object(map) => self.validate_object(map, "", strict, &mut result),
            other => result.add_finding(ValidationFinding::error(
                "E_TYPE",
                format!("expected block, found {}", value_type_name(other)),
                "",
            )),
        }
        result
    }

    fn validate_object(
        &self,
        map: &Map<String, Value>,
        prefix: &str,
        strict: bool,
        result: &mut ValidationResult,
    ) {
        for (name, schema) in &self.fields {
            let path = join_path(prefix, name);
            match map.get(name) {
                None | Some(Value::Null) => {
                    if schema.required {
                        result.add_finding(ValidationFinding::error(
                            "E_REQUIRED",
                            "field is required",
                            path,
                        ));
                    }
                }
                Some(value) => schema.validate_value(value, &path, strict, result),
            }
        }

        for check in &self.checks {
            for finding in check(map, prefix) {
                result.add_finding(finding);
            }
        }

        for key in map.keys().filter(|key| !self.fields.contains_key(*key)) {
            let path = join_path(prefix, key);
            let message = "field is not part of the schema";
            if strict {
                result.add_finding(ValidationFinding::error("E_UNKNOWN_FIELD", message, path));
            } else {
                result.add_finding(ValidationFinding::warning("W_UNKNOWN_FIELD", message, path));
            }
        }
    }

    /// Fill declared defaults for absent fields, recursing into blocks
    pub fn apply_defaults(&self, map: &mut Map<String, Value>) {
        for (name, schema) in &self.fields {
            match map.get_mut(name) {
                Some(Value::Null) | None => {
                    if let Some(default) = &schema.default {
                        map.insert(name.clone(), default.clone());
                    }
                }
                Some(value) => schema.apply_defaults_to(value),
            }
        }
    }
}

/// Join a dotted path prefix with a segment
pub(crate) fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

/// JSON type name of a value
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "block",
    }
}
