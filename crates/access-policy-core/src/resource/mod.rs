//! Resource descriptors and lifecycle operations
//!
//! A [`Resource`] bundles the schema of a resource type with the four
//! lifecycle operations the orchestrator drives:
//!
//! - **create**: declared values → new remote object, identity assigned
//! - **read**: remote object → declared values; a missing object clears the
//!   identity instead of failing
//! - **update**: declared values → existing remote object
//! - **delete**: remote object removed, identity cleared
//!
//! Every operation receives the configuration handle and an opaque provider
//! meta (`&dyn Any`). The meta must be a [`LuminateService`]; anything else
//! is rejected with [`ProviderError::Integration`] before any remote call.
//!
//! # State
//!
//! ```text
//! Unbound --create--> Bound --read/update--> Bound
//!                       |  \--read (remote gone)--> Unbound
//!                       \--delete--> Unbound
//! ```

pub mod base;
pub mod web;

use serde_json::Value;
use std::any::Any;

use crate::client::LuminateService;
use crate::error::{ProviderError, Result};
use crate::handle::ResourceData;
use crate::schema::{ResourceSchema, ValidationResult};

/// Signature shared by all lifecycle operations
pub type OperationFunc = fn(&mut ResourceData, &dyn Any) -> Result<()>;

/// How existing remote objects are adopted into a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importer {
    /// The supplied identity is used verbatim as the lookup key
    Passthrough,
}

impl Importer {
    /// Build the handle an orchestrator reads after an import
    pub fn import(&self, id: &str) -> ResourceData {
        match self {
            Importer::Passthrough => ResourceData::import(id),
        }
    }
}

/// Schema plus lifecycle operations of one resource type
#[derive(Debug, Clone)]
pub struct Resource {
    pub schema: ResourceSchema,
    pub create: OperationFunc,
    pub read: OperationFunc,
    pub update: OperationFunc,
    pub delete: OperationFunc,
    pub importer: Importer,
}

impl Resource {
    /// Validate a declaration without building a handle
    pub fn validate(&self, declaration: &Value, strict: bool) -> ValidationResult {
        self.schema.validate(declaration, strict)
    }

    /// Validate a declaration and build its handle
    pub fn load(&self, declaration: Value, strict: bool) -> Result<ResourceData> {
        ResourceData::load(&self.schema, declaration, strict)
    }

    /// Adopt an existing remote object by identity and read its state
    pub fn import(&self, id: &str, meta: &dyn Any) -> Result<ResourceData> {
        let mut data = self.importer.import(id);
        (self.read)(&mut data, meta)?;
        Ok(data)
    }
}

/// Check that the provider meta is the service every operation needs
pub(crate) fn luminate_service(meta: &dyn Any) -> Result<&LuminateService> {
    meta.downcast_ref::<LuminateService>()
        .ok_or_else(|| ProviderError::integration(LuminateService::TYPE_NAME))
}
