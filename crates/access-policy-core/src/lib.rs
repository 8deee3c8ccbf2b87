//! Web Access Policy Resource Adapter
//!
//! Translates a declared web access policy into create/read/update/delete
//! calls against the Luminate access-policy service, and reflects the
//! service's state back into the declaration for drift detection.
//!
//! ## Architecture
//!
//! 1. **Schema** (`schema/`): declarative field model, validators and
//!    load-time validation of declarations.
//!
//! 2. **Handle** (`handle`): the mutable configuration handle the
//!    orchestrator owns, with JSON/YAML/TOML loaders.
//!
//! 3. **Domain objects** (`dto`): the service's access policy records.
//!
//! 4. **Client** (`client`): the service seam. Transport and authentication
//!    live behind [`AccessPolicyService`].
//!
//! 5. **Resources** (`resource/`): the shared base mapping and delete, and
//!    the web resource with its create/read/update operations.
//!
//! 6. **Config** and **logging**: provider settings and the `tracing`
//!    bootstrap for binaries.
//!
//! ## Example
//!
//! ```rust,no_run
//! use access_policy_core::{web_access_policy, AccessPolicyService, LuminateService, ResourceData};
//!
//! fn apply(service: impl AccessPolicyService + 'static, declaration: &str) -> access_policy_core::Result<String> {
//!     let resource = web_access_policy();
//!     let meta = LuminateService::new(service);
//!
//!     let mut data = ResourceData::from_yaml_str(&resource.schema, declaration, true)?;
//!     (resource.create)(&mut data, &meta)?;
//!     Ok(data.id().to_string())
//! }
//! ```

pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod handle;
pub mod logging;
pub mod resource;
pub mod schema;

pub use client::{AccessPolicyService, LuminateService, ServiceError, ServiceResult};
pub use config::{LogFormat, ProviderConfig, ProviderConfigBuilder};
pub use dto::{
    AccessPolicy, Conditions, DirectoryEntity, EntityType, ManagedDevice, TargetProtocol,
    Validators,
};
pub use error::{ProviderError, Result};
pub use handle::{DeclarationFormat, ResourceData, ResourceState};
pub use resource::base::{
    access_policy_base_schema, delete_access_policy, extract_access_policy_base_fields,
    set_access_policy_base_fields,
};
pub use resource::web::{
    create_web_access_policy, extract_web_access_policy, read_web_access_policy,
    update_web_access_policy, web_access_policy, web_access_policy_schema, WEB_TARGET_PROTOCOL,
};
pub use resource::{Importer, OperationFunc, Resource};
pub use schema::{
    FieldType, ResourceSchema, Schema, ValidationFinding, ValidationResult, ValidationSeverity,
};

/// Name under which the web resource is registered with an orchestrator
pub const WEB_ACCESS_POLICY_RESOURCE: &str = "symcsc_web_access_policy";
