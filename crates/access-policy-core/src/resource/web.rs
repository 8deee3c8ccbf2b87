//! Web (HTTP) access policy resource
//!
//! Extends the base access policy with device-trust conditions and pins
//! the target protocol to HTTP. Create and update each confirm the
//! outcome with a follow-up read, because the service may echo an
//! incomplete object from the mutating call.

use serde_json::json;
use std::any::Any;

use super::base::{
    access_policy_base_schema, delete_access_policy, extract_access_policy_base_fields,
    set_access_policy_base_fields,
};
use super::{luminate_service, Importer, Resource};
use crate::dto::{AccessPolicy, TargetProtocol};
use crate::error::Result;
use crate::handle::ResourceData;
use crate::schema::{ResourceSchema, Schema};

/// Protocol of every policy managed through this resource
pub const WEB_TARGET_PROTOCOL: TargetProtocol = TargetProtocol::Http;

/// Descriptor of the web access policy resource
pub fn web_access_policy() -> Resource {
    Resource {
        schema: web_access_policy_schema(),
        create: create_web_access_policy,
        read: read_web_access_policy,
        update: update_web_access_policy,
        delete: delete_access_policy,
        importer: Importer::Passthrough,
    }
}

/// Base schema with the device-trust fields added to `conditions`
pub fn web_access_policy_schema() -> ResourceSchema {
    let mut schema = access_policy_base_schema();

    if let Some(conditions) = schema.block_mut("conditions") {
        conditions.insert(
            "managed_device",
            Schema::block_list(
                ResourceSchema::new()
                    .field(
                        "opswat",
                        Schema::bool()
                            .default_value(json!(false))
                            .description("Indicate whatever to restrict access to Opswat MetaAccess"),
                    )
                    .field(
                        "symantec_cloudsoc",
                        Schema::bool()
                            .default_value(json!(false))
                            .description("Indicate whatever to restrict access to symantec cloudsoc"),
                    )
                    .field(
                        "symantec_web_security_service",
                        Schema::bool()
                            .default_value(json!(false))
                            .description(
                                "Indicate whatever to restrict access to symantec web security service",
                            ),
                    ),
            )
            .description("Indicate whatever to restrict access to managed devices only"),
        );

        conditions.insert(
            "unmanaged_device",
            Schema::bool()
                .default_value(json!(false))
                .description("Indicate whatever to restrict access to unmanaged devices only"),
        );
    }

    schema
}

/// Build the domain object for a web policy from the handle
pub fn extract_web_access_policy(d: &ResourceData) -> AccessPolicy {
    let mut policy = extract_access_policy_base_fields(d);
    policy.target_protocol = WEB_TARGET_PROTOCOL;
    policy
}

pub fn create_web_access_policy(d: &mut ResourceData, meta: &dyn Any) -> Result<()> {
    let client = luminate_service(meta)?;

    let policy = extract_web_access_policy(d);
    tracing::debug!(name = %policy.name, "creating web access policy");

    let created = client.access_policies.create_access_policy(&policy)?;
    tracing::info!(policy_id = %created.id, name = %created.name, "created web access policy");

    set_access_policy_base_fields(d, &created);

    read_web_access_policy(d, meta)
}

pub fn read_web_access_policy(d: &mut ResourceData, meta: &dyn Any) -> Result<()> {
    let client = luminate_service(meta)?;

    tracing::debug!(policy_id = %d.id(), "reading web access policy");
    match client.access_policies.get_access_policy(d.id())? {
        Some(policy) => set_access_policy_base_fields(d, &policy),
        None => {
            tracing::warn!(policy_id = %d.id(), "web access policy no longer exists, clearing identity");
            d.set_id("");
        }
    }

    Ok(())
}

pub fn update_web_access_policy(d: &mut ResourceData, meta: &dyn Any) -> Result<()> {
    let client = luminate_service(meta)?;

    let mut policy = extract_web_access_policy(d);
    policy.id = d.id().to_string();
    tracing::debug!(policy_id = %policy.id, "updating web access policy");

    let updated = client.access_policies.update_access_policy(&policy)?;
    tracing::info!(policy_id = %updated.id, "updated web access policy");

    set_access_policy_base_fields(d, &updated);

    read_web_access_policy(d, meta)
}
