//! Fields and mappings shared by every access policy resource type
//!
//! Protocol-specific resources start from [`access_policy_base_schema`] and
//! extend it, and reuse the extractor/setter pair and the delete operation
//! defined here.

use serde_json::{json, Map, Value};
use std::any::Any;

use super::luminate_service;
use crate::dto::{AccessPolicy, Conditions, DirectoryEntity, EntityType, ManagedDevice, Validators};
use crate::error::Result;
use crate::handle::ResourceData;
use crate::schema::validators::{
    validate_ip_or_cidr_list, validate_non_empty_list, validate_non_empty_string,
};
use crate::schema::{join_path, FieldType, ResourceSchema, Schema, ValidationFinding};

/// Schema common to all access policy types
pub fn access_policy_base_schema() -> ResourceSchema {
    ResourceSchema::new()
        .field(
            "enabled",
            Schema::bool()
                .default_value(json!(true))
                .description("Indicate whether the access policy is enabled"),
        )
        .field(
            "name",
            Schema::string()
                .required()
                .description("A descriptive name of the policy")
                .validate_with(validate_non_empty_string),
        )
        .field(
            "identity_provider_id",
            Schema::string()
                .description("The identity provider id")
                .validate_with(validate_non_empty_string),
        )
        .field(
            "user_ids",
            Schema::list(FieldType::String)
                .description("The user entities to which this policy applies"),
        )
        .field(
            "group_ids",
            Schema::list(FieldType::String)
                .description("The group entities to which this policy applies"),
        )
        .field(
            "applications",
            Schema::list(FieldType::String)
                .required()
                .description("The applications to which this policy applies")
                .validate_with(validate_non_empty_list),
        )
        .field(
            "conditions",
            Schema::block_list(
                ResourceSchema::new()
                    .field(
                        "source_ip",
                        Schema::list(FieldType::String)
                            .description("Source IP addresses or CIDR ranges allowed by the policy")
                            .validate_with(validate_ip_or_cidr_list),
                    )
                    .field(
                        "location",
                        Schema::list(FieldType::String)
                            .description("Locations allowed by the policy"),
                    ),
            )
            .max_items(1)
            .description("Conditions that must be met for the policy to apply"),
        )
        .field(
            "validators",
            Schema::block_list(ResourceSchema::new().field(
                "compliance_check",
                Schema::bool()
                    .default_value(json!(false))
                    .description("Indicate whatever to perform compliance check"),
            ))
            .max_items(1)
            .description("Validators evaluated on every request"),
        )
        .check(validate_directory_entities)
}

/// Users and groups are only meaningful within an identity provider
fn validate_directory_entities(map: &Map<String, Value>, prefix: &str) -> Vec<ValidationFinding> {
    let has_provider = matches!(map.get("identity_provider_id"), Some(Value::String(_)));
    let declared = |key: &str| {
        map.get(key)
            .and_then(Value::as_array)
            .map_or(false, |ids| !ids.is_empty())
    };

    ["user_ids", "group_ids"]
        .into_iter()
        .filter(|key| !has_provider && declared(*key))
        .map(|key| {
            ValidationFinding::error(
                "E_REQUIRED",
                format!("identity_provider_id is required when {} is set", key),
                join_path(prefix, key),
            )
        })
        .collect()
}

/// Read the shared fields of a handle into a fresh domain object
///
/// Never mutates the handle. The identity and target protocol are left for
/// the caller to decide.
pub fn extract_access_policy_base_fields(d: &ResourceData) -> AccessPolicy {
    AccessPolicy {
        id: String::new(),
        enabled: d.get("enabled").and_then(Value::as_bool).unwrap_or(true),
        name: d.get_str("name").unwrap_or_default().to_string(),
        directory_entities: extract_directory_entities(d),
        applications: d.get_string_list("applications"),
        conditions: Conditions {
            source_ip: d.get_string_list("conditions.0.source_ip"),
            location: d.get_string_list("conditions.0.location"),
            managed_device: ManagedDevice {
                opswat: d.get_bool("conditions.0.managed_device.0.opswat"),
                symantec_cloudsoc: d.get_bool("conditions.0.managed_device.0.symantec_cloudsoc"),
                symantec_web_security_service: d
                    .get_bool("conditions.0.managed_device.0.symantec_web_security_service"),
            },
            unmanaged_device: d.get_bool("conditions.0.unmanaged_device"),
        },
        validators: Validators {
            compliance_check: d.get_bool("validators.0.compliance_check"),
        },
        ..Default::default()
    }
}

fn extract_directory_entities(d: &ResourceData) -> Vec<DirectoryEntity> {
    let Some(identity_provider_id) = d.get_str("identity_provider_id") else {
        return Vec::new();
    };

    let users = d
        .get_string_list("user_ids")
        .into_iter()
        .map(|id| (id, EntityType::User));
    let groups = d
        .get_string_list("group_ids")
        .into_iter()
        .map(|id| (id, EntityType::Group));

    users
        .chain(groups)
        .map(|(identifier_in_provider, entity_type)| DirectoryEntity {
            identifier_in_provider,
            identity_provider_id: identity_provider_id.to_string(),
            entity_type,
        })
        .collect()
}

/// Write a domain object back onto the handle, identity included
///
/// Blocks whose fields all hold their defaults are written as empty lists,
/// so an absent block and an all-default block reflect identically.
pub fn set_access_policy_base_fields(d: &mut ResourceData, policy: &AccessPolicy) {
    d.set_id(policy.id.clone());
    d.set("enabled", json!(policy.enabled));
    d.set("name", json!(policy.name));
    d.set("applications", json!(policy.applications));

    match policy.directory_entities.first() {
        Some(entity) => d.set("identity_provider_id", json!(entity.identity_provider_id)),
        None => {
            d.remove("identity_provider_id");
        }
    }
    d.set("user_ids", json!(entity_ids(policy, EntityType::User)));
    d.set("group_ids", json!(entity_ids(policy, EntityType::Group)));

    d.set("conditions", flatten_conditions(&policy.conditions));
    d.set("validators", flatten_validators(&policy.validators));
}

fn entity_ids(policy: &AccessPolicy, entity_type: EntityType) -> Vec<&str> {
    policy
        .directory_entities
        .iter()
        .filter(|entity| entity.entity_type == entity_type)
        .map(|entity| entity.identifier_in_provider.as_str())
        .collect()
}

fn flatten_conditions(conditions: &Conditions) -> Value {
    if *conditions == Conditions::default() {
        return json!([]);
    }

    let managed_device = if conditions.managed_device.any() {
        json!([{
            "opswat": conditions.managed_device.opswat,
            "symantec_cloudsoc": conditions.managed_device.symantec_cloudsoc,
            "symantec_web_security_service": conditions.managed_device.symantec_web_security_service,
        }])
    } else {
        json!([])
    };

    let mut block = Map::new();
    block.insert("source_ip".into(), json!(conditions.source_ip));
    block.insert("location".into(), json!(conditions.location));
    block.insert("managed_device".into(), managed_device);
    block.insert("unmanaged_device".into(), json!(conditions.unmanaged_device));
    Value::Array(vec![Value::Object(block)])
}

fn flatten_validators(validators: &Validators) -> Value {
    if *validators == Validators::default() {
        json!([])
    } else {
        json!([{ "compliance_check": validators.compliance_check }])
    }
}

/// Delete the remote policy addressed by the handle's identity
///
/// Shared by every access policy type. An unbound handle has nothing to
/// delete and succeeds without a remote call.
pub fn delete_access_policy(d: &mut ResourceData, meta: &dyn Any) -> Result<()> {
    let client = luminate_service(meta)?;

    if d.id().is_empty() {
        tracing::debug!("access policy has no identity, nothing to delete");
        return Ok(());
    }

    tracing::debug!(policy_id = %d.id(), "deleting access policy");
    client.access_policies.delete_access_policy(d.id())?;
    tracing::info!(policy_id = %d.id(), "deleted access policy");

    d.set_id("");
    Ok(())
}
