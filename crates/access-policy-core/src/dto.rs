//! Access policy domain objects as exchanged with the remote service
//!
//! These are transient copies: the service owns the canonical record and
//! every create/update response replaces the local copy wholesale.

use serde::{Deserialize, Serialize};

/// Protocol an access policy applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetProtocol {
    #[default]
    Http,
    Ssh,
    Rdp,
    Tcp,
}

impl TargetProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetProtocol::Http => "HTTP",
            TargetProtocol::Ssh => "SSH",
            TargetProtocol::Rdp => "RDP",
            TargetProtocol::Tcp => "TCP",
        }
    }
}

impl std::fmt::Display for TargetProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of directory entity a policy grants access to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum EntityType {
    User,
    Group,
}

/// A user or group in an identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntity {
    pub identifier_in_provider: String,
    pub identity_provider_id: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
}

/// Device posture vendors that can vouch for a managed device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagedDevice {
    pub opswat: bool,
    pub symantec_cloudsoc: bool,
    pub symantec_web_security_service: bool,
}

impl ManagedDevice {
    /// True when at least one vendor restriction is enabled
    pub fn any(&self) -> bool {
        self.opswat || self.symantec_cloudsoc || self.symantec_web_security_service
    }
}

/// Conditions a request must satisfy for the policy to apply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conditions {
    pub source_ip: Vec<String>,
    pub location: Vec<String>,
    pub managed_device: ManagedDevice,
    pub unmanaged_device: bool,
}

/// Validators evaluated on every request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Validators {
    pub compliance_check: bool,
}

/// Canonical remote representation of an access policy
///
/// `id` is empty until the service assigns one on creation and is the sole
/// addressing key afterwards. Absent boolean conditions deserialize as
/// `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessPolicy {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub enabled: bool,
    pub name: String,
    pub target_protocol: TargetProtocol,
    pub directory_entities: Vec<DirectoryEntity>,
    pub applications: Vec<String>,
    pub conditions: Conditions,
    pub validators: Validators,
}

impl AccessPolicy {
    /// Whether the service has assigned an identity
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_target_protocol_wire_format() {
        assert_eq!(serde_json::to_value(TargetProtocol::Http).unwrap(), json!("HTTP"));
        assert_eq!(TargetProtocol::Ssh.to_string(), "SSH");
        assert_eq!(TargetProtocol::default(), TargetProtocol::Http);
    }

    #[test]
    fn test_absent_booleans_default_to_false() {
        let policy: AccessPolicy = serde_json::from_value(json!({
            "id": "pol-1",
            "name": "web",
            "targetProtocol": "HTTP",
            "conditions": { "managedDevice": { "opswat": true } }
        }))
        .unwrap();

        assert_eq!(policy.id, "pol-1");
        assert!(policy.conditions.managed_device.opswat);
        assert!(!policy.conditions.managed_device.symantec_cloudsoc);
        assert!(!policy.conditions.unmanaged_device);
        assert!(!policy.validators.compliance_check);
    }

    #[test]
    fn test_empty_id_is_not_serialized() {
        let value = serde_json::to_value(AccessPolicy::default()).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["targetProtocol"], json!("HTTP"));
        assert_eq!(
            value["conditions"]["managedDevice"]["symantecWebSecurityService"],
            json!(false)
        );
    }

    #[test]
    fn test_directory_entity_type_field() {
        let entity = DirectoryEntity {
            identifier_in_provider: "u-1".into(),
            identity_provider_id: "idp-1".into(),
            entity_type: EntityType::Group,
        };
        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(value["type"], json!("Group"));
        assert_eq!(value["identifierInProvider"], json!("u-1"));
    }

    #[test]
    fn test_managed_device_any() {
        assert!(!ManagedDevice::default().any());
        assert!(ManagedDevice {
            symantec_cloudsoc: true,
            ..Default::default()
        }
        .any());
    }
}
