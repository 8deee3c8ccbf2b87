//! Lifecycle tests for the web access policy resource
//!
//! Drive create/read/update/delete the way an orchestrator would, against
//! an in-memory service double and mockall mocks.

mod common;

use access_policy_core::{
    web_access_policy, AccessPolicy, AccessPolicyService, LuminateService, ManagedDevice,
    ProviderError, ResourceData, ResourceState, ServiceError, ServiceResult, TargetProtocol,
};
use common::{load, web_declaration, web_declaration_with_devices, Call, InMemoryPolicies};
use mockall::mock;
use serde_json::json;

mock! {
    pub Policies {}

    impl AccessPolicyService for Policies {
        fn create_access_policy(&self, policy: &AccessPolicy) -> ServiceResult<AccessPolicy>;
        fn get_access_policy(&self, id: &str) -> ServiceResult<Option<AccessPolicy>>;
        fn update_access_policy(&self, policy: &AccessPolicy) -> ServiceResult<AccessPolicy>;
        fn delete_access_policy(&self, id: &str) -> ServiceResult<()>;
    }
}

#[test]
fn test_create_with_all_flags_false_then_read_is_stable() {
    let resource = web_access_policy();
    let mut d = load(web_declaration_with_devices(false, false, false, false));

    let sent = AccessPolicy {
        enabled: true,
        name: "intranet".into(),
        target_protocol: TargetProtocol::Http,
        applications: vec!["app-1".into()],
        ..Default::default()
    };
    let returned = AccessPolicy {
        id: "pol-1".into(),
        ..sent.clone()
    };
    let on_create = returned.clone();
    let on_get = returned.clone();

    let mut mock = MockPolicies::new();
    mock.expect_create_access_policy()
        .withf(move |p| {
            *p == sent
                && p.conditions.managed_device == ManagedDevice::default()
                && !p.conditions.unmanaged_device
        })
        .times(1)
        .returning(move |_| Ok(on_create.clone()));
    mock.expect_get_access_policy()
        .withf(|id| id == "pol-1")
        .times(2)
        .returning(move |_| Ok(Some(on_get.clone())));
    let service = LuminateService::new(mock);

    (resource.create)(&mut d, &service).unwrap();
    assert_eq!(d.id(), "pol-1");

    let after_create = d.clone();
    (resource.read)(&mut d, &service).unwrap();
    assert_eq!(d, after_create);
    assert_eq!(d.id(), "pol-1");
}

#[test]
fn test_create_rejects_non_service_meta_without_remote_calls() {
    let store = InMemoryPolicies::new();
    let resource = web_access_policy();
    let mut d = load(web_declaration());

    // the store itself is not the expected service type
    let err = (resource.create)(&mut d, &store).unwrap_err();

    assert!(matches!(err, ProviderError::Integration { expected: "LuminateService" }));
    assert!(!err.is_user_error());
    assert!(store.calls().is_empty());
    assert_eq!(d.state(), ResourceState::Unbound);
}

#[test]
fn test_every_operation_checks_meta() {
    let resource = web_access_policy();
    let mut d = load(web_declaration());
    d.set_id("pol-1");

    for operation in [resource.create, resource.read, resource.update, resource.delete] {
        let err = operation(&mut d, &()).unwrap_err();
        assert!(matches!(err, ProviderError::Integration { .. }));
    }
    assert_eq!(d.id(), "pol-1");
}

#[test]
fn test_read_of_missing_policy_unbinds_handle() {
    let mut mock = MockPolicies::new();
    mock.expect_get_access_policy()
        .withf(|id| id == "pol-1")
        .times(1)
        .returning(|_| Ok(None));
    let service = LuminateService::new(mock);

    let mut d = load(web_declaration());
    d.set_id("pol-1");
    (web_access_policy().read)(&mut d, &service).unwrap();

    assert_eq!(d.id(), "");
    assert_eq!(d.state(), ResourceState::Unbound);
}

#[test]
fn test_full_lifecycle_against_store() {
    let store = InMemoryPolicies::new();
    let service = store.service();
    let resource = web_access_policy();

    let mut d = load(web_declaration_with_devices(true, false, false, false));
    (resource.create)(&mut d, &service).unwrap();
    assert_eq!(d.state(), ResourceState::Bound);
    let id = d.id().to_string();

    let stored = store.stored(&id).unwrap();
    assert_eq!(stored.target_protocol, TargetProtocol::Http);
    assert!(stored.conditions.managed_device.opswat);

    // declaration changes: flip unmanaged_device on
    let mut declared = load(web_declaration_with_devices(true, false, false, true));
    declared.set_id(&id);
    (resource.update)(&mut declared, &service).unwrap();
    assert_eq!(declared.id(), id);
    assert!(store.stored(&id).unwrap().conditions.unmanaged_device);
    assert!(declared.get_bool("conditions.0.unmanaged_device"));

    (resource.delete)(&mut declared, &service).unwrap();
    assert_eq!(declared.state(), ResourceState::Unbound);
    assert!(store.stored(&id).is_none());

    let calls = store.calls();
    assert!(matches!(calls[0], Call::Create(_)));
    assert_eq!(calls[1], Call::Get(id.clone()));
    assert!(matches!(&calls[2], Call::Update(p) if p.id == id));
    assert_eq!(calls[3], Call::Get(id.clone()));
    assert_eq!(calls[4], Call::Delete(id));
    assert_eq!(calls.len(), 5);
}

#[test]
fn test_drift_detected_when_policy_removed_remotely() {
    let store = InMemoryPolicies::new();
    let service = store.service();
    let resource = web_access_policy();

    let mut d = load(web_declaration());
    (resource.create)(&mut d, &service).unwrap();
    store.remove(d.id());

    (resource.read)(&mut d, &service).unwrap();
    assert_eq!(d.state(), ResourceState::Unbound);
}

#[test]
fn test_drift_detected_when_directory_entities_removed_remotely() {
    let store = InMemoryPolicies::new();
    let service = store.service();
    let resource = web_access_policy();

    let mut d = load(json!({
        "name": "intranet",
        "applications": ["app-1"],
        "identity_provider_id": "idp-1",
        "user_ids": ["u-1"],
    }));
    (resource.create)(&mut d, &service).unwrap();

    let mut stored = store.stored(d.id()).unwrap();
    assert_eq!(stored.directory_entities.len(), 1);
    assert_eq!(stored.directory_entities[0].identity_provider_id, "idp-1");
    assert_eq!(stored.directory_entities[0].identifier_in_provider, "u-1");

    stored.directory_entities.clear();
    store.insert(stored);

    (resource.read)(&mut d, &service).unwrap();
    assert_eq!(d.state(), ResourceState::Bound);
    assert!(d.get("identity_provider_id").is_none());
    assert!(d.get_string_list("user_ids").is_empty());
}

#[test]
fn test_users_without_identity_provider_rejected_before_any_operation() {
    let declaration = json!({
        "name": "intranet",
        "applications": ["app-1"],
        "user_ids": ["u-1"],
        "group_ids": ["g-1"]
    });

    let err = web_access_policy().load(declaration, false).unwrap_err();
    match err {
        ProviderError::Validation(result) => {
            let errors = result.errors();
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[0].path, "user_ids");
            assert_eq!(errors[1].path, "group_ids");
        }
        other => panic!("expected validation error, got {}", other),
    }
}

#[test]
fn test_update_targets_existing_identity_even_when_declaration_has_none() {
    let store = InMemoryPolicies::new();
    store.insert(AccessPolicy {
        id: "pol-9".into(),
        name: "old".into(),
        ..Default::default()
    });
    let service = store.service();

    let mut d = load(web_declaration());
    d.set_id("pol-9");
    (web_access_policy().update)(&mut d, &service).unwrap();

    match &store.calls()[0] {
        Call::Update(policy) => {
            assert_eq!(policy.id, "pol-9");
            assert_eq!(policy.name, "intranet");
        }
        other => panic!("expected update, got {:?}", other),
    }
    assert_eq!(store.stored("pol-9").unwrap().name, "intranet");
}

#[test]
fn test_remote_errors_propagate_verbatim() {
    let store = InMemoryPolicies::new();
    let service = store.service();
    let error = ServiceError::Api {
        status: 409,
        message: "name already taken".into(),
    };
    store.fail_next(error.clone());

    let mut d = load(web_declaration());
    let err = (web_access_policy().create)(&mut d, &service).unwrap_err();

    assert_eq!(err.to_string(), error.to_string());
    assert!(matches!(err, ProviderError::Remote(e) if e == error));
    assert_eq!(d.state(), ResourceState::Unbound);
    assert_eq!(store.calls().len(), 1);
}

#[test]
fn test_import_passthrough_reads_remote_state() {
    let store = InMemoryPolicies::new();
    store.insert(AccessPolicy {
        id: "pol-5".into(),
        name: "legacy".into(),
        enabled: false,
        target_protocol: TargetProtocol::Http,
        applications: vec!["app-9".into()],
        ..Default::default()
    });

    let d = web_access_policy().import("pol-5", &store.service()).unwrap();
    assert_eq!(d.id(), "pol-5");
    assert_eq!(d.get_str("name"), Some("legacy"));
    assert!(!d.get_bool("enabled"));
    assert_eq!(d.get_string_list("applications"), vec!["app-9"]);
}

#[test]
fn test_import_of_unknown_identity_is_unbound() {
    let store = InMemoryPolicies::new();
    let d: ResourceData = web_access_policy().import("missing", &store.service()).unwrap();
    assert_eq!(d.state(), ResourceState::Unbound);
}

#[test]
fn test_non_boolean_opswat_rejected_before_any_operation() {
    let declaration = json!({
        "name": "intranet",
        "applications": ["app-1"],
        "conditions": [{ "managed_device": [{ "opswat": "true" }] }]
    });

    let err = web_access_policy().load(declaration, false).unwrap_err();
    match err {
        ProviderError::Validation(result) => {
            assert_eq!(result.errors().len(), 1);
            assert_eq!(result.errors()[0].path, "conditions.0.managed_device.0.opswat");
        }
        other => panic!("expected validation error, got {}", other),
    }
}

#[test]
fn test_non_boolean_unmanaged_device_rejected() {
    let declaration = json!({
        "name": "intranet",
        "applications": ["app-1"],
        "conditions": [{ "unmanaged_device": 1 }]
    });
    let result = web_access_policy().validate(&declaration, false);
    assert!(!result.valid);
    assert_eq!(result.errors()[0].path, "conditions.0.unmanaged_device");
}
