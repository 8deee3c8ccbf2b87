//! Shared fixtures for integration tests

#![allow(dead_code)]

use access_policy_core::{
    AccessPolicy, AccessPolicyService, LuminateService, ResourceData, ServiceError, ServiceResult,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Remote call as observed by [`InMemoryPolicies`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(AccessPolicy),
    Get(String),
    Update(AccessPolicy),
    Delete(String),
}

#[derive(Default)]
struct State {
    policies: HashMap<String, AccessPolicy>,
    calls: Vec<Call>,
    fail_next: Option<ServiceError>,
}

/// Service double keeping policies in memory; clones share state
#[derive(Clone, Default)]
pub struct InMemoryPolicies {
    state: Arc<Mutex<State>>,
}

impl InMemoryPolicies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a clone of this store into provider meta
    pub fn service(&self) -> LuminateService {
        LuminateService::new(self.clone())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn stored(&self, id: &str) -> Option<AccessPolicy> {
        self.state.lock().unwrap().policies.get(id).cloned()
    }

    pub fn insert(&self, policy: AccessPolicy) {
        self.state
            .lock()
            .unwrap()
            .policies
            .insert(policy.id.clone(), policy);
    }

    /// Remove a policy behind the adapter's back
    pub fn remove(&self, id: &str) {
        self.state.lock().unwrap().policies.remove(id);
    }

    /// Make the next remote call fail with `error`
    pub fn fail_next(&self, error: ServiceError) {
        self.state.lock().unwrap().fail_next = Some(error);
    }

    fn record(&self, call: Call) -> ServiceResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AccessPolicyService for InMemoryPolicies {
    fn create_access_policy(&self, policy: &AccessPolicy) -> ServiceResult<AccessPolicy> {
        self.record(Call::Create(policy.clone()))?;
        let mut created = policy.clone();
        created.id = uuid::Uuid::new_v4().to_string();
        self.insert(created.clone());
        Ok(created)
    }

    fn get_access_policy(&self, id: &str) -> ServiceResult<Option<AccessPolicy>> {
        self.record(Call::Get(id.to_string()))?;
        Ok(self.stored(id))
    }

    fn update_access_policy(&self, policy: &AccessPolicy) -> ServiceResult<AccessPolicy> {
        self.record(Call::Update(policy.clone()))?;
        if self.stored(&policy.id).is_none() {
            return Err(ServiceError::Api {
                status: 404,
                message: format!("access policy {} not found", policy.id),
            });
        }
        self.insert(policy.clone());
        Ok(policy.clone())
    }

    fn delete_access_policy(&self, id: &str) -> ServiceResult<()> {
        self.record(Call::Delete(id.to_string()))?;
        self.remove(id);
        Ok(())
    }
}

/// Minimal valid web policy declaration
pub fn web_declaration() -> Value {
    json!({
        "name": "intranet",
        "applications": ["app-1"],
    })
}

/// Web policy declaration with every device-trust flag set explicitly
pub fn web_declaration_with_devices(
    opswat: bool,
    symantec_cloudsoc: bool,
    symantec_web_security_service: bool,
    unmanaged_device: bool,
) -> Value {
    json!({
        "name": "intranet",
        "applications": ["app-1"],
        "conditions": [{
            "managed_device": [{
                "opswat": opswat,
                "symantec_cloudsoc": symantec_cloudsoc,
                "symantec_web_security_service": symantec_web_security_service,
            }],
            "unmanaged_device": unmanaged_device,
        }],
    })
}

pub fn load(declaration: Value) -> ResourceData {
    access_policy_core::web_access_policy()
        .load(declaration, true)
        .expect("declaration should be valid")
}
