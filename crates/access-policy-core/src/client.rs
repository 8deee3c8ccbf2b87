//! Seam to the remote access-policy service
//!
//! The adapter never talks to the network itself. It is handed a
//! [`LuminateService`] whose `access_policies` member implements
//! [`AccessPolicyService`]; transport, authentication and retries live
//! behind that trait.

use std::fmt;
use thiserror::Error;

use crate::dto::AccessPolicy;

/// Errors reported by the remote service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service answered with a non-success status
    #[error("Access policy API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Credentials were rejected
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// The service could not be reached
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The response could not be decoded
    #[error("Malformed service response: {0}")]
    Decode(String),
}

/// Result type for service calls
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Access-policy operations offered by the remote service
///
/// Calls are blocking. Implementations must be safe to share; the adapter
/// never calls the same handle concurrently but the orchestrator may share a
/// client between resources.
#[cfg_attr(test, mockall::automock)]
pub trait AccessPolicyService: Send + Sync {
    /// Create a policy; the response carries the assigned identity
    fn create_access_policy(&self, policy: &AccessPolicy) -> ServiceResult<AccessPolicy>;

    /// Fetch a policy by identity. `Ok(None)` means it does not exist.
    fn get_access_policy(&self, id: &str) -> ServiceResult<Option<AccessPolicy>>;

    /// Replace the policy addressed by `policy.id`
    fn update_access_policy(&self, policy: &AccessPolicy) -> ServiceResult<AccessPolicy>;

    fn delete_access_policy(&self, id: &str) -> ServiceResult<()>;
}

/// Service handle expected as provider meta by every resource operation
pub struct LuminateService {
    pub access_policies: Box<dyn AccessPolicyService>,
}

impl LuminateService {
    /// Type name reported in integration errors
    pub const TYPE_NAME: &'static str = "LuminateService";

    pub fn new(access_policies: impl AccessPolicyService + 'static) -> Self {
        Self {
            access_policies: Box::new(access_policies),
        }
    }
}

impl fmt::Debug for LuminateService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LuminateService").finish_non_exhaustive()
    }
}
