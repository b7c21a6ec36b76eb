//! Event and outcome types for the verification gate

use std::sync::Arc;

use crate::domain::events::EventKind;

use super::traits::UserStore;

/// Lifecycle event delivered by the host
#[derive(Clone)]
pub struct LifecycleEvent {
    pub kind: EventKind,
    pub username: String,
    pub tenant_domain: String,
    /// Roles assigned at registration, only present on `POST_ADD_USER`
    pub role_list: Option<Vec<String>>,
    /// Store holding the acting user
    pub user_store: Arc<dyn UserStore>,
}

impl LifecycleEvent {
    pub fn post_add_user(
        username: impl Into<String>,
        tenant_domain: impl Into<String>,
        role_list: Vec<String>,
        user_store: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            kind: EventKind::PostAddUser,
            username: username.into(),
            tenant_domain: tenant_domain.into(),
            role_list: Some(role_list),
            user_store,
        }
    }

    pub fn pre_authentication(
        username: impl Into<String>,
        tenant_domain: impl Into<String>,
        user_store: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            kind: EventKind::PreAuthentication,
            username: username.into(),
            tenant_domain: tenant_domain.into(),
            role_list: None,
            user_store,
        }
    }
}

impl std::fmt::Debug for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleEvent")
            .field("kind", &self.kind)
            .field("username", &self.username)
            .field("tenant_domain", &self.tenant_domain)
            .field("role_list", &self.role_list)
            .field("user_store", &self.user_store.domain_name())
            .finish()
    }
}

/// Why an event was let through without any action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Verification is switched off for the tenant
    Disabled,
    /// Enabled, but key, secret or base path is empty
    MissingCredentials,
    /// The user's store is not in the configured allow-list
    UserStoreNotEngaged { user_store: String },
    /// The registered user does not carry the self sign-up role
    NotSelfSignUp,
    /// The registered user has no email address claim
    MissingEmail,
    /// The gate does not act on this event kind
    UnsupportedEvent { event: String },
}

/// What the gate did with an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Skipped(SkipReason),
    /// A verification request was submitted and the account locked
    VerificationRequested { request_id: String },
    /// The account is not locked pending self registration
    NotEligible,
    /// Eligible, but no verification request ID is stored for the user
    RequestIdMissing,
    /// The provider has not confirmed the verification yet
    PendingVerification { request_id: String },
    /// Verification succeeded and the account was unlocked
    Unlocked { request_id: String },
}

impl GateOutcome {
    /// Whether the gate wrote any claims while producing this outcome
    pub fn wrote_claims(&self) -> bool {
        matches!(
            self,
            GateOutcome::VerificationRequested { .. } | GateOutcome::Unlocked { .. }
        )
    }
}
