//! User claims that drive the verification lifecycle.
//!
//! Claims are owned and persisted by the host user store. The gate only reads
//! the lock flag, the account state and the verification request ID, and
//! writes them back through a single `set_claims` call per operation.

use std::collections::HashMap;

/// Claim URIs in the default profile
pub mod claim_uris {
    pub const ACCOUNT_LOCKED: &str = "http://wso2.org/claims/identity/accountLocked";
    pub const ACCOUNT_STATE: &str = "http://wso2.org/claims/identity/accountState";
    pub const EMAIL_ADDRESS: &str = "http://wso2.org/claims/emailaddress";
    pub const VERIFICATION_REQUEST_ID: &str = "http://wso2.org/claims/identity/evidentRequestID";
}

const PENDING_SELF_REGISTRATION_VALUE: &str = "PENDING_SR";
const UNLOCKED_VALUE: &str = "UNLOCKED";

/// Value of the account state claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountState {
    /// Self-registered account waiting for confirmation
    PendingSelfRegistration,
    Unlocked,
    /// Any other state set by the host
    Other(String),
}

impl AccountState {
    pub fn from_claim(value: &str) -> Self {
        match value {
            PENDING_SELF_REGISTRATION_VALUE => AccountState::PendingSelfRegistration,
            UNLOCKED_VALUE => AccountState::Unlocked,
            other => AccountState::Other(other.to_string()),
        }
    }

    pub fn as_claim_value(&self) -> &str {
        match self {
            AccountState::PendingSelfRegistration => PENDING_SELF_REGISTRATION_VALUE,
            AccountState::Unlocked => UNLOCKED_VALUE,
            AccountState::Other(value) => value,
        }
    }
}

/// Result of the eligibility check performed before authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// Account is not locked pending self registration
    NotEligible,
    /// Eligible, but no verification request was ever recorded
    MissingRequestId,
    /// Eligible with the recorded verification request ID
    Eligible { request_id: String },
}

/// The verification related claims of one user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSnapshot {
    pub account_locked: Option<String>,
    pub account_state: Option<String>,
    pub verification_request_id: Option<String>,
}

impl ClaimSnapshot {
    /// Claim URIs needed to build a snapshot
    pub const CLAIM_URIS: [&'static str; 3] = [
        claim_uris::ACCOUNT_LOCKED,
        claim_uris::ACCOUNT_STATE,
        claim_uris::VERIFICATION_REQUEST_ID,
    ];

    /// Build a snapshot from the claim map returned by the user store
    pub fn from_claims(claims: &HashMap<String, String>) -> Self {
        Self {
            account_locked: claims.get(claim_uris::ACCOUNT_LOCKED).cloned(),
            account_state: claims.get(claim_uris::ACCOUNT_STATE).cloned(),
            verification_request_id: claims.get(claim_uris::VERIFICATION_REQUEST_ID).cloned(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.account_locked.as_deref() == Some("true")
    }

    pub fn account_state(&self) -> Option<AccountState> {
        self.account_state.as_deref().map(AccountState::from_claim)
    }

    /// Only a locked account pending self registration is checked with the provider
    pub fn eligibility(&self) -> Eligibility {
        if !self.is_locked() || self.account_state() != Some(AccountState::PendingSelfRegistration) {
            return Eligibility::NotEligible;
        }

        match self.verification_request_id.as_deref() {
            Some(id) if !id.is_empty() => Eligibility::Eligible {
                request_id: id.to_string(),
            },
            _ => Eligibility::MissingRequestId,
        }
    }
}

/// Claims written after a verification request was accepted by the provider
pub fn locked_pending_verification(request_id: &str) -> HashMap<String, String> {
    HashMap::from([
        (claim_uris::ACCOUNT_LOCKED.to_string(), "true".to_string()),
        (claim_uris::VERIFICATION_REQUEST_ID.to_string(), request_id.to_string()),
    ])
}

/// Claims written once the provider reports a successful verification
pub fn unlocked_after_verification() -> HashMap<String, String> {
    HashMap::from([
        (claim_uris::ACCOUNT_LOCKED.to_string(), "false".to_string()),
        (
            claim_uris::ACCOUNT_STATE.to_string(),
            AccountState::Unlocked.as_claim_value().to_string(),
        ),
    ])
}
