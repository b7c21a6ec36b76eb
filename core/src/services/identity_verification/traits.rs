//! Traits for the collaborators the gate is driven through

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::value_objects::verification::{
    VerificationReceipt, VerificationRecord, VerificationRequest,
};
use crate::errors::ProviderError;

use super::config::ApiCredentials;

/// Trait for the host settings store
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Fetch the named connector properties configured for a tenant
    async fn get_properties(
        &self,
        property_names: &[&str],
        tenant_domain: &str,
    ) -> Result<HashMap<String, String>, String>;
}

/// Trait for the user store holding the acting user.
///
/// All claims are read from and written to the default profile.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Domain name of the store (e.g. `PRIMARY`)
    fn domain_name(&self) -> String;
    /// Read a single claim, `None` when the user has no value for it
    async fn get_claim(&self, username: &str, claim_uri: &str) -> Result<Option<String>, String>;
    /// Read several claims, absent claims are missing from the map
    async fn get_claims(
        &self,
        username: &str,
        claim_uris: &[&str],
    ) -> Result<HashMap<String, String>, String>;
    /// Write several claims in one call
    async fn set_claims(&self, username: &str, claims: HashMap<String, String>) -> Result<(), String>;
}

/// Trait for the identity verification provider API
#[async_trait]
pub trait VerificationProvider: Send + Sync {
    /// Submit a verification request, expecting HTTP 200
    async fn submit_verification_request(
        &self,
        credentials: &ApiCredentials,
        request: &VerificationRequest,
    ) -> Result<VerificationReceipt, ProviderError>;

    /// Fetch the current state of a verification request, expecting HTTP 200
    async fn fetch_verification_record(
        &self,
        credentials: &ApiCredentials,
        request_id: &str,
    ) -> Result<VerificationRecord, ProviderError>;
}
