//! Verification gate implementation

use std::sync::Arc;

use idv_shared::utils::email::{is_valid_email, mask_email};

use crate::domain::entities::user_claims::{
    claim_uris, locked_pending_verification, unlocked_after_verification, ClaimSnapshot,
    Eligibility,
};
use crate::domain::events::{is_self_signup, EventKind};
use crate::domain::value_objects::verification::VerificationRequest;
use crate::errors::{GateError, GateResult};

use super::config::{ConnectorDescriptor, GateSettings};
use super::traits::{SettingsProvider, UserStore, VerificationProvider};
use super::types::{GateOutcome, LifecycleEvent, SkipReason};

/// Gate between account lifecycle events and the verification provider.
///
/// Sends a verification request when a self sign-up user registers and
/// unlocks the account on a later authentication attempt once the provider
/// reports the verification as successful.
pub struct VerificationGate<S: SettingsProvider, P: VerificationProvider> {
    /// Host settings store, queried per tenant on every event
    settings_provider: Arc<S>,
    /// Verification provider API
    provider: Arc<P>,
}

impl<S: SettingsProvider, P: VerificationProvider> VerificationGate<S, P> {
    /// Create a new verification gate
    ///
    /// # Arguments
    ///
    /// * `settings_provider` - Source of the per-tenant connector properties
    /// * `provider` - Verification provider API client
    pub fn new(settings_provider: Arc<S>, provider: Arc<P>) -> Self {
        Self {
            settings_provider,
            provider,
        }
    }

    /// Handle a lifecycle event from the host
    ///
    /// Loads the tenant settings, applies the enabled, credentials and user
    /// store checks, then routes the event by kind.
    ///
    /// # Returns
    ///
    /// * `Ok(GateOutcome)` - What was done, including deliberate no-ops
    /// * `Err(GateError)` - If settings, the user store or the provider failed
    pub async fn handle_event(&self, event: &LifecycleEvent) -> GateResult<GateOutcome> {
        let settings = self.load_settings(&event.tenant_domain).await?;

        if !settings.enabled {
            return Ok(GateOutcome::Skipped(SkipReason::Disabled));
        }

        if !settings.credentials.is_complete() {
            tracing::warn!(
                tenant_domain = %event.tenant_domain,
                "Evident identity verification is enabled but one or more required parameters are not provided"
            );
            return Ok(GateOutcome::Skipped(SkipReason::MissingCredentials));
        }

        let user_store = event.user_store.domain_name();
        if !settings.allows_user_store(&user_store) {
            tracing::debug!(
                username = %event.username,
                user_store = %user_store,
                "User store is not engaged in Evident identity verification"
            );
            return Ok(GateOutcome::Skipped(SkipReason::UserStoreNotEngaged { user_store }));
        }

        match &event.kind {
            EventKind::PreAuthentication => {
                self.on_pre_authentication(&settings, &event.username, event.user_store.as_ref())
                    .await
            }
            EventKind::PostAddUser => {
                let role_list = event.role_list.as_deref().unwrap_or_default();
                self.on_user_registered(&settings, &event.username, event.user_store.as_ref(), role_list)
                    .await
            }
            EventKind::Other(name) => Ok(GateOutcome::Skipped(SkipReason::UnsupportedEvent {
                event: name.clone(),
            })),
        }
    }

    /// Submit a verification request for a newly registered self sign-up user
    ///
    /// On success the account is locked and the request ID stored on the user,
    /// both in one claim write. A 200 response without an ID fails the event;
    /// the request already sent is left as is.
    pub async fn on_user_registered(
        &self,
        settings: &GateSettings,
        username: &str,
        user_store: &dyn UserStore,
        role_list: &[String],
    ) -> GateResult<GateOutcome> {
        if !is_self_signup(role_list) {
            tracing::debug!(
                username = username,
                "User is not eligible for Evident identity verification"
            );
            return Ok(GateOutcome::Skipped(SkipReason::NotSelfSignUp));
        }

        let email = user_store
            .get_claim(username, claim_uris::EMAIL_ADDRESS)
            .await
            .map_err(|e| GateError::UserStore {
                username: username.to_string(),
                message: format!("Error while extracting the email address: {}", e),
            })?;

        let email = match email {
            Some(email) if !email.trim().is_empty() => email,
            _ => {
                tracing::warn!(
                    username = username,
                    "Evident identity verification is enabled but the email address was not found for the user"
                );
                return Ok(GateOutcome::Skipped(SkipReason::MissingEmail));
            }
        };

        if !is_valid_email(&email) {
            tracing::warn!(
                username = username,
                email = %mask_email(&email),
                "Email address claim does not look like an email address, sending it as is"
            );
        }

        let request = VerificationRequest::new(
            email.clone(),
            settings.email_summary.clone(),
            settings.email_description.clone(),
            &settings.policy,
        );

        let receipt = self
            .provider
            .submit_verification_request(&settings.credentials, &request)
            .await
            .map_err(|e| {
                tracing::error!(
                    username = username,
                    error = %e,
                    event = "verification_request_failed",
                    "Failed to send Evident verification request"
                );
                GateError::Provider(e)
            })?;

        let request_id = receipt.id.ok_or_else(|| GateError::MissingRequestId {
            username: username.to_string(),
        })?;

        tracing::debug!(
            username = username,
            email = %mask_email(&email),
            request_id = %request_id,
            user_identity_token = receipt.user_identity_token.as_deref().unwrap_or(""),
            "Evident verification request sent"
        );

        user_store
            .set_claims(username, locked_pending_verification(&request_id))
            .await
            .map_err(|e| GateError::UserStore {
                username: username.to_string(),
                message: format!("Error while setting the Evident verification request ID: {}", e),
            })?;

        tracing::info!(
            username = username,
            request_id = %request_id,
            event = "verification_requested",
            "Account locked pending Evident identity verification"
        );

        Ok(GateOutcome::VerificationRequested { request_id })
    }

    /// Check the verification status of a locked self sign-up user
    ///
    /// Unlocks the account when the provider reports the verification as
    /// successful; otherwise the account stays locked until the next attempt.
    pub async fn on_pre_authentication(
        &self,
        settings: &GateSettings,
        username: &str,
        user_store: &dyn UserStore,
    ) -> GateResult<GateOutcome> {
        let claims = user_store
            .get_claims(username, &ClaimSnapshot::CLAIM_URIS)
            .await
            .map_err(|e| GateError::UserStore {
                username: username.to_string(),
                message: format!("Error occurred during pre authentication, while reading claims: {}", e),
            })?;

        let request_id = match ClaimSnapshot::from_claims(&claims).eligibility() {
            Eligibility::NotEligible => return Ok(GateOutcome::NotEligible),
            Eligibility::MissingRequestId => {
                tracing::warn!(
                    username = username,
                    "User is eligible for Evident identity verification but the Evident ID couldn't be found"
                );
                return Ok(GateOutcome::RequestIdMissing);
            }
            Eligibility::Eligible { request_id } => request_id,
        };

        let record = self
            .provider
            .fetch_verification_record(&settings.credentials, &request_id)
            .await?;

        if !record.is_verified(&settings.policy) {
            tracing::debug!(
                username = username,
                request_id = %request_id,
                "Evident verification is not yet completed for the user"
            );
            return Ok(GateOutcome::PendingVerification { request_id });
        }

        user_store
            .set_claims(username, unlocked_after_verification())
            .await
            .map_err(|e| GateError::UserStore {
                username: username.to_string(),
                message: format!("Error while unlocking the account: {}", e),
            })?;

        tracing::info!(
            username = username,
            request_id = %request_id,
            event = "account_unlocked",
            "Evident verification completed, account unlocked"
        );

        Ok(GateOutcome::Unlocked { request_id })
    }

    /// Load the gate settings of a tenant
    pub async fn load_settings(&self, tenant_domain: &str) -> GateResult<GateSettings> {
        let properties = self
            .settings_provider
            .get_properties(&ConnectorDescriptor::property_names(), tenant_domain)
            .await
            .map_err(|e| {
                tracing::error!(
                    tenant_domain = tenant_domain,
                    error = %e,
                    "Failed to retrieve Evident connector properties"
                );
                GateError::Configuration { message: e }
            })?;

        Ok(GateSettings::from_properties(&properties))
    }
}
