//! Identity verification gate for self sign-up accounts
//!
//! This module connects the account lifecycle with the Evident verify API:
//! - Verification request submission when a self sign-up user registers
//! - Account locking until the provider confirms the verification
//! - Status checks and account unlocking before authentication
//! - Per-tenant connector settings and the user store allow-list

mod config;
mod gate;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::{
    properties, ApiCredentials, ConnectorDescriptor, GateSettings, DEFAULT_API_BASE_PATH,
    DEFAULT_EMAIL_DESCRIPTION, DEFAULT_EMAIL_SUMMARY, DEFAULT_USER_STORES, VERIFY_REQUESTS_PATH,
};
pub use gate::VerificationGate;
pub use traits::{SettingsProvider, UserStore, VerificationProvider};
pub use types::{GateOutcome, LifecycleEvent, SkipReason};
