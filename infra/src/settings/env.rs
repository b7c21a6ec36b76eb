//! Environment settings provider
//!
//! Reads connector properties from `EVIDENT_VERIFY_*` environment variables,
//! e.g. `evidentVerify.api.base.path` from `EVIDENT_VERIFY_API_BASE_PATH`.
//! The same settings apply to every tenant.

use std::collections::HashMap;
use std::env;

use async_trait::async_trait;
use tracing::debug;

use idv_core::{ConnectorDescriptor, SettingsProvider};
use idv_shared::Environment;

const PROPERTY_PREFIX: &str = "evidentVerify.";
const ENV_PREFIX: &str = "EVIDENT_VERIFY_";

/// Settings provider backed by process environment variables
pub struct EnvSettingsProvider {
    defaults: HashMap<String, String>,
}

impl EnvSettingsProvider {
    pub fn new() -> Self {
        Self {
            defaults: ConnectorDescriptor::default_properties(),
        }
    }

    /// Load the `.env` file of the current environment, then `.env`, before
    /// creating the provider
    pub fn with_dotenv() -> Self {
        let environment = Environment::from_env();
        if dotenvy::from_filename(environment.env_file()).is_err() {
            dotenvy::dotenv().ok();
        }
        debug!(environment = %environment, "Loaded environment files for Evident settings");
        Self::new()
    }

    /// Environment variable holding a connector property
    pub fn env_var_name(property_name: &str) -> String {
        let suffix = property_name.strip_prefix(PROPERTY_PREFIX).unwrap_or(property_name);
        format!("{}{}", ENV_PREFIX, suffix.replace('.', "_").to_uppercase())
    }
}

impl Default for EnvSettingsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsProvider for EnvSettingsProvider {
    async fn get_properties(
        &self,
        property_names: &[&str],
        _tenant_domain: &str,
    ) -> Result<HashMap<String, String>, String> {
        Ok(property_names
            .iter()
            .filter_map(|name| {
                env::var(Self::env_var_name(name))
                    .ok()
                    .or_else(|| self.defaults.get(*name).cloned())
                    .map(|value| (name.to_string(), value))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idv_core::services::identity_verification::properties;

    #[test]
    fn test_env_var_name() {
        assert_eq!(EnvSettingsProvider::env_var_name(properties::ENABLE), "EVIDENT_VERIFY_ENABLE");
        assert_eq!(
            EnvSettingsProvider::env_var_name(properties::API_BASE_PATH),
            "EVIDENT_VERIFY_API_BASE_PATH"
        );
        assert_eq!(
            EnvSettingsProvider::env_var_name(properties::USER_STORES),
            "EVIDENT_VERIFY_USERSTORES"
        );
    }

    #[tokio::test]
    async fn test_properties_from_env() {
        std::env::set_var("EVIDENT_VERIFY_ENABLE", "true");
        std::env::set_var("EVIDENT_VERIFY_API_KEY", "env-key");
        std::env::remove_var("EVIDENT_VERIFY_EMAIL_SUMMARY");

        let provider = EnvSettingsProvider::new();
        let props = provider
            .get_properties(
                &[properties::ENABLE, properties::API_KEY, properties::EMAIL_SUMMARY],
                "any.tenant",
            )
            .await
            .unwrap();

        assert_eq!(props[properties::ENABLE], "true");
        assert_eq!(props[properties::API_KEY], "env-key");
        assert_eq!(props[properties::EMAIL_SUMMARY], "Identity Verification");

        std::env::remove_var("EVIDENT_VERIFY_ENABLE");
        std::env::remove_var("EVIDENT_VERIFY_API_KEY");
    }
}
