//! In-memory settings provider
//!
//! Holds connector properties per tenant domain. Properties a tenant does not
//! configure resolve to the connector defaults, so an unknown tenant gets a
//! disabled gate.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{RwLock, RwLockWriteGuard};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use idv_core::services::identity_verification::properties;
use idv_core::{ConnectorDescriptor, SettingsProvider};

use crate::InfrastructureError;

/// Settings of one tenant as written in a settings file
///
/// ```toml
/// [tenants."carbon.super"]
/// enable = true
/// api_key = "..."
/// api_secret = "..."
/// api_base_path = "https://verify.api.demo.evidentid.com"
/// user_stores = "PRIMARY,SECONDARY"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenantSettings {
    pub enable: Option<bool>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub api_base_path: Option<String>,
    pub email_summary: Option<String>,
    pub email_description: Option<String>,
    pub user_stores: Option<String>,
    pub attributes_requested: Option<String>,
    pub verification_attribute: Option<String>,
    pub verification_value: Option<String>,
}

impl TenantSettings {
    /// Convert to connector properties, leaving out unset fields
    pub fn into_properties(self) -> HashMap<String, String> {
        [
            (properties::ENABLE, self.enable.map(|enable| enable.to_string())),
            (properties::API_KEY, self.api_key),
            (properties::API_SECRET, self.api_secret),
            (properties::API_BASE_PATH, self.api_base_path),
            (properties::EMAIL_SUMMARY, self.email_summary),
            (properties::EMAIL_DESCRIPTION, self.email_description),
            (properties::USER_STORES, self.user_stores),
            (properties::ATTRIBUTES_REQUESTED, self.attributes_requested),
            (properties::VERIFICATION_ATTRIBUTE, self.verification_attribute),
            (properties::VERIFICATION_VALUE, self.verification_value),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name.to_string(), value)))
        .collect()
    }
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    tenants: HashMap<String, TenantSettings>,
}

/// Settings provider backed by per-tenant property maps
pub struct InMemorySettingsProvider {
    tenants: RwLock<HashMap<String, HashMap<String, String>>>,
    defaults: HashMap<String, String>,
}

impl InMemorySettingsProvider {
    pub fn new() -> Self {
        Self {
            tenants: RwLock::new(HashMap::new()),
            defaults: ConnectorDescriptor::default_properties(),
        }
    }

    /// Add or replace the properties of a tenant
    pub fn with_tenant(
        self,
        tenant_domain: &str,
        properties: HashMap<String, String>,
    ) -> Result<Self, InfrastructureError> {
        self.write_tenants()?
            .insert(tenant_domain.to_lowercase(), properties);
        Ok(self)
    }

    /// Set a single property of a tenant
    pub fn set_property(&self, tenant_domain: &str, name: &str, value: &str) -> Result<(), InfrastructureError> {
        self.write_tenants()?
            .entry(tenant_domain.to_lowercase())
            .or_default()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn write_tenants(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<String, HashMap<String, String>>>, InfrastructureError> {
        self.tenants
            .write()
            .map_err(|_| InfrastructureError::Config("Settings lock poisoned".to_string()))
    }

    /// Load tenant settings from a TOML, YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InfrastructureError> {
        let path = path.as_ref();
        let file: SettingsFile = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;

        info!(
            path = %path.display(),
            tenants = file.tenants.len(),
            "Loaded Evident connector settings"
        );

        file.tenants
            .into_iter()
            .try_fold(Self::new(), |provider, (tenant, settings)| {
                provider.with_tenant(&tenant, settings.into_properties())
            })
    }
}

impl Default for InMemorySettingsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsProvider for InMemorySettingsProvider {
    async fn get_properties(
        &self,
        property_names: &[&str],
        tenant_domain: &str,
    ) -> Result<HashMap<String, String>, String> {
        let tenants = self
            .tenants
            .read()
            .map_err(|_| "Settings lock poisoned".to_string())?;
        let configured = tenants.get(&tenant_domain.to_lowercase());
        if configured.is_none() {
            debug!(tenant_domain = tenant_domain, "No settings for tenant, using defaults");
        }

        Ok(property_names
            .iter()
            .filter_map(|name| {
                configured
                    .and_then(|props| props.get(*name))
                    .or_else(|| self.defaults.get(*name))
                    .map(|value| (name.to_string(), value.clone()))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 3] = [properties::ENABLE, properties::API_KEY, properties::USER_STORES];

    #[tokio::test]
    async fn test_unknown_tenant_gets_defaults() {
        let provider = InMemorySettingsProvider::new();
        let props = provider.get_properties(&NAMES, "unknown.example").await.unwrap();

        assert_eq!(props[properties::ENABLE], "false");
        assert_eq!(props[properties::API_KEY], "");
        assert_eq!(props[properties::USER_STORES], "PRIMARY");
    }

    #[tokio::test]
    async fn test_tenant_properties_override_defaults() {
        let provider = InMemorySettingsProvider::new()
            .with_tenant(
                "Carbon.Super",
                HashMap::from([(properties::ENABLE.to_string(), "true".to_string())]),
            )
            .unwrap();
        provider.set_property("carbon.super", properties::API_KEY, "key-1").unwrap();

        let props = provider.get_properties(&NAMES, "carbon.super").await.unwrap();
        assert_eq!(props[properties::ENABLE], "true");
        assert_eq!(props[properties::API_KEY], "key-1");
        assert_eq!(props[properties::USER_STORES], "PRIMARY");
        // Only requested properties are returned
        assert!(!props.contains_key(properties::API_SECRET));
    }

    #[test]
    fn test_tenant_settings_into_properties() {
        let settings = TenantSettings {
            enable: Some(true),
            api_key: Some("key".to_string()),
            user_stores: Some("PRIMARY,SECONDARY".to_string()),
            ..Default::default()
        };

        let props = settings.into_properties();
        assert_eq!(props.len(), 3);
        assert_eq!(props[properties::ENABLE], "true");
        assert_eq!(props[properties::USER_STORES], "PRIMARY,SECONDARY");
    }

    #[tokio::test]
    async fn test_from_file() {
        let path = std::env::temp_dir().join(format!("evident-settings-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
[tenants."carbon.super"]
enable = true
api_key = "file-key"
api_secret = "file-secret"
api_base_path = "https://verify.api.demo.evidentid.com"
user_stores = "PRIMARY"

[tenants."wso2.com"]
enable = false
"#,
        )
        .unwrap();

        let provider = InMemorySettingsProvider::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let names = ConnectorDescriptor::property_names();
        let props = provider.get_properties(&names, "carbon.super").await.unwrap();
        assert_eq!(props[properties::ENABLE], "true");
        assert_eq!(props[properties::API_KEY], "file-key");
        assert_eq!(props[properties::API_SECRET], "file-secret");
        // Unset fields fall back to the defaults
        assert_eq!(props[properties::EMAIL_SUMMARY], "Identity Verification");

        let props = provider.get_properties(&names, "wso2.com").await.unwrap();
        assert_eq!(props[properties::ENABLE], "false");
    }

    #[tokio::test]
    async fn test_poisoned_lock_fails_every_access() {
        let provider = InMemorySettingsProvider::new();
        std::thread::scope(|scope| {
            let writer = scope.spawn(|| {
                let _guard = provider.tenants.write().unwrap();
                panic!("writer failed while holding the settings lock");
            });
            assert!(writer.join().is_err());
        });

        assert!(matches!(
            provider.set_property("carbon.super", properties::API_KEY, "key-1"),
            Err(InfrastructureError::Config(_))
        ));
        assert!(provider.get_properties(&NAMES, "carbon.super").await.is_err());
        assert!(matches!(
            provider.with_tenant("carbon.super", HashMap::new()),
            Err(InfrastructureError::Config(_))
        ));
    }

    #[test]
    fn test_from_missing_file_fails() {
        let result = InMemorySettingsProvider::from_file("/nonexistent/evident.toml");
        assert!(matches!(result, Err(InfrastructureError::SettingsFile(_))));
    }
}
