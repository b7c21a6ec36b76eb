//! Connector properties and per-tenant gate settings

use std::collections::HashMap;

use idv_shared::utils::list::parse_comma_list;

use crate::domain::value_objects::verification::VerificationPolicy;

/// Property keys read from the host settings store
pub mod properties {
    pub const ENABLE: &str = "evidentVerify.enable";
    pub const API_KEY: &str = "evidentVerify.api.key";
    pub const API_SECRET: &str = "evidentVerify.api.secret";
    pub const API_BASE_PATH: &str = "evidentVerify.api.base.path";
    pub const EMAIL_SUMMARY: &str = "evidentVerify.email.summary";
    pub const EMAIL_DESCRIPTION: &str = "evidentVerify.email.description";
    pub const USER_STORES: &str = "evidentVerify.userstores";
    pub const ATTRIBUTES_REQUESTED: &str = "evidentVerify.attributes.requested";
    pub const VERIFICATION_ATTRIBUTE: &str = "evidentVerify.verification.attribute";
    pub const VERIFICATION_VALUE: &str = "evidentVerify.verification.value";
}

/// Path of the verify requests resource, relative to the API base path
pub const VERIFY_REQUESTS_PATH: &str = "api/v1/verify/requests";

pub const DEFAULT_API_BASE_PATH: &str = "https://verify.api.demo.evidentid.com";
pub const DEFAULT_EMAIL_SUMMARY: &str = "Identity Verification";
pub const DEFAULT_EMAIL_DESCRIPTION: &str =
    "WSO2 needs to verify your US driver's license in order to accept you as a new user.";
pub const DEFAULT_USER_STORES: &str = "PRIMARY";

/// Metadata the host uses to register and render the connector
pub struct ConnectorDescriptor;

impl ConnectorDescriptor {
    pub const NAME: &'static str = "evidentEventHandler";
    pub const FRIENDLY_NAME: &'static str = "Evident Identity Verification";
    pub const CATEGORY: &'static str = "Account Management Policies";
    pub const SUB_CATEGORY: &'static str = "DEFAULT";
    pub const ORDER: i32 = 50;

    /// Property names, in the order they are displayed
    pub fn property_names() -> Vec<&'static str> {
        vec![
            properties::ENABLE,
            properties::API_BASE_PATH,
            properties::API_KEY,
            properties::API_SECRET,
            properties::EMAIL_SUMMARY,
            properties::EMAIL_DESCRIPTION,
            properties::USER_STORES,
            properties::ATTRIBUTES_REQUESTED,
            properties::VERIFICATION_ATTRIBUTE,
            properties::VERIFICATION_VALUE,
        ]
    }

    pub fn property_display_names() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (properties::ENABLE, "Enable Identity Verification"),
            (properties::API_KEY, "API Key"),
            (properties::API_SECRET, "API Secret"),
            (properties::API_BASE_PATH, "API Base Path"),
            (properties::EMAIL_SUMMARY, "Verification Email Summary"),
            (properties::EMAIL_DESCRIPTION, "Verification Email Description"),
            (properties::USER_STORES, "Verify Enabled User Stores"),
            (properties::ATTRIBUTES_REQUESTED, "Requested Attributes"),
            (properties::VERIFICATION_ATTRIBUTE, "Verification Attribute"),
            (properties::VERIFICATION_VALUE, "Verification Success Value"),
        ])
    }

    pub fn property_descriptions() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (
                properties::ENABLE,
                "Verify the identities of self sign-up users with Evident. Note: User Self Registration needs to be enabled.",
            ),
            (properties::API_KEY, "API key obtained from Evident."),
            (properties::API_SECRET, "API secret obtained from Evident."),
            (
                properties::API_BASE_PATH,
                "API base path of the Evident. Ex: https://verify.api.demo.evidentid.com",
            ),
            (
                properties::EMAIL_SUMMARY,
                "This will appear in the verification request email along with the text: [Action Required to Complete Your <Summary>].",
            ),
            (
                properties::EMAIL_DESCRIPTION,
                "This will appear in the verification request email as the description.",
            ),
            (
                properties::USER_STORES,
                "Verification will only be engaged for the user stores added here. Comma separated multiple values accepted. If kept empty, verification will be applied to all user stores.",
            ),
            (
                properties::ATTRIBUTES_REQUESTED,
                "Comma separated Evident attribute types requested from the user.",
            ),
            (
                properties::VERIFICATION_ATTRIBUTE,
                "Evident attribute type whose value decides whether the user is verified.",
            ),
            (
                properties::VERIFICATION_VALUE,
                "Value of the verification attribute that marks a successful verification.",
            ),
        ])
    }

    /// Default value of every property
    pub fn default_properties() -> HashMap<String, String> {
        let policy = VerificationPolicy::default();
        HashMap::from([
            (properties::ENABLE.to_string(), "false".to_string()),
            (properties::API_BASE_PATH.to_string(), DEFAULT_API_BASE_PATH.to_string()),
            (properties::API_KEY.to_string(), String::new()),
            (properties::API_SECRET.to_string(), String::new()),
            (properties::EMAIL_SUMMARY.to_string(), DEFAULT_EMAIL_SUMMARY.to_string()),
            (properties::EMAIL_DESCRIPTION.to_string(), DEFAULT_EMAIL_DESCRIPTION.to_string()),
            (properties::USER_STORES.to_string(), DEFAULT_USER_STORES.to_string()),
            (
                properties::ATTRIBUTES_REQUESTED.to_string(),
                policy.attributes_requested.join(","),
            ),
            (
                properties::VERIFICATION_ATTRIBUTE.to_string(),
                policy.verification_attribute,
            ),
            (properties::VERIFICATION_VALUE.to_string(), policy.expected_value),
        ])
    }
}

/// Credentials and location of the provider API
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub key: String,
    pub secret: String,
    pub base_path: String,
}

impl ApiCredentials {
    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.secret.is_empty() && !self.base_path.is_empty()
    }

    /// `{base}/api/v1/verify/requests`
    pub fn verify_requests_url(&self) -> String {
        format!("{}/{}", self.base_path.trim_end_matches('/'), VERIFY_REQUESTS_PATH)
    }
}

// Keep the secret out of logs
impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("key", &self.key)
            .field("secret", &"***")
            .field("base_path", &self.base_path)
            .finish()
    }
}

/// Settings of the gate for one tenant, read at the start of every event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSettings {
    pub enabled: bool,
    pub credentials: ApiCredentials,
    pub email_summary: String,
    pub email_description: String,
    /// User stores engaged in verification, `None` engages all of them
    pub user_stores: Option<Vec<String>>,
    pub policy: VerificationPolicy,
}

impl GateSettings {
    /// Parse the property map returned by the settings provider.
    ///
    /// Missing properties are treated as empty. Only a case-insensitive `true`
    /// enables the gate. Empty policy properties fall back to the defaults.
    pub fn from_properties(props: &HashMap<String, String>) -> Self {
        let get = |name: &str| props.get(name).map(|v| v.trim().to_string()).unwrap_or_default();

        let user_stores = parse_comma_list(&get(properties::USER_STORES));
        let defaults = VerificationPolicy::default();
        let attributes_requested = parse_comma_list(&get(properties::ATTRIBUTES_REQUESTED));
        let verification_attribute = get(properties::VERIFICATION_ATTRIBUTE);
        let expected_value = get(properties::VERIFICATION_VALUE);

        Self {
            enabled: get(properties::ENABLE).eq_ignore_ascii_case("true"),
            credentials: ApiCredentials {
                key: get(properties::API_KEY),
                secret: get(properties::API_SECRET),
                base_path: get(properties::API_BASE_PATH),
            },
            email_summary: props.get(properties::EMAIL_SUMMARY).cloned().unwrap_or_default(),
            email_description: props.get(properties::EMAIL_DESCRIPTION).cloned().unwrap_or_default(),
            user_stores: if user_stores.is_empty() { None } else { Some(user_stores) },
            policy: VerificationPolicy {
                attributes_requested: if attributes_requested.is_empty() {
                    defaults.attributes_requested
                } else {
                    attributes_requested
                },
                verification_attribute: if verification_attribute.is_empty() {
                    defaults.verification_attribute
                } else {
                    verification_attribute
                },
                expected_value: if expected_value.is_empty() {
                    defaults.expected_value
                } else {
                    expected_value
                },
            },
        }
    }

    /// Whether the gate is engaged for users of the given store
    pub fn allows_user_store(&self, user_store: &str) -> bool {
        match &self.user_stores {
            Some(stores) => stores.iter().any(|store| store == user_store),
            None => true,
        }
    }
}
