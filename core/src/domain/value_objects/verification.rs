//! Verification request and status payloads of the Evident verify API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Authentication type requested for every verification
pub const BLINDTRUST_AUTHENTICATION_TYPE: &str = "blindtrust";

/// Document verification status of a US driver's license
pub const DOCUMENT_VERIFICATION_STATUS_ATTRIBUTE: &str =
    "identity_assurance.document_verification.americas.us.drivers_license.verification_status";

pub const FULL_NAME_ATTRIBUTE: &str = "core.fullname";

/// Value the provider reports for a successfully verified document
pub const VALID_VERIFICATION_VALUE: &str = "Valid";

/// Which attributes to request and which one decides the outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationPolicy {
    /// Attribute types requested from the user
    pub attributes_requested: Vec<String>,
    /// Attribute type whose first value decides the verification
    pub verification_attribute: String,
    /// Value that marks the verification as successful
    pub expected_value: String,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            attributes_requested: vec![
                DOCUMENT_VERIFICATION_STATUS_ATTRIBUTE.to_string(),
                FULL_NAME_ATTRIBUTE.to_string(),
            ],
            verification_attribute: DOCUMENT_VERIFICATION_STATUS_ATTRIBUTE.to_string(),
            expected_value: VALID_VERIFICATION_VALUE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedAttribute {
    pub attribute_type: String,
}

/// Body of `POST /api/v1/verify/requests`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub email: String,
    pub summary: String,
    pub description: String,
    pub user_authentication_type: String,
    pub attributes_requested: Vec<RequestedAttribute>,
}

impl VerificationRequest {
    pub fn new(
        email: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
        policy: &VerificationPolicy,
    ) -> Self {
        Self {
            email: email.into(),
            summary: summary.into(),
            description: description.into(),
            user_authentication_type: BLINDTRUST_AUTHENTICATION_TYPE.to_string(),
            attributes_requested: policy
                .attributes_requested
                .iter()
                .map(|attribute_type| RequestedAttribute {
                    attribute_type: attribute_type.clone(),
                })
                .collect(),
        }
    }
}

/// Response of a successful verification request submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReceipt {
    /// Verification request ID, absent when the provider did not return one
    pub id: Option<String>,
    /// Token identifying the user at the provider, only used for logging
    pub user_identity_token: Option<String>,
}

impl VerificationReceipt {
    /// Extract the receipt from a response body.
    ///
    /// Scalar IDs are accepted as their string form; `null`, empty strings and
    /// structured values count as absent.
    pub fn from_json(body: &Value) -> Self {
        Self {
            id: scalar_to_string(body.get("id")),
            user_identity_token: scalar_to_string(body.get("userIdentityToken")),
        }
    }
}

fn scalar_to_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// One entry of the `attributes` array of a verification request
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AttributeEntry {
    #[serde(rename = "type", default)]
    pub attribute_type: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<Value>>,
}

/// Response of `GET /api/v1/verify/requests/{id}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VerificationRecord {
    #[serde(default)]
    pub attributes: Vec<AttributeEntry>,
}

impl VerificationRecord {
    /// Decide the verification outcome.
    ///
    /// The first entry of the policy's attribute type with a non-empty `values`
    /// array decides; its first value must equal the expected value. Without
    /// such an entry the user is not verified.
    pub fn is_verified(&self, policy: &VerificationPolicy) -> bool {
        self.attributes
            .iter()
            .filter(|entry| entry.attribute_type.as_deref() == Some(policy.verification_attribute.as_str()))
            .find_map(|entry| entry.values.as_ref().and_then(|values| values.first()))
            .map(|first| first.as_str() == Some(policy.expected_value.as_str()))
            .unwrap_or(false)
    }
}
