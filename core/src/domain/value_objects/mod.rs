//! Value objects exchanged with the verification provider.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    AttributeEntry, RequestedAttribute, VerificationPolicy, VerificationReceipt,
    VerificationRecord, VerificationRequest, BLINDTRUST_AUTHENTICATION_TYPE,
    DOCUMENT_VERIFICATION_STATUS_ATTRIBUTE, FULL_NAME_ATTRIBUTE, VALID_VERIFICATION_VALUE,
};
