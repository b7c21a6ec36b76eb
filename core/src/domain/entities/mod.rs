//! Domain entities representing the user state the gate reads and writes.

pub mod user_claims;

// Re-export commonly used types
pub use user_claims::{
    claim_uris, locked_pending_verification, unlocked_after_verification, AccountState,
    ClaimSnapshot, Eligibility,
};
