//! Business services containing domain logic and use cases.

pub mod identity_verification;

// Re-export commonly used types
pub use identity_verification::{
    ApiCredentials, ConnectorDescriptor, GateOutcome, GateSettings, LifecycleEvent,
    SettingsProvider, SkipReason, UserStore, VerificationGate, VerificationProvider,
};
