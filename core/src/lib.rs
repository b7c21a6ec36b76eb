//! # IDV Core
//!
//! Core domain and business logic for Evident identity verification of self
//! sign-up accounts. This crate contains the claim and event model, the
//! verification gate service, the collaborator traits it is driven through,
//! and the error types shared with the infrastructure layer.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
