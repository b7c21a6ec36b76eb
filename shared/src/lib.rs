//! Shared utilities and common types for the identity verification gate
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration types (environment, logging, outbound HTTP client)
//! - Utility functions (email masking, property list parsing)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{Environment, HttpClientConfig, LogFormat, LoggingConfig};
pub use utils::{email, list};
