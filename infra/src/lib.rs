//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the verification gate is
//! driven through.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Evident**: HTTP client for the Evident verify API using reqwest
//! - **Settings**: Per-tenant connector settings from memory, files or the environment
//! - **User store**: In-memory claim store for embedding and tests
//! - **Telemetry**: tracing subscriber initialization

// Re-export core types for convenience
pub use idv_core::errors::*;

/// Evident verify API client
pub mod evident;

/// Settings providers
pub mod settings;

/// User store implementations
pub mod user_store;

/// Logging initialization
pub mod telemetry;

pub use evident::{encoded_credential, EvidentClient};
pub use settings::{EnvSettingsProvider, InMemorySettingsProvider};
pub use telemetry::init_tracing;
pub use user_store::InMemoryUserStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Settings file could not be loaded
    #[error("Settings file error: {0}")]
    SettingsFile(#[from] config::ConfigError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
