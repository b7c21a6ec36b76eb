//! Configuration module
//!
//! - `environment` - Environment detection and logging configuration
//! - `http_client` - Timeouts and identification for outbound provider calls

pub mod environment;
pub mod http_client;

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use http_client::HttpClientConfig;
