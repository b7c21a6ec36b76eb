//! Outbound HTTP client configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Timeouts and identification used for calls to the verification provider.
///
/// Every request is bounded by `request_timeout_secs`; expiry is reported as a
/// single timeout error by the client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpClientConfig {
    /// Total time allowed for one request, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Time allowed to establish the connection, in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpClientConfig {
    /// Load from `EVIDENT_HTTP_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            request_timeout_secs: env::var("EVIDENT_HTTP_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
            connect_timeout_secs: env::var("EVIDENT_HTTP_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_connect_timeout),
            user_agent: env::var("EVIDENT_HTTP_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("evident-idv-gate/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpClientConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert!(config.user_agent.starts_with("evident-idv-gate/"));
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("EVIDENT_HTTP_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("EVIDENT_HTTP_CONNECT_TIMEOUT_SECS", "not-a-number");

        let config = HttpClientConfig::from_env();
        assert_eq!(config.request_timeout_secs, 5);
        // Unparseable values fall back to the default
        assert_eq!(config.connect_timeout_secs, 10);

        std::env::remove_var("EVIDENT_HTTP_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("EVIDENT_HTTP_CONNECT_TIMEOUT_SECS");
    }
}
