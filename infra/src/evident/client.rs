//! Evident Verify API Client
//!
//! Implements the `VerificationProvider` trait against the Evident verify
//! API using reqwest.
//!
//! ## Behaviour
//!
//! - HTTP Basic authentication with `base64(key:secret)`
//! - Only HTTP 200 counts as success, any other status is an error
//! - No retries; every request is bounded by the configured timeout
//! - Email addresses are masked in logs
//! - The request ID is sent as one escaped path segment

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode, Url};
use tracing::{debug, error};

use idv_core::errors::ProviderError;
use idv_core::{
    ApiCredentials, VerificationProvider, VerificationReceipt, VerificationRecord,
    VerificationRequest,
};
use idv_shared::utils::email::mask_email;
use idv_shared::HttpClientConfig;

use crate::InfrastructureError;

/// Encode API credentials for the Basic authorization header
pub fn encoded_credential(key: &str, secret: &str) -> String {
    BASE64.encode(format!("{}:{}", key, secret))
}

/// Evident verify API client
#[derive(Clone)]
pub struct EvidentClient {
    client: reqwest::Client,
    config: HttpClientConfig,
}

impl EvidentClient {
    /// Create a new client with explicit timeouts
    pub fn new(config: HttpClientConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        debug!(
            request_timeout_secs = config.request_timeout_secs,
            connect_timeout_secs = config.connect_timeout_secs,
            "Evident client initialized"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(HttpClientConfig::from_env())
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    fn authorized(&self, request: RequestBuilder, credentials: &ApiCredentials) -> RequestBuilder {
        request
            .header(
                AUTHORIZATION,
                format!("Basic {}", encoded_credential(&credentials.key, &credentials.secret)),
            )
            .header(CONTENT_TYPE, "application/json")
    }

    /// Send a request and return the body of a 200 response
    async fn execute(&self, request: RequestBuilder, url: &str) -> Result<String, ProviderError> {
        let response = request.send().await.map_err(|e| transport_error(e, url))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(e, url))?;

        if status != StatusCode::OK {
            error!(
                url = url,
                status = status.as_u16(),
                "Error status returned from the Evident API"
            );
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

fn transport_error(e: reqwest::Error, url: &str) -> ProviderError {
    if e.is_timeout() {
        error!(url = url, "Evident API request timed out");
        ProviderError::Timeout
    } else {
        error!(url = url, error = %e, "Error occurred while sending Evident API request");
        ProviderError::Transport {
            message: e.to_string(),
        }
    }
}

/// `{base}/api/v1/verify/requests/{id}`, with `/`, `?`, `#` and `%` in the ID escaped
pub fn verify_request_url(
    credentials: &ApiCredentials,
    request_id: &str,
) -> Result<Url, ProviderError> {
    // Dot segments would be dropped and address the collection instead
    if request_id.is_empty() || request_id == "." || request_id == ".." {
        return Err(ProviderError::InvalidRequestId {
            request_id: request_id.to_string(),
        });
    }

    let mut url = Url::parse(&credentials.verify_requests_url()).map_err(|e| {
        ProviderError::InvalidBasePath {
            message: e.to_string(),
        }
    })?;
    url.path_segments_mut()
        .map_err(|_| ProviderError::InvalidBasePath {
            message: credentials.base_path.clone(),
        })?
        .pop_if_empty()
        .push(request_id);

    Ok(url)
}

fn malformed(e: serde_json::Error) -> ProviderError {
    ProviderError::MalformedResponse {
        message: e.to_string(),
    }
}

#[async_trait]
impl VerificationProvider for EvidentClient {
    async fn submit_verification_request(
        &self,
        credentials: &ApiCredentials,
        request: &VerificationRequest,
    ) -> Result<VerificationReceipt, ProviderError> {
        let url = credentials.verify_requests_url();
        debug!(
            url = %url,
            email = %mask_email(&request.email),
            "Sending POST request to Evident"
        );

        let builder = self.authorized(self.client.post(&url), credentials).json(request);
        let body = self.execute(builder, &url).await?;

        let value: serde_json::Value = serde_json::from_str(&body).map_err(malformed)?;
        Ok(VerificationReceipt::from_json(&value))
    }

    async fn fetch_verification_record(
        &self,
        credentials: &ApiCredentials,
        request_id: &str,
    ) -> Result<VerificationRecord, ProviderError> {
        let url = verify_request_url(credentials, request_id)?;
        debug!(url = %url, "Sending GET request to Evident");

        let builder = self.authorized(self.client.get(url.clone()), credentials);
        let body = self.execute(builder, url.as_str()).await?;

        serde_json::from_str(&body).map_err(malformed)
    }
}
