//! Gate error types.
//!
//! Only integration faults are errors. Expected no-op conditions (missing
//! email, ineligible role, disallowed user store, not yet verified) are
//! reported as a [`GateOutcome`](crate::services::GateOutcome) instead.

use thiserror::Error;

/// Errors that abort processing of the current lifecycle event
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Error while retrieving verification connector properties: {message}")]
    Configuration { message: String },

    #[error("User store error for user {username}: {message}")]
    UserStore { username: String, message: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Evident verification request ID was missing for the user: {username}")]
    MissingRequestId { username: String },
}

/// Errors raised while talking to the verification provider API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Evident API error. Error code: {status} Error message: {body}")]
    Status { status: u16, body: String },

    #[error("Error while sending Evident API request: {message}")]
    Transport { message: String },

    #[error("Evident API request timed out")]
    Timeout,

    #[error("Malformed Evident API response: {message}")]
    MalformedResponse { message: String },

    #[error("Evident verification request ID cannot be used in a request URL: {request_id}")]
    InvalidRequestId { request_id: String },

    #[error("Invalid Evident API base path: {message}")]
    InvalidBasePath { message: String },
}

impl GateError {
    /// Whether the error came from the provider API rather than the host environment
    pub fn is_provider_error(&self) -> bool {
        matches!(self, GateError::Provider(_))
    }
}

pub type GateResult<T> = Result<T, GateError>;
