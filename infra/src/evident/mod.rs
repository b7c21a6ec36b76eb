//! Evident Verify API Module
//!
//! HTTP client for submitting verification requests to Evident and reading
//! back their status.

pub mod client;

pub use client::{encoded_credential, verify_request_url, EvidentClient};
