//! Evident client integration tests
//!
//! Runs the reqwest client against a wiremock server standing in for the
//! Evident verify API.

use idv_core::{
    ApiCredentials, ProviderError, VerificationPolicy, VerificationProvider, VerificationRequest,
    DOCUMENT_VERIFICATION_STATUS_ATTRIBUTE,
};
use idv_infra::{encoded_credential, EvidentClient};
use idv_shared::HttpClientConfig;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VERIFY_REQUESTS: &str = "/api/v1/verify/requests";

fn credentials(server: &MockServer) -> ApiCredentials {
    ApiCredentials {
        key: "test-key".to_string(),
        secret: "test-secret".to_string(),
        // Trailing slash must not double up in request URLs
        base_path: format!("{}/", server.uri()),
    }
}

fn client() -> EvidentClient {
    EvidentClient::new(HttpClientConfig {
        request_timeout_secs: 1,
        connect_timeout_secs: 1,
        user_agent: "idv-integration-test".to_string(),
    })
    .unwrap()
}

fn basic_auth() -> String {
    format!("Basic {}", encoded_credential("test-key", "test-secret"))
}

fn request() -> VerificationRequest {
    VerificationRequest::new(
        "alice@example.com",
        "Identity Verification",
        "Please verify your identity",
        &VerificationPolicy::default(),
    )
}

#[tokio::test]
async fn test_submit_sends_authorized_json_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(VERIFY_REQUESTS))
        .and(header("authorization", basic_auth().as_str()))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "email": "alice@example.com",
            "summary": "Identity Verification",
            "description": "Please verify your identity",
            "userAuthenticationType": "blindtrust",
            "attributesRequested": [
                {"attributeType": DOCUMENT_VERIFICATION_STATUS_ATTRIBUTE},
                {"attributeType": "core.fullname"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "abc123",
            "userIdentityToken": "token-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client()
        .submit_verification_request(&credentials(&server), &request())
        .await
        .unwrap();

    assert_eq!(receipt.id.as_deref(), Some("abc123"));
    assert_eq!(receipt.user_identity_token.as_deref(), Some("token-1"));
}

#[tokio::test]
async fn test_submit_without_id_returns_empty_receipt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(VERIFY_REQUESTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"userIdentityToken": "t"})))
        .mount(&server)
        .await;

    let receipt = client()
        .submit_verification_request(&credentials(&server), &request())
        .await
        .unwrap();

    assert_eq!(receipt.id, None);
}

#[tokio::test]
async fn test_non_200_status_is_an_error() {
    let server = MockServer::start().await;

    // 201 is not accepted either
    Mock::given(method("POST"))
        .and(path(VERIFY_REQUESTS))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "abc123"})))
        .mount(&server)
        .await;

    let result = client()
        .submit_verification_request(&credentials(&server), &request())
        .await;

    assert!(matches!(result, Err(ProviderError::Status { status: 201, .. })));
}

#[tokio::test]
async fn test_fetch_record_reads_attributes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/abc123", VERIFY_REQUESTS)))
        .and(header("authorization", basic_auth().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "abc123",
            "attributes": [
                {"type": "core.fullname", "values": ["Alice Example"]},
                {"type": DOCUMENT_VERIFICATION_STATUS_ATTRIBUTE, "values": ["Valid"]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client()
        .fetch_verification_record(&credentials(&server), "abc123")
        .await
        .unwrap();

    assert!(record.is_verified(&VerificationPolicy::default()));
}

#[tokio::test]
async fn test_fetch_keeps_request_id_in_one_segment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/a%2Fb%3Fx=1%23frag", VERIFY_REQUESTS)))
        .and(header("authorization", basic_auth().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "attributes": [
                {"type": DOCUMENT_VERIFICATION_STATUS_ATTRIBUTE, "values": ["Valid"]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client()
        .fetch_verification_record(&credentials(&server), "a/b?x=1#frag")
        .await
        .unwrap();

    assert!(record.is_verified(&VerificationPolicy::default()));
}

#[tokio::test]
async fn test_dot_segment_request_id_is_rejected_without_a_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"attributes": []})))
        .expect(0)
        .mount(&server)
        .await;

    let result = client()
        .fetch_verification_record(&credentials(&server), "..")
        .await;

    assert!(matches!(result, Err(ProviderError::InvalidRequestId { .. })));
}

#[tokio::test]
async fn test_fetch_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/abc123", VERIFY_REQUESTS)))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let result = client()
        .fetch_verification_record(&credentials(&server), "abc123")
        .await;

    match result {
        Err(ProviderError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/abc123", VERIFY_REQUESTS)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client()
        .fetch_verification_record(&credentials(&server), "abc123")
        .await;

    assert!(matches!(result, Err(ProviderError::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/abc123", VERIFY_REQUESTS)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"attributes": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let result = client()
        .fetch_verification_record(&credentials(&server), "abc123")
        .await;

    assert_eq!(result.unwrap_err(), ProviderError::Timeout);
}

#[tokio::test]
async fn test_unreachable_provider_is_transport_error() {
    let credentials = ApiCredentials {
        key: "k".to_string(),
        secret: "s".to_string(),
        base_path: "http://127.0.0.1:1".to_string(),
    };

    let result = client().fetch_verification_record(&credentials, "abc123").await;

    assert!(matches!(result, Err(ProviderError::Transport { .. })));
}
