//! Tests for the auth module

use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTH_PATH: &str = "/api/Auth/AuthorizeByApplication";

fn authenticator(server: &MockServer, credentials: Credentials) -> Authenticator {
    Authenticator::new(credentials, format!("{}{AUTH_PATH}", server.uri())).unwrap()
}

#[tokio::test]
async fn test_authenticate_returns_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("applicationId=app-id"))
        .and(body_string_contains("applicationSecret=app-secret"))
        .and(body_string_contains("Token=install-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Token": "session-xyz",
            "Server": "https://eu-ext.linnworks.net",
            "TTL": 1800
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = authenticator(
        &mock_server,
        Credentials::new("app-id", "app-secret", "install-token"),
    );
    let token = auth.authenticate().await.unwrap();
    assert_eq!(token.as_str(), "session-xyz");
}

#[tokio::test]
async fn test_authenticate_is_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Token": "t"})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let auth = authenticator(&mock_server, Credentials::new("a", "b", "c"));
    auth.authenticate().await.unwrap();
    auth.session_token().await.unwrap();
}

#[tokio::test]
async fn test_unset_credentials_fail_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Token": "t"})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let auth = authenticator(&mock_server, Credentials::default());
    let err = auth.authenticate().await.unwrap_err();

    assert!(err.is_authentication());
    let message = err.to_string();
    assert!(message.contains("applicationId"));
    assert!(message.contains("applicationSecret"));
    assert!(message.contains("Token"));
}

#[tokio::test]
async fn test_empty_credential_counts_as_unset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Token": "t"})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut auth = authenticator(&mock_server, Credentials::new("a", "", "c"));
    let err = auth.authenticate().await.unwrap_err();
    assert!(err.to_string().contains("applicationSecret"));

    // Fixing the credential through the setter is enough
    auth.credentials_mut().set_application_secret("b");
    assert_eq!(auth.credentials().application_secret(), Some("b"));
}

#[tokio::test]
async fn test_rejected_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid application"))
        .mount(&mock_server)
        .await;

    let auth = authenticator(&mock_server, Credentials::new("a", "b", "c"));
    let err = auth.authenticate().await.unwrap_err();

    match err {
        Error::Authentication {
            source: Some(source),
            ..
        } => {
            assert!(matches!(*source, Error::HttpStatus { status: 401, .. }));
        }
        other => panic!("Expected Authentication error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_token_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Server": "x"})))
        .mount(&mock_server)
        .await;

    let auth = authenticator(&mock_server, Credentials::new("a", "b", "c"));
    let err = auth.authenticate().await.unwrap_err();
    assert!(err.is_authentication());
    assert!(err.to_string().contains("Token"));
}

#[tokio::test]
async fn test_malformed_auth_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let auth = authenticator(&mock_server, Credentials::new("a", "b", "c"));
    let err = auth.authenticate().await.unwrap_err();

    match err {
        Error::Authentication {
            source: Some(source),
            ..
        } => assert!(matches!(*source, Error::Decode { .. })),
        other => panic!("Expected Authentication error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_auth_timeout_is_authentication_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Token": "late"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .timeout(Duration::from_millis(50))
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let auth = Authenticator::with_client(
        Credentials::new("a", "b", "c"),
        format!("{}{AUTH_PATH}", mock_server.uri()),
        client,
    );

    let err = auth.authenticate().await.unwrap_err();
    assert!(err.is_authentication());
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_static_session() {
    let session = StaticSession::new("pre-obtained");
    let token = session.session_token().await.unwrap();
    assert_eq!(token.as_str(), "pre-obtained");
}
