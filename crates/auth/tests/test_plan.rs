//! Integration tests for the auth client against a stub HTTP server.

use std::time::Duration;

use httpmock::prelude::*;
use mozik_auth::{AuthClient, AuthError, AuthOutcome};
use mozik_config::ApiConfig;
use serde_json::json;

fn client_for(base_url: String) -> AuthClient {
    let api = ApiConfig {
        base_url,
        request_timeout_seconds: None,
    };
    AuthClient::new(&api).expect("client should build")
}

/// Base URL of a port nothing is listening on.
fn refused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/")
}

#[tokio::test]
async fn login_posts_credentials_and_reports_acceptance() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/login")
                .json_body(json!({"email": "a@b.com", "password": "pw"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"success": true, "message": "ok"}));
        })
        .await;

    let client = client_for(server.base_url());
    let outcome = client.login("a@b.com", "pw").await.expect("login should succeed");

    mock.assert_async().await;
    assert_eq!(
        outcome,
        AuthOutcome::Accepted {
            message: "ok".into()
        }
    );
}

#[tokio::test]
async fn login_surfaces_server_rejection_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/login");
            then.status(200)
                .json_body(json!({"success": false, "message": "bad credentials"}));
        })
        .await;

    let outcome = client_for(server.base_url())
        .login("a@b.com", "wrong")
        .await
        .expect("a rejection is still a well-formed reply");

    assert_eq!(
        outcome,
        AuthOutcome::Rejected {
            message: "bad credentials".into()
        }
    );
}

#[tokio::test]
async fn signup_sends_nickname() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/signup").json_body(json!({
                "email": "new@b.com",
                "password": "pw",
                "nickname": "모자이크"
            }));
            then.status(200)
                .json_body(json!({"success": true, "message": "created"}));
        })
        .await;

    let outcome = client_for(format!("{}/", server.base_url()))
        .signup("new@b.com", "pw", "모자이크")
        .await
        .expect("signup should succeed");

    mock.assert_async().await;
    assert!(outcome.is_accepted());
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let error = client_for(refused_base_url())
        .login("a@b.com", "pw")
        .await
        .expect_err("nothing is listening");

    assert!(matches!(error, AuthError::Transport(_)), "got {error:?}");
}

#[tokio::test]
async fn error_status_without_reply_body_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/login");
            then.status(503).body("maintenance");
        })
        .await;

    let error = client_for(server.base_url())
        .login("a@b.com", "pw")
        .await
        .expect_err("503 must not be treated as success");

    assert!(matches!(error, AuthError::Status(503)), "got {error:?}");
}

#[tokio::test]
async fn error_status_with_rejection_body_is_a_rejection() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/signup");
            then.status(409)
                .json_body(json!({"success": false, "message": "email taken"}));
        })
        .await;

    let outcome = client_for(server.base_url())
        .signup("a@b.com", "pw", "nick")
        .await
        .expect("a rejection body is surfaced as a rejection");

    assert_eq!(outcome.message(), "email taken");
    assert!(!outcome.is_accepted());
}

#[tokio::test]
async fn unexpected_body_is_malformed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/login");
            then.status(200).json_body(json!({"token": "abc"}));
        })
        .await;

    let error = client_for(server.base_url())
        .login("a@b.com", "pw")
        .await
        .expect_err("missing fields must be rejected");

    assert!(matches!(error, AuthError::MalformedResponse(_)), "got {error:?}");
}

#[tokio::test]
async fn spawned_login_delivers_outcome() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/login");
            then.status(200)
                .json_body(json!({"success": true, "message": "ok"}));
        })
        .await;

    let mut task = client_for(server.base_url()).spawn_login("a@b.com".into(), "pw".into());
    let result = task.join().await.expect("task was not cancelled");

    assert!(result.expect("login should succeed").is_accepted());
}

#[tokio::test]
async fn cancelled_login_discards_late_reply() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/login");
            then.status(200)
                .delay(Duration::from_secs(5))
                .json_body(json!({"success": true, "message": "too late"}));
        })
        .await;

    let mut task = client_for(server.base_url()).spawn_login("a@b.com".into(), "pw".into());
    task.cancel();

    assert!(task.join().await.is_none());
}
