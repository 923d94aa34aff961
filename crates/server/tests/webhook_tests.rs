//! Webhook surface tests: signature checks and event filtering.
//!
//! Everything here is rejected or ignored before the delivery cycle starts,
//! so no external service is involved.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use tower::ServiceExt;

use server::config::ServerConfig;
use server::{router, AppState};

fn test_state(secret: Option<&str>) -> Arc<AppState> {
    Arc::new(AppState {
        config: ServerConfig {
            port: 0,
            github_token: "gh-token".to_string(),
            webhook_secret: secret.map(String::from),
            github_api_url: None,
            openai_api_url: None,
            slack_api_url: None,
        },
    })
}

fn sign(body: &[u8], secret: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

fn workflow_run_payload(action: &str, conclusion: &str) -> Vec<u8> {
    json!({
        "action": action,
        "workflow_run": {
            "id": 42,
            "display_title": "CI",
            "conclusion": conclusion,
            "html_url": "https://github.com/acme/widgets/actions/runs/42",
            "head_branch": "main",
            "head_commit": {
                "id": "abc123",
                "message": "fix everything",
                "timestamp": "2024-05-01T12:00:00Z",
                "author": { "name": "Jo" },
            },
            "actor": { "login": "jo" },
            "pull_requests": [],
        },
        "repository": {
            "name": "widgets",
            "full_name": "acme/widgets",
            "owner": { "login": "acme" },
        },
    })
    .to_string()
    .into_bytes()
}

async fn post_webhook(
    state: Arc<AppState>,
    event: &str,
    body: Vec<u8>,
    signature: Option<String>,
) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method("POST")
        .uri("/webhooks/github")
        .header("X-GitHub-Event", event)
        .header("X-GitHub-Delivery", "delivery-1")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        request = request.header("X-Hub-Signature-256", signature);
    }

    let response = router(state)
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn healthz_responds_ok() {
    let response = router(test_state(None))
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn non_workflow_run_event_is_ignored() {
    let (status, body) = post_webhook(test_state(None), "push", b"{}".to_vec(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["reason"], "not_workflow_run_event");
}

#[tokio::test]
async fn malformed_workflow_run_payload_is_bad_request() {
    let (status, _) = post_webhook(test_state(None), "workflow_run", b"{}".to_vec(), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_completed_action_is_ignored() {
    let (status, body) = post_webhook(
        test_state(None),
        "workflow_run",
        workflow_run_payload("requested", "failure"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reason"], "not_completed_action");
}

#[tokio::test]
async fn successful_run_is_ignored() {
    let (status, body) = post_webhook(
        test_state(None),
        "workflow_run",
        workflow_run_payload("completed", "success"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reason"], "not_failure");
}

#[tokio::test]
async fn missing_signature_is_rejected_when_a_secret_is_configured() {
    let (status, _) = post_webhook(
        test_state(Some("s3cret")),
        "push",
        b"{}".to_vec(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_signature_is_rejected() {
    let body = b"{}".to_vec();
    let signature = sign(b"other body", "s3cret");
    let (status, _) = post_webhook(test_state(Some("s3cret")), "push", body, Some(signature)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_signature_is_accepted() {
    let body = b"{}".to_vec();
    let signature = sign(&body, "s3cret");
    let (status, response) =
        post_webhook(test_state(Some("s3cret")), "push", body, Some(signature)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "ignored");
}
