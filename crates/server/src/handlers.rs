//! GitHub webhook handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use github::{verify_signature, WorkflowRunEvent};

use crate::trigger;
use crate::AppState;

/// Liveness probe.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handle a GitHub webhook delivery.
pub async fn handle_github_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, StatusCode> {
    let event_type = headers
        .get("X-GitHub-Event")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let delivery_id = headers
        .get("X-GitHub-Delivery")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    info!(
        event_type = %event_type,
        delivery_id = %delivery_id,
        "Received GitHub webhook"
    );

    if let Some(secret) = &state.config.webhook_secret {
        let signature = headers
            .get("X-Hub-Signature-256")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if !verify_signature(&body, signature, secret) {
            warn!(delivery_id = %delivery_id, "Webhook signature verification failed");
            return Err(StatusCode::UNAUTHORIZED);
        }
    } else {
        debug!("No webhook secret configured, skipping signature verification");
    }

    // Only process workflow_run events
    if event_type != "workflow_run" {
        debug!(event_type = %event_type, "Ignoring non-workflow_run event");
        return Ok(Json(json!({
            "status": "ignored",
            "reason": "not_workflow_run_event"
        })));
    }

    let event: WorkflowRunEvent = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "Failed to parse GitHub webhook payload");
        StatusCode::BAD_REQUEST
    })?;

    if event.action != "completed" {
        debug!(action = %event.action, "Ignoring non-completed workflow_run event");
        return Ok(Json(json!({
            "status": "ignored",
            "reason": "not_completed_action"
        })));
    }

    if !event.workflow_run.is_failure() {
        debug!(
            conclusion = event.workflow_run.conclusion.as_deref().unwrap_or("none"),
            "Ignoring workflow run that did not fail"
        );
        return Ok(Json(json!({
            "status": "ignored",
            "reason": "not_failure"
        })));
    }

    info!(
        repo = %event.repository.full_name,
        run_id = event.workflow_run.id,
        branch = %event.workflow_run.head_branch,
        "Processing failed workflow run"
    );

    match trigger::run_delivery_cycle(&state.config, &event).await {
        Ok(()) => Ok(Json(json!({ "status": "success" }))),
        Err(e) => {
            error!(
                repo = %event.repository.full_name,
                run_id = event.workflow_run.id,
                error = %e,
                "Delivery cycle aborted"
            );
            Ok(Json(json!({
                "status": "error",
                "error": e.to_string()
            })))
        }
    }
}
