//! Roastbot webhook service.
//!
//! Receives GitHub `workflow_run` webhooks and, for runs that completed
//! with a failure, drives one delivery cycle: load the repository's
//! configuration, generate roasts, and fan them out to the enabled
//! channels.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod handlers;
pub mod trigger;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Shared state for webhook handlers.
pub struct AppState {
    /// Process-level configuration
    pub config: ServerConfig,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/webhooks/github", post(handlers::handle_github_webhook))
        .route("/healthz", get(handlers::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
