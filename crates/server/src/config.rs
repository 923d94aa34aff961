//! Process-level configuration.
//!
//! Per-repository behavior (channels, credentials) lives in repository
//! variables and is resolved per delivery cycle; this is only what the
//! service itself needs to start.

use std::env;

use anyhow::Context;

/// Webhook service configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP server port
    pub port: u16,
    /// GitHub token for API calls (variables and comments)
    pub github_token: String,
    /// Webhook signing secret; verification is skipped when unset
    pub webhook_secret: Option<String>,
    /// GitHub API base URL override (tests, proxies)
    pub github_api_url: Option<String>,
    /// OpenAI API base URL override (tests, proxies)
    pub openai_api_url: Option<String>,
    /// Slack API base URL override (tests, proxies)
    pub slack_api_url: Option<String>,
}

impl ServerConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when `GITHUB_TOKEN` is unset.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env::var("ROASTBOT_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            github_token: env::var("GITHUB_TOKEN").context("GITHUB_TOKEN must be set")?,
            webhook_secret: env::var("GITHUB_WEBHOOK_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            github_api_url: env::var("GITHUB_API_URL").ok(),
            openai_api_url: env::var("OPENAI_API_URL").ok(),
            slack_api_url: env::var("SLACK_API_URL").ok(),
        })
    }
}
