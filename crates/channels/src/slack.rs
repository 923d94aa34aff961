//! Slack channel.

use std::sync::OnceLock;

use async_trait::async_trait;
use config::ChannelConfig;
use github::WorkflowRun;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DeliveryError;
use crate::types::{ChannelHandler, RoastMessage};

const SLACK_API_URL: &str = "https://slack.com/api";

/// Posts the whole roast batch as one Slack Block Kit message.
///
/// Enablement is stricter than the bare `enabled` flag: the handler also
/// requires a token and a destination channel, so it can be registered
/// unconditionally and skipped when credentials are absent.
pub struct SlackChannel {
    repo: String,
    base_url: String,
    // Created on first send, reused for this handler instance's lifetime.
    client: OnceLock<SlackClient>,
}

impl SlackChannel {
    /// Create a handler bound to one repository.
    #[must_use]
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            base_url: SLACK_API_URL.to_string(),
            client: OnceLock::new(),
        }
    }

    /// Set a custom base URL (useful for tests or proxies).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn build_blocks(&self, messages: &[RoastMessage], run: &WorkflowRun) -> Vec<Block> {
        let mut blocks = vec![
            Block::section(format!("🔥 CI Roast Alert for {}", self.repo)),
            Block::section(format!(
                "*Failed by:* @{} | *Workflow:* {} | *Branch:* {}",
                run.actor.login, run.display_title, run.head_branch
            )),
            Block::section(format!("*Commit:* \"{}\"", run.head_commit.message)),
            Block::Divider,
        ];

        for roast in messages {
            blocks.push(Block::section(roast.content.clone()));
        }

        if let Some(pull_request) = run.pull_request() {
            blocks.push(Block::section(format!(
                "📌 *Pull Request:* <{}|#{}>",
                pull_request.url, pull_request.number
            )));
        }

        blocks
    }
}

#[async_trait]
impl ChannelHandler for SlackChannel {
    fn name(&self) -> &'static str {
        "slack"
    }

    fn is_enabled(&self, config: &ChannelConfig) -> bool {
        config.enabled()
            && config
                .as_slack()
                .is_some_and(|slack| !slack.token.is_empty() && !slack.channel_id.is_empty())
    }

    async fn send_roast(
        &self,
        messages: &[RoastMessage],
        run: &WorkflowRun,
        config: &ChannelConfig,
    ) -> Result<(), DeliveryError> {
        let slack = config
            .as_slack()
            .ok_or(DeliveryError::NotConfigured("slack"))?;
        if slack.token.is_empty() || slack.channel_id.is_empty() {
            return Err(DeliveryError::NotConfigured("slack"));
        }

        let client = self
            .client
            .get_or_init(|| SlackClient::new(slack.token.clone()));

        let blocks = self.build_blocks(messages, run);
        client
            .post_message(
                &self.base_url,
                &slack.channel_id,
                &blocks,
                &format!("🔥 CI Roast Alert for {}", self.repo),
            )
            .await?;

        info!(
            repo = %self.repo,
            channel_id = %slack.channel_id,
            count = messages.len(),
            "Sent roast(s) to Slack"
        );
        Ok(())
    }
}

/// Minimal Slack Web API client.
struct SlackClient {
    http: reqwest::Client,
    token: String,
}

impl SlackClient {
    fn new(token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
        }
    }

    async fn post_message(
        &self,
        base_url: &str,
        channel: &str,
        blocks: &[Block],
        fallback: &str,
    ) -> Result<(), DeliveryError> {
        let response = self
            .http
            .post(format!("{base_url}/chat.postMessage"))
            .bearer_auth(&self.token)
            .json(&PostMessageRequest {
                channel,
                blocks,
                text: fallback,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Api { status, body });
        }

        // Slack reports most failures inside a 200 envelope.
        let envelope: PostMessageResponse = response.json().await?;
        if !envelope.ok {
            return Err(DeliveryError::Rejected(
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Slack API types
// =============================================================================

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    blocks: &'a [Block],
    /// Fallback text for notification previews
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Block {
    Section { text: Mrkdwn },
    Divider,
}

impl Block {
    fn section(text: String) -> Self {
        Self::Section {
            text: Mrkdwn {
                kind: "mrkdwn",
                text,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Mrkdwn {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}
