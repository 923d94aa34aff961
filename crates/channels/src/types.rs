//! Channel trait and message types.

use async_trait::async_trait;
use config::ChannelConfig;
use github::WorkflowRun;
use serde::{Deserialize, Serialize};

use crate::error::DeliveryError;

/// One generated roast, consumed read-only by every channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoastMessage {
    /// Markdown content of the roast
    pub content: String,
}

impl RoastMessage {
    /// Create a roast message.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Trait for notification channels (GitHub comments, Slack, etc.).
#[async_trait]
pub trait ChannelHandler: Send + Sync {
    /// Name of this channel, unique within a manager.
    fn name(&self) -> &'static str;

    /// Whether this channel should receive deliveries under `config`.
    ///
    /// Handlers may be stricter than the bare `enabled` flag; a registered
    /// channel whose predicate fails is skipped, never sent to.
    fn is_enabled(&self, config: &ChannelConfig) -> bool;

    /// Deliver a roast batch for the given run.
    async fn send_roast(
        &self,
        messages: &[RoastMessage],
        run: &WorkflowRun,
        config: &ChannelConfig,
    ) -> Result<(), DeliveryError>;
}
