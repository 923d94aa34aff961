//! Channel registry and fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use config::{AppConfig, ChannelConfig};
use futures::future::join_all;
use github::WorkflowRun;
use tracing::{error, info, warn};

use crate::error::ChannelLookupError;
use crate::types::{ChannelHandler, RoastMessage};

/// Owns the registered channel set for one delivery cycle.
///
/// The registry is populated at construction time, before any send; it is
/// not meant to be mutated while a fan-out is in flight.
pub struct ChannelManager {
    channels: HashMap<String, Arc<dyn ChannelHandler>>,
    config: AppConfig,
}

impl ChannelManager {
    /// Create a manager bound to one cycle's configuration.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            channels: HashMap::new(),
            config,
        }
    }

    /// Register a channel handler. Last registration for a name wins.
    pub fn register_channel(&mut self, channel: Arc<dyn ChannelHandler>) {
        info!(channel = channel.name(), "Registered channel");
        self.channels.insert(channel.name().to_string(), channel);
    }

    /// Handlers whose own enablement predicate passes under the current
    /// configuration.
    ///
    /// A handler whose name has no configuration mapping is logged and
    /// excluded; it never prevents evaluating the rest.
    #[must_use]
    pub fn get_enabled_channels(&self) -> Vec<Arc<dyn ChannelHandler>> {
        let mut enabled = Vec::new();

        for (name, channel) in &self.channels {
            match self.channel_config(name) {
                Ok(config) => {
                    if channel.is_enabled(&config) {
                        enabled.push(Arc::clone(channel));
                    }
                }
                Err(e) => {
                    error!(channel = %name, error = %e, "Error checking if channel is enabled");
                }
            }
        }

        enabled
    }

    /// Fan a roast batch out to every enabled channel concurrently.
    ///
    /// Every channel's outcome is awaited regardless of its siblings'; a
    /// failed send is logged with the channel's identity and discarded. A
    /// cycle with zero enabled channels is not itself a failure.
    pub async fn send_roasts(&self, messages: &[RoastMessage], run: &WorkflowRun) {
        let enabled = self.get_enabled_channels();

        if enabled.is_empty() {
            warn!("No channels are enabled");
            return;
        }

        info!(
            count = enabled.len(),
            channels = %enabled.iter().map(|c| c.name()).collect::<Vec<_>>().join(", "),
            "Sending roasts to enabled channel(s)"
        );

        let sends = enabled.iter().map(|channel| async move {
            let config = match self.channel_config(channel.name()) {
                Ok(config) => config,
                Err(e) => {
                    error!(channel = channel.name(), error = %e, "Unknown channel at send time");
                    return;
                }
            };

            if let Err(e) = channel.send_roast(messages, run, &config).await {
                // Continue with other channels even if one fails.
                error!(channel = channel.name(), error = %e, "Failed to send roast");
            }
        });

        join_all(sends).await;
    }

    fn channel_config(&self, name: &str) -> Result<ChannelConfig, ChannelLookupError> {
        self.config
            .channel_config(name)
            .ok_or_else(|| ChannelLookupError(name.to_string()))
    }
}
