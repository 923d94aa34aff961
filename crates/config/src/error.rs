//! Error types for configuration resolution and validation.

use thiserror::Error;

/// Errors produced while resolving or validating configuration.
///
/// All variants are fatal for the delivery cycle that triggered the load.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable has no value and no default
    #[error("required configuration variable {0} not found")]
    MissingVariable(&'static str),

    /// The variable store could not be read
    #[error("failed to read configuration variable {name}: {source}")]
    Store {
        name: &'static str,
        #[source]
        source: github::GithubError,
    },

    /// The OpenAI API key resolved to an empty string
    #[error("OPENAI_API_KEY is required")]
    MissingApiKey,

    /// Every channel's `enabled` flag is false
    #[error("at least one channel must be enabled")]
    NoChannelEnabled,

    /// Slack is enabled but has no token
    #[error("SLACK_TOKEN is required when the Slack channel is enabled")]
    MissingSlackToken,

    /// Slack is enabled but has no destination channel
    #[error("SLACK_CHANNEL_ID is required when the Slack channel is enabled")]
    MissingSlackChannelId,
}
