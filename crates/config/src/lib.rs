//! Configuration resolution for roastbot.
//!
//! Configuration lives in GitHub Actions repository variables, so a
//! repository opts in and configures its channels without redeploying the
//! service. [`ConfigLoader`] resolves all variables concurrently, applies
//! defaults, and validates the result into an [`AppConfig`] snapshot that is
//! built fresh for every delivery cycle.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod loader;

pub use error::ConfigError;
pub use loader::{ConfigLoader, MAXIMUM_ROASTS, MAXIMUM_ROAST_LENGTH};

/// Validated configuration snapshot for one delivery cycle.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Text-generation credentials
    pub openai: OpenAiConfig,
    /// Roast-generation limits and mode
    pub roaster: RoasterConfig,
    /// Per-channel configuration
    pub channels: ChannelsConfig,
}

/// OpenAI credentials.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for the chat-completions endpoint
    pub api_key: String,
}

/// Roast-generation settings.
#[derive(Debug, Clone)]
pub struct RoasterConfig {
    /// Whether the harsher prompt variant is selected
    pub uncensored: bool,
    /// Advisory per-message length limit handed to the generator
    pub maximum_roast_length: usize,
    /// Advisory message-count limit handed to the generator
    pub maximum_roasts: usize,
}

/// Configuration for every known channel.
#[derive(Debug, Clone)]
pub struct ChannelsConfig {
    /// GitHub comment channel
    pub github: GithubChannelConfig,
    /// Slack channel
    pub slack: SlackChannelConfig,
}

/// GitHub comment channel configuration.
#[derive(Debug, Clone)]
pub struct GithubChannelConfig {
    /// Whether the channel is enabled
    pub enabled: bool,
}

/// Slack channel configuration.
#[derive(Debug, Clone)]
pub struct SlackChannelConfig {
    /// Whether the channel is enabled
    pub enabled: bool,
    /// Bot token used for `chat.postMessage`
    pub token: String,
    /// Destination channel ID
    pub channel_id: String,
}

/// One channel's slice of the configuration, as handed to its handler.
#[derive(Debug, Clone)]
pub enum ChannelConfig {
    /// GitHub comment channel
    Github(GithubChannelConfig),
    /// Slack channel
    Slack(SlackChannelConfig),
}

impl ChannelConfig {
    /// The bare `enabled` flag of either variant.
    #[must_use]
    pub fn enabled(&self) -> bool {
        match self {
            Self::Github(config) => config.enabled,
            Self::Slack(config) => config.enabled,
        }
    }

    /// The Slack configuration, if this is the Slack variant.
    #[must_use]
    pub fn as_slack(&self) -> Option<&SlackChannelConfig> {
        match self {
            Self::Slack(config) => Some(config),
            Self::Github(_) => None,
        }
    }
}

impl AppConfig {
    /// Look up one channel's configuration slice by channel name.
    #[must_use]
    pub fn channel_config(&self, name: &str) -> Option<ChannelConfig> {
        match name {
            "github" => Some(ChannelConfig::Github(self.channels.github.clone())),
            "slack" => Some(ChannelConfig::Slack(self.channels.slack.clone())),
            _ => None,
        }
    }

    /// Validate the resolved configuration.
    ///
    /// Rules are applied in order and the first failure wins: the OpenAI key
    /// must be non-empty, at least one channel must be enabled, and an
    /// enabled Slack channel must carry a token and a channel ID.
    ///
    /// # Errors
    ///
    /// Returns the violated rule as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.openai.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        if !self.channels.github.enabled && !self.channels.slack.enabled {
            return Err(ConfigError::NoChannelEnabled);
        }

        if self.channels.slack.enabled {
            if self.channels.slack.token.is_empty() {
                return Err(ConfigError::MissingSlackToken);
            }
            if self.channels.slack.channel_id.is_empty() {
                return Err(ConfigError::MissingSlackChannelId);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            openai: OpenAiConfig {
                api_key: "sk-test".to_string(),
            },
            roaster: RoasterConfig {
                uncensored: false,
                maximum_roast_length: 200,
                maximum_roasts: 1,
            },
            channels: ChannelsConfig {
                github: GithubChannelConfig { enabled: true },
                slack: SlackChannelConfig {
                    enabled: false,
                    token: String::new(),
                    channel_id: String::new(),
                },
            },
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let mut config = base_config();
        config.openai.api_key.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn api_key_rule_wins_over_channel_rules() {
        let mut config = base_config();
        config.openai.api_key.clear();
        config.channels.github.enabled = false;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn no_enabled_channel_is_rejected() {
        let mut config = base_config();
        config.channels.github.enabled = false;
        config.channels.slack.enabled = false;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoChannelEnabled)
        ));
    }

    #[test]
    fn enabled_slack_without_token_is_rejected() {
        let mut config = base_config();
        config.channels.slack.enabled = true;
        config.channels.slack.channel_id = "C123".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingSlackToken)
        ));
    }

    #[test]
    fn enabled_slack_without_channel_id_is_rejected() {
        let mut config = base_config();
        config.channels.slack.enabled = true;
        config.channels.slack.token = "xoxb-1".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingSlackChannelId)
        ));
    }

    #[test]
    fn slack_alone_with_credentials_passes() {
        let mut config = base_config();
        config.channels.github.enabled = false;
        config.channels.slack.enabled = true;
        config.channels.slack.token = "xoxb-1".to_string();
        config.channels.slack.channel_id = "C123".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn channel_config_lookup_by_name() {
        let config = base_config();
        assert!(matches!(
            config.channel_config("github"),
            Some(ChannelConfig::Github(_))
        ));
        assert!(matches!(
            config.channel_config("slack"),
            Some(ChannelConfig::Slack(_))
        ));
        assert!(config.channel_config("teams").is_none());
    }

    #[test]
    fn as_slack_only_matches_slack_variant() {
        let config = base_config();
        assert!(config
            .channel_config("github")
            .unwrap()
            .as_slack()
            .is_none());
        assert!(config.channel_config("slack").unwrap().as_slack().is_some());
    }
}
