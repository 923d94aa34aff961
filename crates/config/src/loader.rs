//! Loading configuration from GitHub Actions repository variables.

use std::sync::Arc;

use github::GithubClient;
use tracing::debug;

use crate::error::ConfigError;
use crate::{
    AppConfig, ChannelsConfig, GithubChannelConfig, OpenAiConfig, RoasterConfig,
    SlackChannelConfig,
};

/// Advisory per-message length limit handed to the generator.
pub const MAXIMUM_ROAST_LENGTH: usize = 200;
/// Advisory message-count limit handed to the generator.
pub const MAXIMUM_ROASTS: usize = 1;

const VAR_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const VAR_ROASTER_UNCENSORED: &str = "ROASTER_UNCENSORED";
const VAR_GITHUB_CHANNEL_ENABLED: &str = "GITHUB_CHANNEL_ENABLED";
const VAR_SLACK_CHANNEL_ENABLED: &str = "SLACK_CHANNEL_ENABLED";
const VAR_SLACK_TOKEN: &str = "SLACK_TOKEN";
const VAR_SLACK_CHANNEL_ID: &str = "SLACK_CHANNEL_ID";

/// Resolves one repository's configuration from its Actions variables.
pub struct ConfigLoader {
    client: Arc<GithubClient>,
    owner: String,
    repo: String,
}

impl ConfigLoader {
    /// Create a loader for one repository.
    #[must_use]
    pub fn new(client: Arc<GithubClient>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Resolve and validate the repository's configuration.
    ///
    /// All variables are fetched concurrently; the function proceeds only
    /// once every lookup has settled.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a required variable is absent, the
    /// store cannot be read, or a validation rule is violated.
    pub async fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let (api_key, uncensored, github_enabled, slack_enabled, slack_token, slack_channel_id) =
            tokio::try_join!(
                self.variable(VAR_OPENAI_API_KEY, None),
                self.variable(VAR_ROASTER_UNCENSORED, Some("false")),
                self.variable(VAR_GITHUB_CHANNEL_ENABLED, Some("true")),
                self.variable(VAR_SLACK_CHANNEL_ENABLED, Some("false")),
                self.variable(VAR_SLACK_TOKEN, Some("")),
                self.variable(VAR_SLACK_CHANNEL_ID, Some("")),
            )?;

        let config = AppConfig {
            openai: OpenAiConfig { api_key },
            roaster: RoasterConfig {
                uncensored: parse_bool(&uncensored),
                maximum_roast_length: MAXIMUM_ROAST_LENGTH,
                maximum_roasts: MAXIMUM_ROASTS,
            },
            channels: ChannelsConfig {
                github: GithubChannelConfig {
                    enabled: parse_bool(&github_enabled),
                },
                slack: SlackChannelConfig {
                    enabled: parse_bool(&slack_enabled),
                    token: slack_token,
                    channel_id: slack_channel_id,
                },
            },
        };

        config.validate()?;

        debug!(
            repo = %self.repo,
            github_enabled = config.channels.github.enabled,
            slack_enabled = config.channels.slack.enabled,
            "Loaded repository configuration"
        );

        Ok(config)
    }

    /// Resolve one variable, falling back to `default` when the store has no
    /// value for it.
    async fn variable(
        &self,
        name: &'static str,
        default: Option<&str>,
    ) -> Result<String, ConfigError> {
        let value = self
            .client
            .get_repo_variable(&self.owner, &self.repo, name)
            .await
            .map_err(|source| ConfigError::Store { name, source })?;

        match value {
            Some(value) => Ok(value),
            None => default
                .map(str::to_string)
                .ok_or(ConfigError::MissingVariable(name)),
        }
    }
}

/// Parse a boolean variable: the literal `true`, case-insensitively.
fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}
