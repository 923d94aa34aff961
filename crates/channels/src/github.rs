//! GitHub comment channel.

use std::sync::Arc;

use async_trait::async_trait;
use config::ChannelConfig;
use github::{GithubClient, WorkflowRun};
use tracing::info;

use crate::error::DeliveryError;
use crate::types::{ChannelHandler, RoastMessage};

/// Posts roasts as pull-request or commit comments.
///
/// When the triggering run has an associated pull request, every roast in
/// the batch becomes a separate comment on that PR's thread; otherwise each
/// becomes a commit comment on the run's head commit. Comments are posted
/// strictly in batch order, one API call per roast.
pub struct GithubChannel {
    client: Arc<GithubClient>,
    owner: String,
    repo: String,
}

impl GithubChannel {
    /// Create a handler bound to one repository.
    #[must_use]
    pub fn new(client: Arc<GithubClient>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

#[async_trait]
impl ChannelHandler for GithubChannel {
    fn name(&self) -> &'static str {
        "github"
    }

    fn is_enabled(&self, config: &ChannelConfig) -> bool {
        config.enabled()
    }

    async fn send_roast(
        &self,
        messages: &[RoastMessage],
        run: &WorkflowRun,
        _config: &ChannelConfig,
    ) -> Result<(), DeliveryError> {
        if let Some(pull_request) = run.pull_request() {
            for roast in messages {
                self.client
                    .create_issue_comment(&self.owner, &self.repo, pull_request.number, &roast.content)
                    .await?;
            }
            info!(
                repo = %self.repo,
                pr_number = pull_request.number,
                count = messages.len(),
                "Sent roast(s) to pull request"
            );
        } else {
            for roast in messages {
                self.client
                    .create_commit_comment(&self.owner, &self.repo, &run.head_commit.id, &roast.content)
                    .await?;
            }
            info!(
                repo = %self.repo,
                commit = %run.head_commit.id,
                count = messages.len(),
                "Sent roast(s) to commit"
            );
        }

        Ok(())
    }
}
