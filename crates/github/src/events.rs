//! GitHub webhook payload types.
//!
//! Only the fields the service reads are modeled; the rest of the payload is
//! ignored during deserialization.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `workflow_run` webhook event payload (simplified).
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRunEvent {
    /// Action type ("requested", "in_progress", "completed")
    pub action: String,
    /// The workflow run this event describes
    pub workflow_run: WorkflowRun,
    /// Repository the run belongs to
    pub repository: Repository,
}

impl WorkflowRunEvent {
    /// Whether this event describes a run that completed with a failure.
    #[must_use]
    pub fn is_failed_run(&self) -> bool {
        self.action == "completed" && self.workflow_run.is_failure()
    }
}

/// A GitHub Actions workflow run.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRun {
    /// Run ID
    pub id: u64,
    /// Display title of the run
    pub display_title: String,
    /// Conclusion ("success", "failure", ...); absent while in progress
    #[serde(default)]
    pub conclusion: Option<String>,
    /// Run HTML URL
    pub html_url: String,
    /// Branch that triggered the run
    pub head_branch: String,
    /// Commit that triggered the run
    pub head_commit: HeadCommit,
    /// User that triggered the run
    pub actor: Actor,
    /// Pull requests associated with the run (empty for manual runs)
    #[serde(default)]
    pub pull_requests: Vec<PullRequestRef>,
}

impl WorkflowRun {
    /// Whether the run concluded with a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.conclusion.as_deref() == Some("failure")
    }

    /// First associated pull request, if any.
    #[must_use]
    pub fn pull_request(&self) -> Option<&PullRequestRef> {
        self.pull_requests.first()
    }
}

/// Commit at the head of the triggering branch.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadCommit {
    /// Commit SHA
    pub id: String,
    /// Commit message
    pub message: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Commit author
    pub author: CommitAuthor,
}

/// Commit author identity.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    /// Author name
    pub name: String,
}

/// User that triggered the run.
#[derive(Debug, Clone, Deserialize)]
pub struct Actor {
    /// User login
    pub login: String,
}

/// Pull request associated with a workflow run.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestRef {
    /// PR number
    pub number: u64,
    /// PR API URL
    pub url: String,
}

/// GitHub repository.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// Repository name
    pub name: String,
    /// Full name (org/repo)
    pub full_name: String,
    /// Repository owner
    pub owner: RepoOwner,
}

/// Repository owner identity.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoOwner {
    /// Owner login
    pub login: String,
}
