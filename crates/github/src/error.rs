//! Error types for the GitHub API client.

use thiserror::Error;

/// Errors returned by [`crate::GithubClient`].
#[derive(Debug, Error)]
pub enum GithubError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub returned a non-success status
    #[error("GitHub API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}
