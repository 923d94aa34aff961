//! Error types for channel delivery.

use thiserror::Error;

/// Errors that can occur within one channel's send path.
///
/// These are recovered at the [`crate::ChannelManager`] boundary: logged
/// with the channel's identity and otherwise discarded.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// GitHub API call failed
    #[error("GitHub API error: {0}")]
    Github(#[from] github::GithubError),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Slack returned a non-success status
    #[error("Slack API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Slack accepted the request but rejected the message
    #[error("Slack rejected the message: {0}")]
    Rejected(String),

    /// Channel is missing required configuration
    #[error("channel not configured: {0}")]
    NotConfigured(&'static str),
}

/// The manager was asked for the configuration of an unregistered channel
/// name. Recovered per handler during enablement evaluation.
#[derive(Debug, Error)]
#[error("unknown channel: {0}")]
pub struct ChannelLookupError(pub String);
