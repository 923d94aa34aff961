//! Error types for roast generation.

use thiserror::Error;

/// Errors produced by the text-generation call.
///
/// All variants are fatal for the delivery cycle: no roast, no delivery.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// OpenAI returned a non-success status
    #[error("OpenAI API error ({status}): {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The completion content was not a valid message list
    #[error("failed to parse completion: {0}")]
    Parse(#[from] serde_json::Error),

    /// The completion contained no roast messages
    #[error("no roast messages in completion")]
    NoRoasts,
}
