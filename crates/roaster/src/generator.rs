//! OpenAI chat-completions client with a declared output schema.

use channels::RoastMessage;
use github::WorkflowRun;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GenerationError;
use crate::prompts;

/// OpenAI API base URL.
const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Model used for roast generation.
const MODEL: &str = "gpt-4o-mini";

/// Advisory limits and mode handed to the generator.
///
/// The limits are instructions to the model, not constraints enforced on
/// its output.
#[derive(Debug, Clone)]
pub struct RoastOptions {
    /// Whether to use the harsher prompt variant
    pub uncensored: bool,
    /// Per-message length limit, in characters
    pub maximum_roast_length: usize,
    /// Message-count limit
    pub maximum_roasts: usize,
}

/// Roast generator backed by the OpenAI API.
pub struct RoastGenerator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl RoastGenerator {
    /// Create a generator with an API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Set a custom base URL (useful for tests or proxies).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Generate roasts for a failed workflow run.
    ///
    /// Returns the messages of the first completion choice, in the order
    /// the model produced them.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] when the API call fails or the
    /// completion does not contain a parsable, non-empty message list.
    pub async fn generate(
        &self,
        run: &WorkflowRun,
        repo: &str,
        options: &RoastOptions,
    ) -> Result<Vec<RoastMessage>, GenerationError> {
        let request = ChatRequest {
            model: MODEL,
            stream: false,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompts::system_prompt(options.uncensored).to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompts::user_prompt(run, repo, options),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "roasts",
                    schema: roasts_schema(),
                },
            },
        };

        debug!(repo = %repo, model = MODEL, "Requesting roast completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Surface the API's own message when the error body is parsable.
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map_or(body, |e| e.error.message);
            return Err(GenerationError::Api { status, message });
        }

        let completion: ChatResponse = serde_json::from_str(&body)?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(GenerationError::NoRoasts)?;

        let list: RoastList = serde_json::from_str(&content)?;
        if list.messages.is_empty() {
            return Err(GenerationError::NoRoasts);
        }

        Ok(list.messages)
    }
}

/// JSON Schema for the declared output: a list of message objects.
fn roasts_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "messages": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "content": {
                            "type": "string",
                            "description": "markdown content"
                        }
                    },
                    "required": ["content"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["messages"],
        "additionalProperties": false
    })
}

// =============================================================================
// OpenAI API types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    stream: bool,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: &'static str,
    schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Parsed completion content.
#[derive(Debug, Deserialize)]
struct RoastList {
    messages: Vec<RoastMessage>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
