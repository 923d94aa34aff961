//! GitHub REST API client.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GithubError;

const GITHUB_API_URL: &str = "https://api.github.com";

/// GitHub API client for repository variables and comments.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

/// Actions repository variable response.
#[derive(Debug, Deserialize)]
struct RepoVariable {
    value: String,
}

/// Request body for issue and commit comments.
#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

impl GithubClient {
    /// Create a new GitHub client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(token: impl Into<String>) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("roastbot/0.1"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            token: token.into(),
            base_url: GITHUB_API_URL.to_string(),
        })
    }

    /// Set a custom base URL (useful for tests or proxies).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Fetch an Actions repository variable.
    ///
    /// Returns `Ok(None)` when the variable is not defined for the
    /// repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn get_repo_variable(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
    ) -> Result<Option<String>, GithubError> {
        let url = format!(
            "{}/repos/{owner}/{repo}/actions/variables/{name}",
            self.base_url
        );

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(owner = %owner, repo = %repo, name = %name, "Repository variable not set");
            return Ok(None);
        }

        let response = error_for_status(response).await?;
        let variable: RepoVariable = response.json().await?;
        Ok(Some(variable.value))
    }

    /// Create a comment on an issue or pull-request thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<(), GithubError> {
        let url = format!(
            "{}/repos/{owner}/{repo}/issues/{issue_number}/comments",
            self.base_url
        );

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .json(&CommentRequest { body })
            .send()
            .await?;

        error_for_status(response).await?;
        debug!(owner = %owner, repo = %repo, issue_number, "Created issue comment");
        Ok(())
    }

    /// Create a comment on a commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn create_commit_comment(
        &self,
        owner: &str,
        repo: &str,
        commit_sha: &str,
        body: &str,
    ) -> Result<(), GithubError> {
        let url = format!(
            "{}/repos/{owner}/{repo}/commits/{commit_sha}/comments",
            self.base_url
        );

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .json(&CommentRequest { body })
            .send()
            .await?;

        error_for_status(response).await?;
        debug!(owner = %owner, repo = %repo, commit_sha = %commit_sha, "Created commit comment");
        Ok(())
    }
}

/// Map a non-success response to [`GithubError::Api`].
async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, GithubError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(GithubError::Api { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> GithubClient {
        GithubClient::new("gh-token")
            .unwrap()
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn repo_variable_is_fetched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/actions/variables/OPENAI_API_KEY"))
            .and(header("authorization", "Bearer gh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "OPENAI_API_KEY",
                "value": "sk-test",
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let value = client
            .get_repo_variable("acme", "widgets", "OPENAI_API_KEY")
            .await
            .unwrap();
        assert_eq!(value.as_deref(), Some("sk-test"));
    }

    #[tokio::test]
    async fn missing_repo_variable_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/actions/variables/SLACK_TOKEN"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let value = client
            .get_repo_variable("acme", "widgets", "SLACK_TOKEN")
            .await
            .unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn server_error_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/actions/variables/OPENAI_API_KEY"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .get_repo_variable("acme", "widgets", "OPENAI_API_KEY")
            .await
            .unwrap_err();
        match err {
            GithubError::Api { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn issue_comment_posts_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/acme/widgets/issues/7/comments"))
            .and(body_json(serde_json::json!({ "body": "You broke main." })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .create_issue_comment("acme", "widgets", 7, "You broke main.")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn commit_comment_posts_to_sha() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/acme/widgets/commits/abc123/comments"))
            .and(body_json(serde_json::json!({ "body": "Ouch." })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .create_commit_comment("acme", "widgets", "abc123", "Ouch.")
            .await
            .unwrap();
    }
}
