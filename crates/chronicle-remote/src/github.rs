//! GitHub issue lookup
//!
//! Resolves issue references through the GitHub REST API
//! (`GET /repos/{owner}/{repo}/issues/{number}`). Pull requests are served by
//! the same endpoint and are recognised by the `pull_request` key.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use chronicle_core::config::RemoteConfig;
use chronicle_core::{Issue, IssueError, IssueRef, IssueTracker};

use crate::repository::RemoteRepository;

const DEFAULT_API_URL: &str = "https://api.github.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// GitHub client configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API base URL
    pub api_url: String,
    /// Repository that unqualified references resolve against
    pub repository: RemoteRepository,
    /// API token
    pub token: Option<String>,
}

impl GitHubConfig {
    /// Create a configuration for the public API without a token
    pub fn new(repository: RemoteRepository) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            repository,
            token: None,
        }
    }

    /// Create from the `[remote]` config section, reading the token from the
    /// configured environment variable
    pub fn from_config(config: &RemoteConfig, repository: RemoteRepository) -> Self {
        let token = std::env::var(&config.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty());
        if token.is_none() {
            debug!(
                env = %config.token_env,
                "no API token set, using unauthenticated requests"
            );
        }

        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            repository,
            token,
        }
    }

    /// Override the API base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Issue as returned by the GitHub API
#[derive(Debug, Deserialize)]
struct GitHubIssue {
    number: u64,
    #[serde(default)]
    title: String,
    body: Option<String>,
    html_url: Option<String>,
    #[serde(default)]
    labels: Vec<GitHubLabel>,
    pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GitHubLabel {
    name: String,
}

/// GitHub API error response
#[derive(Debug, Deserialize)]
struct GitHubError {
    message: String,
}

/// Issue tracker backed by the GitHub REST API
pub struct GitHubIssues {
    config: GitHubConfig,
    client: Client,
}

impl GitHubIssues {
    /// Create a new client
    pub fn new(config: GitHubConfig) -> Result<Self, IssueError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| IssueError::Transport(format!("invalid API token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("chronicle/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| IssueError::Transport(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Repository that unqualified references resolve against
    pub fn repository(&self) -> &RemoteRepository {
        &self.config.repository
    }

    /// Fill in the owner and repository a reference leaves out
    fn target(&self, reference: &IssueRef) -> (String, String) {
        let owner = reference
            .owner
            .clone()
            .unwrap_or_else(|| self.config.repository.owner.clone());
        let repo = reference
            .repo
            .clone()
            .unwrap_or_else(|| self.config.repository.name.clone());
        (owner, repo)
    }

    fn issue_url(&self, owner: &str, repo: &str, number: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}",
            self.config.api_url, owner, repo, number
        )
    }
}

impl IssueTracker for GitHubIssues {
    #[instrument(skip(self), fields(reference = %reference))]
    fn issue(&self, reference: &IssueRef) -> Result<Issue, IssueError> {
        let (owner, repo) = self.target(reference);
        if owner.is_empty() || repo.is_empty() {
            return Err(IssueError::InvalidReference(reference.to_string()));
        }

        let url = self.issue_url(&owner, &repo, reference.number);
        debug!(url = %url, "fetching issue");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| IssueError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(IssueError::NotFound(format!(
                "{}/{}#{}",
                owner, repo, reference.number
            )));
        }

        if !status.is_success() {
            let message = response
                .json::<GitHubError>()
                .map(|e| e.message)
                .unwrap_or_else(|_| status.to_string());
            warn!(status = %status, message = %message, "GitHub API request failed");
            return Err(IssueError::Transport(format!(
                "GitHub API returned {}: {}",
                status, message
            )));
        }

        let raw: GitHubIssue = response
            .json()
            .map_err(|e| IssueError::Transport(format!("invalid issue response: {}", e)))?;

        let html_url = raw.html_url.unwrap_or_else(|| {
            format!(
                "https://{}/{}/{}/issues/{}",
                self.config.repository.host, owner, repo, raw.number
            )
        });

        Ok(Issue {
            number: raw.number,
            title: raw.title,
            body: raw.body.unwrap_or_default(),
            html_url,
            labels: raw.labels.into_iter().map(|l| l.name).collect(),
            pull_request: raw.pull_request.is_some(),
        })
    }

    fn canonical(&self, reference: &IssueRef) -> IssueRef {
        let (owner, repo) = self.target(reference);
        IssueRef::qualified(owner, repo, reference.number)
    }
}
