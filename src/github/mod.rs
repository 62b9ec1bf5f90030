pub mod query;
pub mod types;

use std::collections::BTreeMap;
use std::env;

use reqwest::Client;
use tracing::{debug, warn};

use crate::pagination::RemotePage;
use query::encode_path;
use types::{ContentsResponse, Repository, User, UserProfile};

const API_BASE: &str = "https://api.github.com";

/// Errors returned by GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(
        "GitHub API rate limit exceeded. Set GITHUB_TOKEN or run `gh auth login` for higher limits."
    )]
    RateLimited,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("GitHub API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    #[error("Content decode error: {0}")]
    Decode(String),
}

/// HTTP client for the GitHub REST API v3.
///
/// Auth resolution order: `GITHUB_TOKEN` env → `GH_TOKEN` env → `gh auth token` CLI → unauthenticated.
/// Constructed once at startup and passed by reference into the search and
/// details flows — there is no global instance.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    /// Create a client using the standard GitHub API and auto-detected auth.
    pub fn from_env(http: Client) -> Self {
        let token = resolve_token();
        if token.is_some() {
            debug!("GitHub token configured");
        } else {
            warn!("No GitHub token found. Rate limit: 60 req/hour. Set GITHUB_TOKEN or run `gh auth login`.");
        }
        Self {
            http,
            token,
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            token: None,
            base_url: base_url.to_string(),
        }
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut req = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", crate::USER_AGENT)
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(ref token) = self.token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        req
    }

    pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, GitHubError> {
        let response = self.request(path).send().await?;
        let status = response.status();
        match status.as_u16() {
            200..=299 => Ok(response.json().await?),
            404 => Err(GitHubError::NotFound(path.to_string())),
            429 => Err(GitHubError::RateLimited),
            403 => {
                let remaining = response
                    .headers()
                    .get("x-ratelimit-remaining")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok());
                if remaining == Some(0) {
                    Err(GitHubError::RateLimited)
                } else {
                    let message = extract_error_message(&response.text().await.unwrap_or_default());
                    Err(GitHubError::Forbidden(message))
                }
            }
            _ => {
                let message = extract_error_message(
                    &response
                        .text()
                        .await
                        .unwrap_or_else(|_| format!("HTTP {status}")),
                );
                Err(GitHubError::Api {
                    code: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Paginated user search over `GET /search/users`.
    /// No request is made until a page or the total count is accessed.
    pub fn search_users(&self, query: &str) -> RemotePage<User> {
        RemotePage::new(self.clone(), "/search/users", query, None, None)
    }

    /// Paginated repository search over `GET /search/repositories`.
    pub fn search_repositories(
        &self,
        query: &str,
        sort: Option<&str>,
        order: Option<&str>,
    ) -> RemotePage<Repository> {
        RemotePage::new(self.clone(), "/search/repositories", query, sort, order)
    }

    /// Full profile for one login. Unknown logins return `NotFound`.
    pub async fn get_user(&self, login: &str) -> Result<UserProfile, GitHubError> {
        let login = encode_path(login);
        self.get_json(&format!("/users/{login}")).await
    }

    pub async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<ContentsResponse, GitHubError> {
        let path = encode_path(path);
        self.get_json(&format!("/repos/{owner}/{repo}/contents/{path}"))
            .await
    }

    /// Language byte counts for one repository.
    pub async fn get_repo_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<BTreeMap<String, u64>, GitHubError> {
        let owner = encode_path(owner);
        let repo = encode_path(repo);
        self.get_json(&format!("/repos/{owner}/{repo}/languages"))
            .await
    }
}

fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.chars().take(200).collect())
}

fn resolve_token() -> Option<String> {
    ["GITHUB_TOKEN", "GH_TOKEN"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
        .or_else(|| {
            std::process::Command::new("gh")
                .args(["auth", "token"])
                .output()
                .ok()
                .filter(|o| {
                    if !o.status.success() {
                        debug!(
                            stderr = %String::from_utf8_lossy(&o.stderr).trim(),
                            "gh auth token failed"
                        );
                    }
                    o.status.success()
                })
                .and_then(|o| {
                    let token = String::from_utf8_lossy(&o.stdout).trim().to_string();
                    if token.is_empty() { None } else { Some(token) }
                })
        })
}
