use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client, RequestBuilder,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::github::{GitHubError, Repository, SearchResponse, User};

const SEARCH_FAILED: &str = "Failed to search users";
const USER_NOT_FOUND: &str = "User not found";
const REPOS_FAILED: &str = "Failed to fetch repositories";

/// The three upstream calls the rest of the application depends on.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn search_users(&self, query: &str) -> Result<SearchResponse, GitHubError>;

    async fn fetch_user(&self, username: &str) -> Result<User, GitHubError>;

    async fn fetch_user_repos(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>, GitHubError>;
}

pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("GitHub-User-Explorer/0.1"),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        failure: &str,
    ) -> Result<T, GitHubError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!("Upstream responded with {}: {}", status, failure);
            return Err(GitHubError::RequestFailed {
                status: status.as_u16(),
                message: failure.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn search_users(&self, query: &str) -> Result<SearchResponse, GitHubError> {
        let url = format!("{}/search/users", self.base_url);

        debug!("Searching GitHub users: {} q={}", url, query);

        let request = self.client.get(&url).query(&[("q", query)]);
        let search: SearchResponse = self.get_json(request, SEARCH_FAILED).await?;

        debug!(
            "Search for '{}' matched {} users ({} returned)",
            query,
            search.total_count,
            search.items.len()
        );
        Ok(search)
    }

    async fn fetch_user(&self, username: &str) -> Result<User, GitHubError> {
        let url = format!("{}/users/{}", self.base_url, username);

        debug!("Fetching GitHub user: {}", url);

        let user: User = self.get_json(self.client.get(&url), USER_NOT_FOUND).await?;
        debug!("Fetched user info for: {}", username);
        Ok(user)
    }

    async fn fetch_user_repos(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>, GitHubError> {
        let url = format!("{}/users/{}/repos", self.base_url, username);

        debug!("Fetching GitHub repos: {} page={} per_page={}", url, page, per_page);

        let request = self.client.get(&url).query(&[
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
            ("sort", "updated".to_string()),
            ("type", "owner".to_string()),
        ]);
        let repos: Vec<Repository> = self.get_json(request, REPOS_FAILED).await?;

        debug!("Fetched {} repos from page {}", repos.len(), page);
        Ok(repos)
    }
}
