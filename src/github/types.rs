use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("{message} (HTTP {status})")]
    RequestFailed { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The two failure kinds surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The upstream answered with a non-success status.
    RequestFailed,
    /// Anything else: transport failure, malformed body.
    Unexpected,
}

impl GitHubError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GitHubError::RequestFailed { .. } => ErrorKind::RequestFailed,
            GitHubError::Network(_) | GitHubError::Json(_) => ErrorKind::Unexpected,
        }
    }

    /// Message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            GitHubError::RequestFailed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A search hit as returned by `/search/users`. Only a handful of fields are
/// populated by that endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PartialUser {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<PartialUser>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Builds the degraded record used when a detail lookup fails: identity
    /// fields come from the search hit, everything else is empty or zero.
    pub fn from_partial(partial: PartialUser) -> Self {
        Self {
            login: partial.login,
            id: partial.id,
            avatar_url: partial.avatar_url,
            html_url: partial.html_url,
            name: partial.name,
            bio: None,
            public_repos: 0,
            followers: 0,
            following: 0,
            location: None,
            company: None,
            blog: None,
            created_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
}

/// Search results after enrichment, in upstream order.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResultSet {
    pub total_count: u64,
    pub items: Vec<User>,
}
