//! In-memory stand-in for the GitHub API used by unit tests.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::github::{GitHubApi, GitHubError, PartialUser, Repository, SearchResponse, User};

pub fn partial_user(login: &str) -> PartialUser {
    PartialUser {
        login: login.to_string(),
        id: login.len() as u64,
        avatar_url: format!("https://avatars.example/{}", login),
        html_url: format!("https://github.com/{}", login),
        name: None,
    }
}

pub fn user(login: &str) -> User {
    User {
        login: login.to_string(),
        id: login.len() as u64,
        avatar_url: format!("https://avatars.example/{}", login),
        html_url: format!("https://github.com/{}", login),
        name: Some(login.to_uppercase()),
        bio: Some("bio".to_string()),
        public_repos: 12,
        followers: 34,
        following: 5,
        location: Some("Earth".to_string()),
        company: None,
        blog: Some("https://blog.example".to_string()),
        created_at: Utc.with_ymd_and_hms(2011, 1, 25, 18, 44, 36).single(),
    }
}

pub fn repo(id: u64) -> Repository {
    Repository {
        id,
        name: format!("repo-{}", id),
        full_name: format!("octocat/repo-{}", id),
        description: None,
        language: Some("Rust".to_string()),
        private: false,
        fork: false,
        topics: Vec::new(),
        stargazers_count: id as u32,
        forks_count: 0,
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        html_url: format!("https://github.com/octocat/repo-{}", id),
    }
}

#[derive(Default)]
pub struct FakeGitHub {
    search: Option<SearchResponse>,
    users: HashMap<String, User>,
    repos: HashMap<String, Vec<Repository>>,
    fail_repos: AtomicBool,
    hold_repos: AtomicBool,
    release: Notify,
    user_gates: HashMap<String, Arc<Notify>>,
    user_completions: Mutex<Vec<String>>,
    search_queries: Mutex<Vec<String>>,
    user_calls: Mutex<Vec<String>>,
    repo_calls: Mutex<Vec<(String, u32, u32)>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, response: SearchResponse) -> Self {
        self.search = Some(response);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.login.clone(), user);
        self
    }

    /// Makes the detail lookup for `login` wait for [`FakeGitHub::release_user`].
    pub fn with_held_user(mut self, login: &str) -> Self {
        self.user_gates
            .insert(login.to_string(), Arc::new(Notify::new()));
        self
    }

    pub fn release_user(&self, login: &str) {
        if let Some(gate) = self.user_gates.get(login) {
            gate.notify_one();
        }
    }

    /// Logins in the order their detail lookups finished.
    pub fn user_completions(&self) -> Vec<String> {
        self.user_completions.lock().unwrap().clone()
    }

    /// Registers `count` repositories for `username`, ids starting at 1.
    pub fn with_repos(mut self, username: &str, count: u64) -> Self {
        self.repos
            .insert(username.to_string(), (1..=count).map(repo).collect());
        self
    }

    pub fn set_fail_repos(&self, fail: bool) {
        self.fail_repos.store(fail, Ordering::SeqCst);
    }

    /// While held, repository fetches wait for [`FakeGitHub::release_one`].
    pub fn set_hold_repos(&self, hold: bool) {
        self.hold_repos.store(hold, Ordering::SeqCst);
    }

    pub fn release_one(&self) {
        self.release.notify_one();
    }

    pub fn search_calls(&self) -> usize {
        self.search_queries.lock().unwrap().len()
    }

    pub fn search_queries(&self) -> Vec<String> {
        self.search_queries.lock().unwrap().clone()
    }

    pub fn user_calls(&self) -> Vec<String> {
        self.user_calls.lock().unwrap().clone()
    }

    pub fn repo_calls(&self) -> Vec<(String, u32, u32)> {
        self.repo_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn search_users(&self, query: &str) -> Result<SearchResponse, GitHubError> {
        self.search_queries.lock().unwrap().push(query.to_string());
        self.search.clone().ok_or(GitHubError::RequestFailed {
            status: 503,
            message: "Failed to search users".to_string(),
        })
    }

    async fn fetch_user(&self, username: &str) -> Result<User, GitHubError> {
        self.user_calls.lock().unwrap().push(username.to_string());

        if let Some(gate) = self.user_gates.get(username) {
            gate.notified().await;
        }
        self.user_completions
            .lock()
            .unwrap()
            .push(username.to_string());

        self.users
            .get(username)
            .cloned()
            .ok_or(GitHubError::RequestFailed {
                status: 404,
                message: "User not found".to_string(),
            })
    }

    async fn fetch_user_repos(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>, GitHubError> {
        self.repo_calls
            .lock()
            .unwrap()
            .push((username.to_string(), page, per_page));

        if self.hold_repos.load(Ordering::SeqCst) {
            self.release.notified().await;
        }

        if self.fail_repos.load(Ordering::SeqCst) {
            return Err(GitHubError::RequestFailed {
                status: 500,
                message: "Failed to fetch repositories".to_string(),
            });
        }

        let all = self.repos.get(username).cloned().unwrap_or_default();
        let start = ((page.saturating_sub(1)) * per_page) as usize;
        Ok(all
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect())
    }
}
