use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::github::{GitHubApi, Repository};

/// Repositories fetched per page while browsing a profile.
pub const REPOS_PER_PAGE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Idle,
    Loading,
    LoadingMore,
    Loaded,
    Error,
}

/// Render state of one browsing session.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryListing {
    pub username: String,
    pub items: Vec<Repository>,
    pub page: u32,
    pub per_page: u32,
    pub has_more: bool,
    pub status: LoadStatus,
    pub error: Option<String>,
}

#[derive(Debug)]
struct PaginationState {
    items: Vec<Repository>,
    /// Last page successfully loaded; 0 before the first load.
    page: u32,
    has_more: bool,
    status: LoadStatus,
    error: Option<String>,
    /// Ticket of the most recently issued load. Results carrying an older
    /// ticket are dropped.
    latest_request: u64,
}

impl PaginationState {
    fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading | LoadStatus::LoadingMore)
    }

    fn begin(&mut self, append: bool) -> u64 {
        self.latest_request += 1;
        self.status = if append {
            LoadStatus::LoadingMore
        } else {
            LoadStatus::Loading
        };
        self.error = None;
        self.latest_request
    }
}

/// Drives page-by-page loading of one user's repositories.
pub struct PaginationController {
    api: Arc<dyn GitHubApi>,
    username: String,
    per_page: u32,
    state: Mutex<PaginationState>,
}

impl PaginationController {
    pub fn new(api: Arc<dyn GitHubApi>, username: impl Into<String>) -> Self {
        Self {
            api,
            username: username.into(),
            per_page: REPOS_PER_PAGE,
            state: Mutex::new(PaginationState {
                items: Vec::new(),
                page: 0,
                has_more: true,
                status: LoadStatus::Idle,
                error: None,
                latest_request: 0,
            }),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Initial load of the first page. Also used to retry after an error.
    pub async fn start(&self) -> RepositoryListing {
        self.load_page(1, false).await
    }

    /// Fetches `page`, appending to or replacing the accumulated list.
    pub async fn load_page(&self, page: u32, append: bool) -> RepositoryListing {
        let ticket = self.lock().begin(append);
        self.fetch_and_apply(ticket, page, append).await
    }

    /// Loads the page after the current one. Does nothing while another load
    /// is in flight, when the last page was short, or before the first load.
    pub async fn load_more(&self) -> RepositoryListing {
        let (ticket, next_page) = {
            let mut state = self.lock();
            if state.is_loading() || !state.has_more || state.page == 0 {
                debug!(
                    "Ignoring load-more for {} (status: {:?}, has_more: {})",
                    self.username, state.status, state.has_more
                );
                return self.listing(&state);
            }
            let next_page = state.page + 1;
            (state.begin(true), next_page)
        };

        self.fetch_and_apply(ticket, next_page, true).await
    }

    pub fn snapshot(&self) -> RepositoryListing {
        self.listing(&self.lock())
    }

    async fn fetch_and_apply(&self, ticket: u64, page: u32, append: bool) -> RepositoryListing {
        let result = self
            .api
            .fetch_user_repos(&self.username, page, self.per_page)
            .await;

        let mut state = self.lock();
        if ticket != state.latest_request {
            debug!(
                "Discarding stale page {} for {} (ticket {} superseded by {})",
                page, self.username, ticket, state.latest_request
            );
            return self.listing(&state);
        }

        match result {
            Ok(repos) => {
                state.has_more = repos.len() == self.per_page as usize;
                if append {
                    state.items.extend(repos);
                } else {
                    state.items = repos;
                }
                state.page = page;
                state.status = LoadStatus::Loaded;
                info!(
                    "Loaded page {} for {}: {} repositories total, has_more: {}",
                    page,
                    self.username,
                    state.items.len(),
                    state.has_more
                );
            }
            Err(err) => {
                warn!(
                    "Failed to load page {} for {}: {}",
                    page, self.username, err
                );
                state.status = LoadStatus::Error;
                state.error = Some(err.user_message());
            }
        }

        self.listing(&state)
    }

    fn lock(&self) -> MutexGuard<'_, PaginationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn listing(&self, state: &PaginationState) -> RepositoryListing {
        RepositoryListing {
            username: self.username.clone(),
            items: state.items.clone(),
            page: state.page,
            per_page: self.per_page,
            has_more: state.has_more,
            status: state.status,
            error: state.error.clone(),
        }
    }
}
