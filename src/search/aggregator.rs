use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use crate::github::{GitHubApi, PartialUser, SearchResultSet, User};
use crate::utils::errors::AppError;
use crate::utils::validation::normalize_search_query;

/// Upper bound on detail lookups issued per search.
pub const MAX_ENRICHED_USERS: usize = 5;

pub struct SearchAggregator {
    api: Arc<dyn GitHubApi>,
}

impl SearchAggregator {
    pub fn new(api: Arc<dyn GitHubApi>) -> Self {
        Self { api }
    }

    /// Runs a user search and replaces the leading hits with full profiles.
    ///
    /// Only the first [`MAX_ENRICHED_USERS`] hits are kept. A hit whose
    /// profile lookup fails is returned as a degraded record instead of
    /// failing the whole search; `total_count` is passed through untouched.
    pub async fn search(&self, query: &str) -> Result<SearchResultSet, AppError> {
        let query = normalize_search_query(query)?;

        let response = self.api.search_users(query).await?;
        let total_count = response.total_count;
        let candidates: Vec<PartialUser> = response
            .items
            .into_iter()
            .take(MAX_ENRICHED_USERS)
            .collect();

        let details = join_all(
            candidates
                .iter()
                .map(|candidate| self.api.fetch_user(&candidate.login)),
        )
        .await;

        let items: Vec<User> = candidates
            .into_iter()
            .zip(details)
            .map(|(candidate, detail)| match detail {
                Ok(user) => user,
                Err(err) => {
                    warn!(
                        "Error fetching user details for {}: {}",
                        candidate.login, err
                    );
                    User::from_partial(candidate)
                }
            })
            .collect();

        info!(
            "Search for '{}' returned {} of {} users",
            query,
            items.len(),
            total_count
        );

        Ok(SearchResultSet { total_count, items })
    }
}
