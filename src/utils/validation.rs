use regex::Regex;
use std::sync::OnceLock;

use crate::utils::errors::AppError;

const MAX_LOGIN_LEN: usize = 39;

fn login_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9]+(-[A-Za-z0-9]+)*$").expect("login pattern compiles")
    })
}

/// Checks a login before it is interpolated into an upstream path: at most
/// 39 ASCII alphanumerics separated by single hyphens.
pub fn validate_github_username(username: &str) -> Result<(), AppError> {
    if username.is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    if username.len() > MAX_LOGIN_LEN {
        return Err(AppError::Validation(format!(
            "Username '{}' is longer than {} characters",
            username, MAX_LOGIN_LEN
        )));
    }
    if !login_pattern().is_match(username) {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid GitHub login",
            username
        )));
    }
    Ok(())
}

/// Trims a search query, rejecting one that is empty afterwards.
pub fn normalize_search_query(query: &str) -> Result<&str, AppError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "Search query must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}
