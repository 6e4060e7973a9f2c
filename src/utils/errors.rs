use actix_web::{http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::api::types::ApiError;
use crate::github::{ErrorKind, GitHubError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("GitHub API error: {0}")]
    GitHub(#[from] GitHubError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<AppError> for HttpResponse {
    fn from(error: AppError) -> Self {
        let (status, error_code, message) = match error {
            AppError::GitHub(ref gh_err) => match gh_err.kind() {
                ErrorKind::RequestFailed => (
                    StatusCode::BAD_GATEWAY,
                    "GITHUB_REQUEST_FAILED",
                    gh_err.user_message(),
                ),
                ErrorKind::Unexpected => (
                    StatusCode::BAD_GATEWAY,
                    "GITHUB_UNEXPECTED",
                    gh_err.user_message(),
                ),
            },
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
        };

        HttpResponse::build(status).json(ApiError {
            error: message,
            error_code: error_code.to_string(),
            details: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let resp: HttpResponse = AppError::Validation("bad".to_string()).into();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp: HttpResponse = AppError::NotFound("session".to_string()).into();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp: HttpResponse = AppError::GitHub(GitHubError::RequestFailed {
            status: 404,
            message: "User not found".to_string(),
        })
        .into();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }
}
