use actix_web::{web, HttpResponse, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::api::types::{HealthStatus, SearchParams, SessionView};
use crate::github::User;
use crate::repositories::PaginationController;
use crate::utils::validation::validate_github_username;
use crate::{utils::errors::AppError, AppState};

fn respond<T: Serialize>(result: Result<T, AppError>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err @ AppError::GitHub(_)) => {
            error!("Request failed: {}", err);
            err.into()
        }
        Err(err) => {
            warn!("Request rejected: {}", err);
            err.into()
        }
    }
}

fn find_session(
    app_state: &AppState,
    session_id: &Uuid,
) -> Result<Arc<PaginationController>, AppError> {
    app_state
        .sessions
        .get(session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session '{}' not found", session_id)))
}

pub async fn health(app_state: AppState) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthStatus {
        status: "ok",
        sessions: app_state.sessions.stats(),
    }))
}

pub async fn search(app_state: AppState, params: web::Query<SearchParams>) -> Result<HttpResponse> {
    let query = params.into_inner().q;
    info!("Search request for: {:?}", query);

    Ok(respond(app_state.aggregator.search(&query).await))
}

pub async fn get_user(app_state: AppState, path: web::Path<String>) -> Result<HttpResponse> {
    let username = path.into_inner();
    info!("Profile request for user: {}", username);

    Ok(respond(get_user_internal(&app_state, &username).await))
}

async fn get_user_internal(app_state: &AppState, username: &str) -> Result<User, AppError> {
    validate_github_username(username)?;
    Ok(app_state.github_client.fetch_user(username).await?)
}

pub async fn open_repositories(
    app_state: AppState,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let username = path.into_inner();
    info!("Repository session requested for user: {}", username);

    Ok(respond(open_repositories_internal(&app_state, username).await))
}

async fn open_repositories_internal(
    app_state: &AppState,
    username: String,
) -> Result<SessionView, AppError> {
    validate_github_username(&username)?;

    let controller = Arc::new(PaginationController::new(
        app_state.github_client.clone(),
        username,
    ));
    let session_id = app_state.sessions.open(controller.clone());
    let listing = controller.start().await;

    Ok(SessionView {
        session_id,
        listing,
    })
}

pub async fn get_session(app_state: AppState, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let session_id = path.into_inner();

    let result = find_session(&app_state, &session_id).map(|controller| SessionView {
        session_id,
        listing: controller.snapshot(),
    });

    Ok(respond(result))
}

pub async fn load_more(app_state: AppState, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let session_id = path.into_inner();

    let result = match find_session(&app_state, &session_id) {
        Ok(controller) => Ok(SessionView {
            session_id,
            listing: controller.load_more().await,
        }),
        Err(err) => Err(err),
    };

    Ok(respond(result))
}

pub async fn reload(app_state: AppState, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let session_id = path.into_inner();

    let result = match find_session(&app_state, &session_id) {
        Ok(controller) => Ok(SessionView {
            session_id,
            listing: controller.start().await,
        }),
        Err(err) => Err(err),
    };

    Ok(respond(result))
}

pub async fn close_session(app_state: AppState, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let session_id = path.into_inner();

    if app_state.sessions.close(&session_id) {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(AppError::NotFound(format!("Session '{}' not found", session_id)).into())
    }
}
