mod api;
mod github;
mod repositories;
mod search;
mod utils;

use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::github::{GitHubApi, GitHubClient};
use crate::search::SearchAggregator;
use crate::utils::config::AppConfig;
use crate::utils::storage::SessionStore;

pub type AppState = web::Data<Arc<AppData>>;

pub struct AppData {
    pub github_client: Arc<dyn GitHubApi>,
    pub aggregator: SearchAggregator,
    pub sessions: SessionStore,
    pub static_dir: String,
}

impl AppData {
    pub fn new(
        github_client: Arc<dyn GitHubApi>,
        session_ttl: chrono::Duration,
        static_dir: String,
    ) -> Self {
        Self {
            aggregator: SearchAggregator::new(github_client.clone()),
            github_client,
            sessions: SessionStore::new(session_ttl),
            static_dir,
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting GitHub User Explorer");

    let config = AppConfig::from_env();

    let github_client = GitHubClient::new(&config.api_base_url, config.http_timeout)
        .map_err(std::io::Error::other)?;
    info!("Using GitHub API at: {}", github_client.base_url());
    if config.api_base_url != utils::config::DEFAULT_API_BASE {
        warn!("GitHub API base overridden via GITHUB_API_BASE");
    }

    let app_data = Arc::new(AppData::new(
        Arc::new(github_client),
        config.session_ttl,
        config.static_dir.clone(),
    ));

    let bind_address = config.bind_address();
    info!("Binding to: {}", bind_address);

    let static_dir = config.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_data.clone()))
            .wrap(Logger::default())
            .configure(api::routes)
            .service(Files::new("/static", &static_dir).index_file("index.html"))
            .route("/", web::get().to(serve_index))
            .default_service(web::route().to(not_found))
    })
    .bind(&bind_address)?
    .run()
    .await
}

async fn serve_index(app_state: AppState) -> Result<HttpResponse> {
    let index_path = format!("{}/index.html", app_state.static_dir);
    let index_content = std::fs::read_to_string(&index_path).unwrap_or_else(|_| {
        r#"<!DOCTYPE html>
<html>
<head><title>GitHub User Explorer</title></head>
<body>
    <h1>GitHub User Explorer</h1>
    <p>Static files not found. Please make sure static/index.html exists.</p>
</body>
</html>"#
            .to_string()
    });

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(index_content))
}

async fn not_found() -> Result<HttpResponse> {
    Ok(HttpResponse::NotFound().json(serde_json::json!({
        "error": "Not found",
        "error_code": "NOT_FOUND"
    })))
}
