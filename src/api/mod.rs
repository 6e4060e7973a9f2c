pub mod handlers;
pub mod types;

use actix_web::web;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/search", web::get().to(handlers::search))
            .route("/users/{username}", web::get().to(handlers::get_user))
            .route(
                "/users/{username}/repositories",
                web::post().to(handlers::open_repositories),
            )
            .route("/sessions/{session_id}", web::get().to(handlers::get_session))
            .route(
                "/sessions/{session_id}",
                web::delete().to(handlers::close_session),
            )
            .route(
                "/sessions/{session_id}/more",
                web::post().to(handlers::load_more),
            )
            .route(
                "/sessions/{session_id}/reload",
                web::post().to(handlers::reload),
            ),
    );
}
