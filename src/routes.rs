// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{profile, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the sub-routers (profiles, quiz).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (backend client, session store, RNG).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origin
        .split(',')
        .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/history", get(quiz::get_history))
        .route("/sessions", post(quiz::start_session))
        .route(
            "/sessions/{id}",
            get(quiz::get_session).delete(quiz::discard_session),
        )
        .route("/sessions/{id}/select", post(quiz::select_option))
        .route("/sessions/{id}/advance", post(quiz::advance))
        .route("/sessions/{id}/recap", get(quiz::get_recap));

    Router::new()
        .route("/api/profiles", get(profile::list_profiles))
        .nest("/api/quiz", quiz_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
