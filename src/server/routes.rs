//! Router configuration for the web server.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Create the router with all routes. `body_limit` caps every request body,
/// multipart uploads included.
pub fn create_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/generate-pdf", post(handlers::generate_pdf))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
