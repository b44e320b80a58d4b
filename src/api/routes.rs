//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{health, metrics_text, predict, ready, root, status, AppState};

/// Create the API router.
///
/// Every response carries permissive CORS headers so browser clients on any
/// origin can reach the server, matching how the platform frontends call it.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Core endpoints
        .route("/", get(root))
        .route("/predict", post(predict))
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Status endpoint
        .route("/api/v1/status", get(status))
        // Metrics endpoint
        .route("/metrics", get(metrics_text))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
