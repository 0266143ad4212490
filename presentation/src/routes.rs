//! Router assembly

use crate::handlers::{calculate, council, safety, status, supervisor};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full API router.
///
/// CORS is wide open; the original deployment served a public toy UI from
/// arbitrary origins.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/calculate", post(calculate::calculate))
        .route("/api/supervisor", post(supervisor::supervisor))
        .route("/api/council", post(council::council))
        .route("/api/safety-check", post(safety::safety_check))
        .route("/api/status", get(status::status))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
