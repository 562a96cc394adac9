//! HTTP route handlers for the Etikett API.
//!
//! - `health`: Health check, readiness probe, metrics and version endpoints
//! - `tags`: Tag registration and image attachment

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub mod health;
pub mod tags;

/// Assembles the full application router with its layers.
pub fn router(state: AppState) -> Router {
    // Request body limit: configured image ceiling plus multipart framing slack
    let body_limit = state.config.uploads.max_bytes as usize + 64 * 1024;

    Router::new()
        .route("/health", get(health::health))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .route("/add_tag", post(tags::add_tag))
        .route("/update_tag/{uuid}", post(tags::update_tag))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        // CORS: immer permissiv, wie beim Original-Deployment (separate UI-Herkunft)
        .layer(CorsLayer::permissive())
}
