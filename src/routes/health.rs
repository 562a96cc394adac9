use crate::state::AppState;
use crate::types::HealthResponse;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

/// Fixed status constant reported by the health check.
pub const HEALTH_STATUS: &str = "healthy";

// Health check endpoint: static status plus current server timestamp
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: HEALTH_STATUS.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// Readiness probe: checks DB connectivity with timeout protection
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let query = sqlx::query("SELECT 1").fetch_one(&state.db);
    match tokio::time::timeout(std::time::Duration::from_secs(5), query).await {
        Ok(Ok(_)) => (StatusCode::OK, "ready").into_response(),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e)).into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout").into_response(),
    }
}

// Metrics endpoint: returns JSON snapshot
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.metrics.get_snapshot();
    Json(snapshot)
}

// Prometheus-compatible text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let body = format!(
        "# HELP etikett_tags_created Total tags created\n# TYPE etikett_tags_created counter\netikett_tags_created {}\n\
# HELP etikett_tag_conflicts Rejected duplicate registrations\n# TYPE etikett_tag_conflicts counter\netikett_tag_conflicts {}\n\
# HELP etikett_images_attached Images attached to tags\n# TYPE etikett_images_attached counter\netikett_images_attached {}\n\
# HELP etikett_uploads_rejected Rejected image uploads\n# TYPE etikett_uploads_rejected counter\netikett_uploads_rejected {}\n\
# HELP etikett_uptime_seconds Uptime seconds\n# TYPE etikett_uptime_seconds gauge\netikett_uptime_seconds {}\n",
        m.tags_created, m.tag_conflicts, m.images_attached, m.uploads_rejected, m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

// Version/Build info endpoint (JSON)
pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
