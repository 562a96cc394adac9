#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use http_body_util::BodyExt;
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::routes::health::{health, metrics, metrics_prometheus, readyz, version};
    use crate::state::AppState;

    async fn setup_test_app() -> Router {
        let config = AppConfig::default();
        // Use an in-memory SQLite database for tests
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::init_db(&pool).await.unwrap();
        let state = AppState::new(pool, config);

        Router::new()
            .route("/health", get(health))
            .route("/readyz", get(readyz))
            .route("/metrics", get(metrics))
            .route("/metrics/prometheus", get(metrics_prometheus))
            .route("/version", get(version))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_health_returns_constant_and_fresh_timestamp() {
        let app = setup_test_app().await;
        let before = chrono::Utc::now();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["status"], "healthy");

        let ts = chrono::DateTime::parse_from_rfc3339(v["timestamp"].as_str().unwrap())
            .unwrap()
            .with_timezone(&chrono::Utc);
        assert!(ts >= before - chrono::Duration::seconds(1));
        assert!(ts <= chrono::Utc::now() + chrono::Duration::seconds(1));
    }

    #[tokio::test]
    async fn test_readyz_endpoint_ok() {
        let app = setup_test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/readyz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ready");
    }

    #[tokio::test]
    async fn test_readyz_endpoint_db_error() {
        let config = AppConfig::default();
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        pool.close().await;

        let state = AppState::new(pool, config);
        let app = Router::new().route("/readyz", get(readyz)).with_state(state);

        let response = app
            .oneshot(Request::builder().uri("/readyz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&body).contains("not ready"));
    }

    #[tokio::test]
    async fn test_version_endpoint() {
        let app = setup_test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/version").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["name"], "etikett");
        assert!(!v["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = setup_test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["tags_created"], 0);
        assert_eq!(v["images_attached"], 0);
        assert!(v["uptime_seconds"].as_u64().is_some());
    }

    #[tokio::test]
    async fn test_cors_headers_present_on_all_builds() {
        // The assembled router applies permissive CORS unconditionally, like
        // the original deployment did
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::init_db(&pool).await.unwrap();
        let mut config = AppConfig::default();
        config.server.debug = false;
        let app = crate::routes::router(AppState::new(pool, config));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("Origin", "http://ui.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let allow_origin = response
            .headers()
            .get("access-control-allow-origin")
            .expect("CORS header must be present regardless of debug flag");
        assert_eq!(allow_origin, "*");
    }

    #[tokio::test]
    async fn test_metrics_prometheus_endpoint() {
        let app = setup_test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/metrics/prometheus").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body_str = String::from_utf8(body.to_vec()).unwrap();
        assert!(body_str.contains("etikett_tags_created 0"));
        assert!(body_str.contains("etikett_uploads_rejected 0"));
        assert!(body_str.contains("# TYPE etikett_uptime_seconds gauge"));
    }
}
