use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use etikett::state::AppState;
use etikett::{config, db, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (embedded defaults -> etikett.toml -> env/.env)
    let app_cfg = config::load()?;

    // Logging (stdout + tägliche Datei-Rotation unter ./logs); server.debug
    // hebt den Default-Filter an, RUST_LOG gewinnt weiterhin
    std::fs::create_dir_all("logs").ok();
    let (stdout_nb, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let file_appender = tracing_appender::rolling::daily("logs", "etikett.log");
    let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
    let default_filter =
        if app_cfg.server.debug { "debug,tower_http=debug" } else { "info,tower_http=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stdout_nb))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb))
        .init();
    // Guards am Leben halten (nicht fallen lassen), damit Non-Blocking Writer korrekt flushen
    let _log_guards = (stdout_guard, file_guard);

    if let Some(secret) = app_cfg.security.as_ref().and_then(|s| s.secret_key.as_deref()) {
        if secret.is_empty() {
            tracing::warn!("security.secret_key is set but empty");
        } else {
            info!("Secret key configured");
        }
    }

    // Database: bounded retry on connect, then idempotent schema sync
    let pool = db::connect_with_retry(&app_cfg.database).await?;
    db::init_db(&pool).await?;

    // Uploads directory must exist before the first attach request
    std::fs::create_dir_all(&app_cfg.uploads.dir)?;

    let state = AppState::new(pool, app_cfg.clone());
    let app = routes::router(state);

    // Server listen addr (from config)
    let port: u16 = app_cfg.server.port;
    let host: String = app_cfg.server.host.clone();
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen addr {}:{} - {}", host, port, e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Etikett listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut term = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received. Stopping server...");
}
