use std::time::Duration;

use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// Establishes the database pool with a bounded startup retry loop.
///
/// Creates the SQLite database file if it does not exist yet, then connects
/// a pool. Each failed attempt is logged and retried after a fixed delay;
/// after `connect_retries` attempts the last error is returned and the
/// caller is expected to terminate.
pub async fn connect_with_retry(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match try_connect(&cfg.url).await {
            Ok(pool) => {
                if attempt > 1 {
                    info!("Database connection established on attempt {}", attempt);
                }
                return Ok(pool);
            }
            Err(e) if attempt < cfg.connect_retries => {
                warn!(
                    "Database connection attempt {}/{} failed: {} - retrying in {} ms",
                    attempt, cfg.connect_retries, e, cfg.retry_delay_ms
                );
                tokio::time::sleep(Duration::from_millis(cfg.retry_delay_ms)).await;
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "failed to connect to database after {} attempts: {}",
                    attempt,
                    e
                ));
            }
        }
    }
}

async fn try_connect(url: &str) -> anyhow::Result<SqlitePool> {
    crate::config::ensure_sqlite_parent_dir(url)?;
    if !Sqlite::database_exists(url).await.unwrap_or(false) {
        info!("Creating SQLite database at {}", url);
        Sqlite::create_database(url).await?;
    }
    let pool = SqlitePoolOptions::new()
        .max_connections(16)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                let _ = sqlx::query("PRAGMA foreign_keys=ON;").execute(&mut *conn).await;
                let _ = sqlx::query("PRAGMA busy_timeout=10000;").execute(&mut *conn).await;
                Ok(())
            })
        })
        .connect(url)
        .await?;
    Ok(pool)
}

/// Idempotent schema sync: creates the tags table and its indexes if absent.
pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    // Pragmas for better durability/performance (best-effort, log failures)
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        warn!("Failed to set synchronous mode: {}", e);
    }

    // tags table: uuid assigned exactly once at creation, mac_address unique,
    // image_path/image_size set together by the attach-image operation
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL UNIQUE,
            mac_address TEXT NOT NULL UNIQUE,
            image_path TEXT NULL,
            image_size INTEGER NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ','now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ','now'))
        )"#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        ("idx_tags_uuid", "CREATE INDEX IF NOT EXISTS idx_tags_uuid ON tags(uuid)"),
        ("idx_tags_mac", "CREATE INDEX IF NOT EXISTS idx_tags_mac ON tags(mac_address)"),
    ];
    for (name, query) in indexes {
        if let Err(e) = sqlx::query(query).execute(pool).await {
            match &e {
                sqlx::Error::Database(db_err) => {
                    let msg = db_err.message().to_lowercase();
                    if msg.contains("already exists") || msg.contains("duplicate") {
                        tracing::debug!("Index {} already exists, skipping", name);
                    } else {
                        warn!("Failed to create index {}: {}", name, e);
                    }
                }
                _ => {
                    warn!("Failed to create index {}: {}", name, e);
                }
            }
        }
    }

    Ok(())
}
