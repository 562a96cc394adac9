#[cfg(test)]
mod tests {
    use crate::db;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::Row;
    use uuid::Uuid;

    async fn setup_test_db() -> sqlx::SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        db::init_db(&pool).await.unwrap();

        pool
    }

    #[tokio::test]
    async fn test_init_db_creates_tags_table() {
        let pool = setup_test_db().await;

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
                .fetch_all(&pool)
                .await
                .unwrap();

        assert!(tables.contains(&"tags".to_string()));
    }

    #[tokio::test]
    async fn test_init_db_is_idempotent() {
        let pool = setup_test_db().await;
        // Schema sync runs at every startup; a second pass must not fail
        db::init_db(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_sets_timestamps() {
        let pool = setup_test_db().await;
        let tag_uuid = Uuid::new_v4();

        sqlx::query("INSERT INTO tags (uuid, mac_address) VALUES (?1, ?2)")
            .bind(tag_uuid.to_string())
            .bind("AA:BB:CC:DD:EE:01")
            .execute(&pool)
            .await
            .unwrap();

        let row = sqlx::query("SELECT * FROM tags WHERE uuid = ?1")
            .bind(tag_uuid.to_string())
            .fetch_one(&pool)
            .await
            .unwrap();

        assert!(!row.get::<String, _>("created_at").is_empty());
        assert!(!row.get::<String, _>("updated_at").is_empty());
        assert!(row.get::<Option<String>, _>("image_path").is_none());
        assert!(row.get::<Option<i64>, _>("image_size").is_none());
    }

    #[tokio::test]
    async fn test_mac_address_unique_constraint() {
        let pool = setup_test_db().await;

        sqlx::query("INSERT INTO tags (uuid, mac_address) VALUES (?1, ?2)")
            .bind(Uuid::new_v4().to_string())
            .bind("AA:BB:CC:DD:EE:02")
            .execute(&pool)
            .await
            .unwrap();

        let err = sqlx::query("INSERT INTO tags (uuid, mac_address) VALUES (?1, ?2)")
            .bind(Uuid::new_v4().to_string())
            .bind("AA:BB:CC:DD:EE:02")
            .execute(&pool)
            .await
            .unwrap_err();

        assert!(err.to_string().to_lowercase().contains("unique"));
    }

    #[tokio::test]
    async fn test_uuid_unique_constraint() {
        let pool = setup_test_db().await;
        let tag_uuid = Uuid::new_v4();

        sqlx::query("INSERT INTO tags (uuid, mac_address) VALUES (?1, ?2)")
            .bind(tag_uuid.to_string())
            .bind("AA:BB:CC:DD:EE:03")
            .execute(&pool)
            .await
            .unwrap();

        let err = sqlx::query("INSERT INTO tags (uuid, mac_address) VALUES (?1, ?2)")
            .bind(tag_uuid.to_string())
            .bind("AA:BB:CC:DD:EE:04")
            .execute(&pool)
            .await
            .unwrap_err();

        assert!(err.to_string().to_lowercase().contains("unique"));
    }

    #[tokio::test]
    async fn test_connect_with_retry_creates_database_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("tags.db");
        let cfg = crate::config::DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            connect_retries: 3,
            retry_delay_ms: 10,
        };

        let pool = db::connect_with_retry(&cfg).await.unwrap();
        db::init_db(&pool).await.unwrap();

        assert!(db_path.exists());
        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await.unwrap();
        assert_eq!(one, 1);
    }
}
