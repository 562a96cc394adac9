use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub connect_retries: u32,
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    pub dir: String,
    pub max_bytes: u64,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecurityConfig {
    pub secret_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadsConfig,
    pub security: Option<SecurityConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        let defaults: &str = include_str!("../config/default.toml");
        match ::config::Config::builder()
            .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
            .build()
        {
            Ok(cfg) => match cfg.try_deserialize() {
                Ok(app_cfg) => app_cfg,
                Err(e) => {
                    eprintln!("FATAL: Failed to deserialize default config: {}", e);
                    panic!("Failed to deserialize default config: {}", e);
                }
            },
            Err(e) => {
                eprintln!("FATAL: Failed to parse default config: {}", e);
                panic!("Failed to parse default config: {}", e);
            }
        }
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let defaults: &str = include_str!("../config/default.toml");
    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
        // Optional local file: etikett.toml (in CWD)
        .add_source(::config::File::with_name("etikett").required(false));

    if let Ok(custom_path) = std::env::var("ETIKETT_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("ETIKETT").separator("__"));

    let cfg = builder.build()?;
    let mut app_cfg: AppConfig = cfg.try_deserialize()?;

    // Plain DATABASE_URL wins over everything (conventional deployment variable)
    if let Ok(url) = std::env::var("DATABASE_URL") {
        if !url.is_empty() {
            app_cfg.database.url = url;
        }
    }

    validate(&app_cfg)?;
    Ok(app_cfg)
}

fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    // Server
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    // Warn for privileged ports on Unix-like systems
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }

    // Database
    if cfg.database.url.is_empty() {
        return Err(anyhow::anyhow!("database.url must not be empty"));
    }
    if cfg.database.connect_retries == 0 {
        return Err(anyhow::anyhow!("database.connect_retries must be > 0"));
    }
    if cfg.database.retry_delay_ms == 0 {
        return Err(anyhow::anyhow!("database.retry_delay_ms must be > 0"));
    }

    // Uploads
    if cfg.uploads.dir.is_empty() {
        return Err(anyhow::anyhow!("uploads.dir must not be empty"));
    }
    if cfg.uploads.max_bytes == 0 {
        return Err(anyhow::anyhow!("uploads.max_bytes must be > 0"));
    }
    if cfg.uploads.allowed_extensions.is_empty()
        || cfg.uploads.allowed_extensions.iter().any(|e| e.is_empty())
    {
        return Err(anyhow::anyhow!("uploads.allowed_extensions must contain non-empty entries"));
    }

    Ok(())
}

pub fn ensure_sqlite_parent_dir(url: &str) -> anyhow::Result<()> {
    if let Some(path) = url.strip_prefix("sqlite://") {
        let p = Path::new(path);
        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }
    Ok(())
}
