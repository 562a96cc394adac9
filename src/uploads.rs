use std::path::Path;

use uuid::Uuid;

use crate::config::UploadsConfig;
use crate::error::{AppError, AppResult};

/// A successfully stored image file.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub path: String,
    pub size: i64,
}

/// Validates an uploaded image against the configured limits.
///
/// The filename extension is authoritative for the type check; the declared
/// content type, when one is present, must not contradict it. Content
/// sniffing is deliberately not performed, so any payload arriving under an
/// allowed extension passes the type check.
pub fn validate_image(
    cfg: &UploadsConfig,
    file_name: Option<&str>,
    content_type: Option<&str>,
    size: u64,
) -> AppResult<()> {
    if size == 0 {
        return Err(AppError::UploadRejected("image file is empty".to_string()));
    }
    if size > cfg.max_bytes {
        return Err(AppError::UploadRejected(format!(
            "image exceeds maximum size of {} bytes",
            cfg.max_bytes
        )));
    }

    let name = match file_name {
        Some(n) if !n.is_empty() => n,
        _ => return Err(AppError::UploadRejected("image filename is missing".to_string())),
    };
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let allowed = match ext {
        Some(ref e) => cfg.allowed_extensions.iter().any(|a| a.eq_ignore_ascii_case(e)),
        None => false,
    };
    if !allowed {
        return Err(AppError::UploadRejected(format!(
            "unsupported file type, expected one of: {}",
            cfg.allowed_extensions.join(", ")
        )));
    }

    // Generic multipart clients send application/octet-stream; only an
    // explicitly contradicting content type is rejected.
    if let Some(ct) = content_type {
        if !ct.is_empty() && ct != "application/octet-stream" && !ct.starts_with("image/jpeg") {
            return Err(AppError::UploadRejected(format!("unsupported content type: {}", ct)));
        }
    }

    Ok(())
}

/// Writes the image bytes under the uploads directory.
///
/// Filename pattern: `{uuid}_{YYYYmmdd_HHMMSS}.jpg`.
pub async fn store_image(
    cfg: &UploadsConfig,
    tag_uuid: &Uuid,
    data: &[u8],
) -> AppResult<StoredImage> {
    tokio::fs::create_dir_all(&cfg.dir).await?;
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let file_name = format!("{}_{}.jpg", tag_uuid, timestamp);
    let path = Path::new(&cfg.dir).join(&file_name);
    tokio::fs::write(&path, data).await?;
    Ok(StoredImage { path: path.to_string_lossy().into_owned(), size: data.len() as i64 })
}
