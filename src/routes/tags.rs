use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, OptionExt},
    state::AppState,
    types::{AddTagRequest, AddTagResponse, Tag, UpdateTagResponse},
    uploads,
};

/// Registers a new tag for a MAC address and returns its generated UUID.
pub async fn add_tag(
    State(state): State<AppState>,
    Json(req): Json<AddTagRequest>,
) -> AppResult<Response> {
    let mac = req.tag_mac_address.trim();
    if mac.is_empty() {
        return Err(AppError::InvalidInput("tag_mac_address must not be empty".into()));
    }

    // Pre-check uniqueness; a lost race against a concurrent insert is still
    // caught by the UNIQUE constraint and mapped to the same conflict error.
    let existing: Option<String> =
        sqlx::query_scalar("SELECT uuid FROM tags WHERE mac_address = ?1")
            .bind(mac)
            .fetch_optional(&state.db)
            .await?;
    if existing.is_some() {
        state.metrics.inc_tag_conflicts();
        return Err(AppError::Conflict(format!("tag with MAC address {} already exists", mac)));
    }

    let tag_uuid = insert_tag(&state, mac).await?;

    state.metrics.inc_tags_created();
    tracing::info!("Registered tag {} for MAC {}", tag_uuid, mac);

    Ok((
        StatusCode::CREATED,
        Json(AddTagResponse { tag_mac_address: mac.to_string(), tag_uuid }),
    )
        .into_response())
}

/// Attaches a JPG image to an existing tag.
///
/// The tag is looked up by UUID first; validation failures of the uploaded
/// file respond with 422 and `{status:"fail", message}`. On success the file
/// lands under the uploads directory as `{uuid}_{timestamp}.jpg` and the
/// tag's image columns plus `updated_at` are set in one statement.
pub async fn update_tag(
    State(state): State<AppState>,
    Path(tag_uuid): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Response> {
    let _tag = fetch_tag_by_uuid(&state.db, &tag_uuid)
        .await?
        .ok_or_not_found("tag")?;

    let (file_name, content_type, data) = match extract_image_field(multipart).await {
        Ok(parts) => parts,
        Err(e) => {
            state.metrics.inc_uploads_rejected();
            return Err(e);
        }
    };

    if let Err(e) = uploads::validate_image(
        &state.config.uploads,
        file_name.as_deref(),
        content_type.as_deref(),
        data.len() as u64,
    ) {
        state.metrics.inc_uploads_rejected();
        return Err(e);
    }

    // Write the file first, then update the row. A failed update is not
    // compensated; the orphaned file is overwritten by the next attempt's
    // timestamped name at worst.
    let stored = uploads::store_image(&state.config.uploads, &tag_uuid, &data).await?;
    sqlx::query(
        r#"UPDATE tags SET image_path = ?1, image_size = ?2,
           updated_at = strftime('%Y-%m-%dT%H:%M:%SZ','now') WHERE uuid = ?3"#,
    )
    .bind(&stored.path)
    .bind(stored.size)
    .bind(tag_uuid.to_string())
    .execute(&state.db)
    .await?;

    state.metrics.inc_images_attached();
    tracing::info!("Attached image ({} bytes) to tag {}", stored.size, tag_uuid);

    Ok((
        StatusCode::OK,
        Json(UpdateTagResponse { status: "success".to_string(), message: None }),
    )
        .into_response())
}

/// Inserts the row for a new tag.
///
/// A duplicate MAC that slipped past the pre-check (lost insert race) hits
/// the UNIQUE constraint here; it is counted and reported exactly like a
/// pre-checked conflict.
pub async fn insert_tag(state: &AppState, mac: &str) -> AppResult<Uuid> {
    let tag_uuid = Uuid::new_v4();
    if let Err(e) = sqlx::query("INSERT INTO tags (uuid, mac_address) VALUES (?1, ?2)")
        .bind(tag_uuid.to_string())
        .bind(mac)
        .execute(&state.db)
        .await
    {
        let err = AppError::from(e);
        if matches!(err, AppError::Conflict(_)) {
            state.metrics.inc_tag_conflicts();
        }
        return Err(err);
    }
    Ok(tag_uuid)
}

pub async fn fetch_tag_by_uuid(db: &sqlx::SqlitePool, tag_uuid: &Uuid) -> AppResult<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE uuid = ?1")
        .bind(tag_uuid.to_string())
        .fetch_optional(db)
        .await?;
    Ok(tag)
}

/// Pulls the `image` field out of the multipart payload.
async fn extract_image_field(
    mut multipart: Multipart,
) -> AppResult<(Option<String>, Option<String>, Bytes)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UploadRejected(format!("invalid multipart payload: {}", e)))?
    {
        if field.name() == Some("image") {
            let file_name = field.file_name().map(|s| s.to_string());
            let content_type = field.content_type().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::UploadRejected(format!("failed to read image: {}", e)))?;
            return Ok((file_name, content_type, data));
        }
    }
    Err(AppError::UploadRejected("image file is required".to_string()))
}
