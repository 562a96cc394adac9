use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of the tags table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub uuid: String,
    pub mac_address: String,
    pub image_path: Option<String>,
    pub image_size: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTagRequest {
    pub tag_mac_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTagResponse {
    pub tag_mac_address: String,
    pub tag_uuid: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTagResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
