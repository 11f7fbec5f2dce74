use axum::{
    extract::{Extension, Multipart},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::common::Notification;
use crate::domains::posts::{upload_image, UploadError};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::middleware::AdminUser;

/// Multipart field carrying the image
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    url: String,
    notification: Notification,
}

/// POST /api/admin/uploads
///
/// Rejections (type, size) happen before storage is touched; the post being
/// edited keeps its current image either way.
pub async fn upload_handler(
    AdminUser(admin): AdminUser,
    Extension(state): Extension<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        let url = upload_image(state.deps.storage.as_ref(), &content_type, data).await?;

        info!(admin_id = %admin.admin_id, url = %url, "Image uploaded");
        return Ok(Json(UploadResponse {
            url,
            notification: Notification::success("Image uploaded"),
        }));
    }

    Err(UploadError::MissingFile.into())
}
