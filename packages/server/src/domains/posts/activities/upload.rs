use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::kernel::BaseObjectStorage;

/// Upload ceiling for post images (5 MB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image MIME types and the extension stored objects get
const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Image is too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Unsupported image type: {0}. Use JPEG, PNG, GIF or WebP")]
    UnsupportedType(String),

    #[error("No file was provided")]
    MissingFile,

    #[error("Upload failed: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Check type and size before anything touches storage; returns the file extension
pub fn validate_image(content_type: &str, size: usize) -> Result<&'static str, UploadError> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    let ext = ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(allowed, _)| *allowed == mime)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| UploadError::UnsupportedType(content_type.to_string()))?;

    if size > MAX_IMAGE_BYTES {
        return Err(UploadError::FileTooLarge {
            size,
            max: MAX_IMAGE_BYTES,
        });
    }

    Ok(ext)
}

/// Validate and store a post image; returns its public URL
pub async fn upload_image(
    storage: &dyn BaseObjectStorage,
    content_type: &str,
    data: Bytes,
) -> Result<String, UploadError> {
    if data.is_empty() {
        return Err(UploadError::MissingFile);
    }

    let ext = validate_image(content_type, data.len()).inspect_err(|e| {
        warn!(error = %e, content_type = %content_type, size = data.len(), "Rejected image upload");
    })?;

    let key = format!("posts/{}.{}", Uuid::new_v4(), ext);
    let size = data.len();
    let url = storage.put(&key, content_type, data).await?;

    info!(key = %key, size, "Stored post image");
    Ok(url)
}
