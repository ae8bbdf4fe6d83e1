use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub url: String,
    pub filename: String,
}

/// POST /api/upload/image (admin only)
/// Accepts a single multipart file under the `image` field, writes it to the
/// uploads directory, and returns the public path. No type or size checks are
/// performed server-side; the admin dashboard validates before sending.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let extension = field.file_name().and_then(sanitized_extension);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation(format!("Failed to read uploaded file: {e}")))?;

        if data.is_empty() {
            return Err(ApiError::validation("No file uploaded"));
        }

        let filename = format!(
            "image-{}-{}{}",
            chrono::Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension.map_or_else(String::new, |ext| format!(".{ext}")),
        );

        let uploads_path = &state.config.general.uploads_path;
        tokio::fs::create_dir_all(uploads_path)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to create uploads dir: {e}")))?;
        tokio::fs::write(uploads_path.join(&filename), &data)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to write upload: {e}")))?;

        tracing::info!("Stored uploaded image '{}' ({} bytes)", filename, data.len());

        return Ok(Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            url: format!("/uploads/{filename}"),
            filename,
        }));
    }

    Err(ApiError::validation("No file uploaded"))
}

/// Extension from the client-supplied filename, restricted to a safe
/// alphanumeric suffix so it can be embedded in the stored name.
fn sanitized_extension(original: &str) -> Option<String> {
    let ext = std::path::Path::new(original).extension()?.to_str()?;

    let safe: String = ext
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(8)
        .collect::<String>()
        .to_ascii_lowercase();

    (!safe.is_empty()).then_some(safe)
}

#[cfg(test)]
mod tests {
    use super::sanitized_extension;

    #[test]
    fn extension_extraction() {
        assert_eq!(sanitized_extension("photo.PNG"), Some("png".to_string()));
        assert_eq!(sanitized_extension("a.b.jpeg"), Some("jpeg".to_string()));
        assert_eq!(sanitized_extension("no-extension"), None);
        assert_eq!(sanitized_extension("weird.../.."), None);
    }
}
