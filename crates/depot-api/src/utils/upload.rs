//! Multipart parsing for upload handlers

use crate::services::uploads::UploadForm;
use axum::extract::Multipart;
use bytes::Bytes;
use depot_core::models::UploadMetadata;
use depot_core::AppError;

/// Extract the file part and the metadata fields from an upload form.
/// Exactly one field named "file" is required; unknown fields are ignored.
pub async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut file: Option<(Bytes, String, Option<String>)> = None;
    let mut metadata = UploadMetadata::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "file" {
            if file.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                ));
            }
            let file_name = field.file_name().map(|s| s.to_string()).unwrap_or_default();
            let content_type = field.content_type().map(|s| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

            file = Some((data, file_name, content_type));
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read field '{}': {}", field_name, e)))?;

        match field_name.as_str() {
            "title" => metadata.title = value,
            "description" => metadata.description = value,
            "category" => metadata.category = value,
            "language" => metadata.language = value,
            "provider" => metadata.provider = value,
            "roles" => metadata.roles = UploadMetadata::parse_roles(&value),
            _ => tracing::debug!(field = %field_name, "Ignoring unknown form field"),
        }
    }

    let (data, file_name, content_type) =
        file.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    Ok(UploadForm {
        data,
        file_name,
        content_type,
        metadata,
    })
}
