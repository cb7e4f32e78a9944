use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_upload_form;
use axum::{extract::Multipart, extract::State, response::IntoResponse, Json};
use depot_core::models::Upload;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct UploadCreatedResponse {
    pub message: String,
    pub upload: Upload,
}

#[tracing::instrument(skip(state, multipart), fields(operation = "create_upload"))]
pub async fn create_upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = extract_upload_form(multipart).await?;
    let upload = state.uploads.create(form).await?;

    Ok(Json(UploadCreatedResponse {
        message: "Upload successful".to_string(),
        upload,
    }))
}
