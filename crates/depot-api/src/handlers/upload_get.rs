use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct UploadUrlResponse {
    pub url: String,
}

pub async fn list_uploads(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let uploads = state.uploads.list().await?;
    Ok(Json(uploads))
}

pub async fn get_upload(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let url = state.uploads.access_path(&id).await?;
    Ok(Json(UploadUrlResponse { url }))
}
