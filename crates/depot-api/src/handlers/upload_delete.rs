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
pub struct MessageResponse {
    pub message: String,
}

#[tracing::instrument(skip(state), fields(upload_id = %id, operation = "delete_upload"))]
pub async fn delete_upload(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let report = state.uploads.remove(&id).await?;

    let message = if report.outcome.any_succeeded() {
        "File deleted"
    } else {
        "No stored copy could be removed; record retained"
    };

    Ok(Json(MessageResponse {
        message: message.to_string(),
    }))
}
