//! Liveness probe.

use axum::{response::IntoResponse, Json};

#[derive(serde::Serialize)]
pub(super) struct LivenessResponse {
    pub status: &'static str,
}

pub(super) async fn health_check() -> impl IntoResponse {
    Json(LivenessResponse { status: "alive" })
}
