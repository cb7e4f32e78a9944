//! Upload route group.

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn upload_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/uploads", API_PREFIX),
            post(handlers::upload_create::create_upload).get(handlers::upload_get::list_uploads),
        )
        // Single-upload path kept alongside the collection route
        .route(
            &format!("{}/upload", API_PREFIX),
            post(handlers::upload_create::create_upload),
        )
        .route(
            &format!("{}/uploads/{{id}}", API_PREFIX),
            get(handlers::upload_get::get_upload).delete(handlers::upload_delete::delete_upload),
        )
        .with_state(state)
}
