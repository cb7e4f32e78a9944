//! Route configuration and setup.
//!
//! Upload routes live in [domains](domains); the liveness probe in [health](health).

mod domains;
mod health;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use depot_core::Config;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    // Local canonical paths are served from the upload directory
    let local_files = ServeDir::new(&config.local.upload_dir);

    let app = Router::new()
        .route("/health", get(health::health_check))
        .merge(domains::upload_routes(state.clone()))
        .nest_service(config.local.public_prefix.trim_end_matches('/'), local_files)
        .layer(RequestBodyLimitLayer::new(config.base.max_upload_size_bytes))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
