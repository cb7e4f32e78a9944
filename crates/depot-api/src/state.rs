//! Application state shared by all handlers.

use crate::services::uploads::UploadService;
use depot_core::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub uploads: UploadService,
}

impl AppState {
    pub fn new(config: Config, uploads: UploadService) -> Self {
        Self { config, uploads }
    }
}
