//! Depot API Library
//!
//! This crate provides the HTTP handlers, the upload service and application setup.

// Module declarations
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::uploads::{RemovalReport, UploadForm, UploadService};
pub use state::AppState;
