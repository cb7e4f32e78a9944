//! Depot Core Library
//!
//! This crate provides the domain models, error types, configuration and small
//! utilities shared by the storage, database and API crates.

pub mod config;
pub mod error;
pub mod mime;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, LocalStorageConfig, ObjectStoreConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use mime::{mime_type, DEFAULT_CONTENT_TYPE};
pub use storage_types::StorageBackend;
// Note: the storage traits and StorageError live in depot-storage
