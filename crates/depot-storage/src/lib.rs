//! Depot Storage Library
//!
//! Dual-write storage for uploaded files: every file is written to a local filesystem
//! sink (mandatory) and, best-effort, to an S3-compatible object store.
//!
//! # Keys
//!
//! Both backends use the same flat key, the generated file name
//! `{unix_millis}-{original_basename}`. Keys must not contain path separators or `..`.
//! Key generation is centralized in the `keys` module so both backends stay consistent.

pub mod coordinator;
pub mod factory;
pub mod keys;
pub mod local;
#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use coordinator::{DualWriteCoordinator, StoreReport};
pub use depot_core::StorageBackend;
pub use factory::{coordinator_with, create_coordinator};
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3BlobStore;
pub use traits::{BlobStore, LocalSink, StorageError, StorageResult};
