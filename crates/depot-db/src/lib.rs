//! Depot database layer
//!
//! The Record Store: persistence of upload records. `UploadRepository` talks to
//! Postgres; `MemoryUploadStore` is an in-memory stand-in for tests.

pub mod db;

pub use db::{UploadRepository, UploadRow, UploadStore};
#[cfg(any(test, feature = "test-helpers"))]
pub use db::MemoryUploadStore;
