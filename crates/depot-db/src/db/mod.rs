//! Database repositories for data access layer
//
// Upload records
pub mod uploads;
//
// In-memory record store
#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;

#[cfg(any(test, feature = "test-helpers"))]
pub use memory::MemoryUploadStore;
pub use uploads::{UploadRepository, UploadRow, UploadStore};
