//! Data models for the application
//!
//! `stored_file` holds the values the storage coordinator produces and consumes;
//! `upload` holds the persisted record and its inputs.

mod stored_file;
mod upload;

pub use stored_file::*;
pub use upload::*;
