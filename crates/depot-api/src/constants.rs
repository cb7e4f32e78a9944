//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";
