//! Services layer for business logic
//!
//! Keeps handler logic thin and allows unit testing without HTTP.

pub mod uploads;
