pub mod upload_create;
pub mod upload_delete;
pub mod upload_get;
