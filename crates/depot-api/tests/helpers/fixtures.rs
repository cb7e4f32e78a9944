//! Test fixtures: multipart upload forms.

use axum_test::multipart::{MultipartForm, Part};

/// Form with a single `file` part and no metadata.
pub fn file_form(file_name: &str, data: &[u8], mime_type: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::copy_from_slice(data))
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string());
    MultipartForm::new().add_part("file", part)
}

/// Form with a file part and every metadata field.
pub fn full_form(file_name: &str, data: &[u8]) -> MultipartForm {
    file_form(file_name, data, "text/plain")
        .add_text("title", "Quarterly report")
        .add_text("description", "Numbers for Q3")
        .add_text("category", "finance")
        .add_text("language", "en")
        .add_text("provider", "internal")
        .add_text("roles", "admin, editor,,viewer")
}
