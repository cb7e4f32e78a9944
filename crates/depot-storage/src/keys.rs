//! Storage key generation.
//!
//! Keys are flat: `{unix_millis}-{basename}`. Two uploads of the same name within the
//! same millisecond produce the same key.

use crate::traits::{StorageError, StorageResult};

/// Reduce a client-supplied name to its last path component.
fn basename(original_name: &str) -> &str {
    original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name)
        .trim()
}

/// Generate the key used in both backends for an uploaded file.
pub fn generate_file_name(original_name: &str) -> StorageResult<String> {
    let name = basename(original_name);
    if name.is_empty() || name == "." || name == ".." {
        return Err(StorageError::InvalidInput(
            "File name is missing".to_string(),
        ));
    }

    Ok(format!("{}-{}", chrono::Utc::now().timestamp_millis(), name))
}

/// Public path of a locally stored file, e.g. `/uploads/1700000000000-a.txt`
pub fn local_path(public_prefix: &str, key: &str) -> String {
    format!("{}/{}", public_prefix.trim_end_matches('/'), key)
}
