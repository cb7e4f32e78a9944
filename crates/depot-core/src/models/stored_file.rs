//! Storage outcome models: where the bytes of one logical file ended up.

use serde::{Deserialize, Serialize};

use crate::storage_types::StorageBackend;

/// Result of a successful store: the unit exchanged between the coordinator and the
/// record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// Key used in both backends
    pub generated_name: String,
    /// Always populated; public path of the local copy
    pub local_path: String,
    /// Present only when the remote write succeeded
    pub remote_path: Option<String>,
    /// `remote_path` if present, else `local_path`
    pub canonical_path: String,
    pub content_type: String,
}

impl StoredFile {
    pub fn new(
        generated_name: String,
        local_path: String,
        remote_path: Option<String>,
        content_type: String,
    ) -> Self {
        let canonical_path = remote_path.clone().unwrap_or_else(|| local_path.clone());
        Self {
            generated_name,
            local_path,
            remote_path,
            canonical_path,
            content_type,
        }
    }

    /// Preferred access path; no I/O.
    pub fn access_path(&self) -> &str {
        self.remote_path.as_deref().unwrap_or(&self.local_path)
    }

    pub fn is_remote(&self) -> bool {
        self.remote_path.is_some()
    }
}

/// Backend a canonical path points at, derived from its shape.
///
/// A path starting with `http` is remote-resident; anything else is local-resident.
/// In both cases the key is the last path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredLocation {
    Local { key: String },
    Remote { key: String },
}

impl StoredLocation {
    pub fn from_canonical_path(canonical_path: &str) -> Self {
        let trimmed = canonical_path.trim_end_matches('/');
        let key = trimmed
            .rsplit('/')
            .next()
            .unwrap_or(trimmed)
            .to_string();

        if canonical_path.starts_with("http") {
            StoredLocation::Remote { key }
        } else {
            StoredLocation::Local { key }
        }
    }

    pub fn key(&self) -> &str {
        match self {
            StoredLocation::Local { key } | StoredLocation::Remote { key } => key,
        }
    }

    pub fn backend(&self) -> StorageBackend {
        match self {
            StoredLocation::Local { .. } => StorageBackend::Local,
            StoredLocation::Remote { .. } => StorageBackend::S3,
        }
    }
}

/// Which backend deletions succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted_locally: bool,
    pub deleted_remotely: bool,
}

impl DeleteOutcome {
    pub fn any_succeeded(&self) -> bool {
        self.deleted_locally || self.deleted_remotely
    }
}

/// Outcome of the best-effort remote write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteWrite {
    Stored { url: String },
    Degraded { reason: String },
}

impl RemoteWrite {
    pub fn url(&self) -> Option<&str> {
        match self {
            RemoteWrite::Stored { url } => Some(url),
            RemoteWrite::Degraded { .. } => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, RemoteWrite::Degraded { .. })
    }
}
