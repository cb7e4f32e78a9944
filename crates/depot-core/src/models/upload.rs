use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stored_file::StoredFile;

/// Persisted upload record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub language: String,
    pub provider: String,
    pub roles: Vec<String>,
    pub local_path: String,
    pub remote_path: Option<String>,
    pub canonical_path: String,
    pub created_at: DateTime<Utc>,
}

impl Upload {
    /// Path callers should fetch the file from
    pub fn access_path(&self) -> &str {
        &self.canonical_path
    }
}

/// Descriptive fields submitted alongside the file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadMetadata {
    pub title: String,
    pub description: String,
    pub category: String,
    pub language: String,
    pub provider: String,
    pub roles: Vec<String>,
}

impl UploadMetadata {
    /// Split a comma-separated role list, dropping blank entries.
    pub fn parse_roles(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Fields handed to the record store on create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUpload {
    pub title: String,
    pub description: String,
    pub category: String,
    pub language: String,
    pub provider: String,
    pub roles: Vec<String>,
    pub local_path: String,
    pub remote_path: Option<String>,
    pub canonical_path: String,
}

impl NewUpload {
    pub fn from_stored(metadata: UploadMetadata, stored: &StoredFile) -> Self {
        Self {
            title: metadata.title,
            description: metadata.description,
            category: metadata.category,
            language: metadata.language,
            provider: metadata.provider,
            roles: metadata.roles,
            local_path: stored.local_path.clone(),
            remote_path: stored.remote_path.clone(),
            canonical_path: stored.canonical_path.clone(),
        }
    }

    /// Materialize a record with the given id and timestamp.
    pub fn into_upload(self, id: Uuid, created_at: DateTime<Utc>) -> Upload {
        Upload {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            language: self.language,
            provider: self.provider,
            roles: self.roles,
            local_path: self.local_path,
            remote_path: self.remote_path,
            canonical_path: self.canonical_path,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roles() {
        assert_eq!(
            UploadMetadata::parse_roles("admin, editor,,viewer "),
            vec!["admin", "editor", "viewer"]
        );
        assert!(UploadMetadata::parse_roles("").is_empty());
    }

    #[test]
    fn test_new_upload_flattens_stored_file() {
        let stored = StoredFile::new(
            "1-a.txt".to_string(),
            "/uploads/1-a.txt".to_string(),
            None,
            "text/plain".to_string(),
        );
        let metadata = UploadMetadata {
            title: "Report".to_string(),
            roles: vec!["admin".to_string()],
            ..Default::default()
        };

        let new_upload = NewUpload::from_stored(metadata, &stored);
        assert_eq!(new_upload.local_path, "/uploads/1-a.txt");
        assert_eq!(new_upload.remote_path, None);
        assert_eq!(new_upload.canonical_path, "/uploads/1-a.txt");

        let id = Uuid::new_v4();
        let upload = new_upload.into_upload(id, Utc::now());
        assert_eq!(upload.id, id);
        assert_eq!(upload.title, "Report");
        assert_eq!(upload.access_path(), "/uploads/1-a.txt");
    }

    #[test]
    fn test_upload_serializes_camel_case() {
        let upload = NewUpload {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            language: String::new(),
            provider: String::new(),
            roles: vec![],
            local_path: "/uploads/x".to_string(),
            remote_path: None,
            canonical_path: "/uploads/x".to_string(),
        }
        .into_upload(Uuid::new_v4(), Utc::now());

        let json = serde_json::to_value(&upload).unwrap();
        assert_eq!(json["localPath"], "/uploads/x");
        assert!(json["remotePath"].is_null());
        assert!(json.get("createdAt").is_some());
    }
}
