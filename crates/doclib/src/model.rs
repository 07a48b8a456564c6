//! Document records as seen by callers and as kept by metadata stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content type every blob in the library is written with.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Public description of one stored PDF.
///
/// `url` is resolved from `path` by the blob store each time a record is
/// read; it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: String,
    pub title: String,
    pub file_name: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// A record as persisted by a metadata store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub id: String,
    pub title: String,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl StoredDocument {
    /// Attaches a retrieval URL, producing the public record.
    pub fn into_record(self, url: String) -> DocumentRecord {
        DocumentRecord {
            id: self.id,
            title: self.title,
            file_name: self.file_name,
            url,
            uploaded_at: self.uploaded_at,
            size: self.size,
            path: self.path,
        }
    }
}

/// Fields supplied on insert. The store assigns `id` and `uploaded_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub title: String,
    pub file_name: String,
    pub size: Option<u64>,
    pub path: Option<String>,
}

/// An uploaded file as handed over by the presentation layer.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("bytes.len", &self.bytes.len())
            .finish()
    }
}
