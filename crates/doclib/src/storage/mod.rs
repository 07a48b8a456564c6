//! Blob stores: where the PDF bytes live.

use async_trait::async_trait;

use crate::error::StorageError;

pub mod filesystem;
pub mod memory;
pub mod supabase;

pub use filesystem::FileSystemBlobStore;
pub use memory::MemoryBlobStore;
pub use supabase::SupabaseBlobStore;

/// Byte storage addressed by a relative path.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes `bytes` at `path`. Fails if a blob already exists there.
    async fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError>;

    /// Removes the blob at `path`. Removing a missing blob succeeds.
    async fn remove(&self, path: &str) -> Result<(), StorageError>;

    /// Reads the blob at `path`, `None` if nothing is stored there.
    async fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Public retrieval location for `path`. Pure; never touches storage.
    fn resolve_url(&self, path: &str) -> String;
}

/// Rejects empty, absolute, and parent-escaping paths.
pub(crate) fn validate_path(path: &str) -> Result<(), StorageError> {
    let invalid = path.is_empty()
        || path.starts_with('/')
        || path.starts_with('\\')
        || path.contains('\0')
        || path.split(['/', '\\']).any(|seg| seg == ".." || seg.is_empty());

    if invalid {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(())
}
