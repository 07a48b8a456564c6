use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{validate_path, BlobStore};
use crate::error::StorageError;

/// Blobs held in process memory. Contents do not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, path: &str, bytes: &[u8], _content_type: &str) -> Result<(), StorageError> {
        validate_path(path)?;
        let mut blobs = self.blobs.write().map_err(|_| StorageError::LockPoisoned)?;
        if blobs.contains_key(path) {
            return Err(StorageError::BlobExists(path.to_string()));
        }
        blobs.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        validate_path(path)?;
        let mut blobs = self.blobs.write().map_err(|_| StorageError::LockPoisoned)?;
        blobs.remove(path);
        Ok(())
    }

    async fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_path(path)?;
        let blobs = self.blobs.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(blobs.get(path).cloned())
    }

    fn resolve_url(&self, path: &str) -> String {
        format!("memory:///{}", path)
    }
}
