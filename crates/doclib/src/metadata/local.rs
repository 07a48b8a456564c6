//! Metadata kept as one JSON array in client-local storage.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use super::MetadataStore;
use crate::error::MetadataError;
use crate::model::{NewDocument, StoredDocument};
use crate::persistence::{KeyValueStore, PersistenceError, DOCUMENTS_KEY};

/// Records serialized under [`DOCUMENTS_KEY`], in insertion order.
///
/// A missing key reads as an empty catalog and is initialized to `[]`
/// on first access.
pub struct LocalMetadataStore {
    storage: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write cycles on the document list.
    write_lock: Mutex<()>,
}

impl LocalMetadataStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Vec<StoredDocument>, MetadataError> {
        let raw = match self.storage.get(DOCUMENTS_KEY)? {
            Some(raw) => raw,
            None => {
                log::debug!("Initializing empty document list under {}", DOCUMENTS_KEY);
                self.storage.set(DOCUMENTS_KEY, "[]")?;
                return Ok(Vec::new());
            }
        };

        serde_json::from_str(&raw)
            .map_err(|e| MetadataError::Corrupt(format!("{}: {}", DOCUMENTS_KEY, e)))
    }

    fn save(&self, documents: &[StoredDocument]) -> Result<(), MetadataError> {
        let json = serde_json::to_string(documents).map_err(PersistenceError::from)?;
        self.storage.set(DOCUMENTS_KEY, &json)?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, MetadataError> {
        self.write_lock
            .lock()
            .map_err(|_| MetadataError::Persistence(PersistenceError::LockPoisoned))
    }
}

#[async_trait]
impl MetadataStore for LocalMetadataStore {
    async fn insert(&self, doc: NewDocument) -> Result<StoredDocument, MetadataError> {
        let _guard = self.lock()?;
        let mut documents = self.load()?;

        let stored = StoredDocument {
            id: uuid::Uuid::new_v4().to_string(),
            title: doc.title,
            file_name: doc.file_name,
            uploaded_at: Utc::now(),
            size: doc.size,
            path: doc.path,
        };

        documents.push(stored.clone());
        self.save(&documents)?;
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> Result<bool, MetadataError> {
        let _guard = self.lock()?;
        let mut documents = self.load()?;

        let before = documents.len();
        documents.retain(|d| d.id != id);
        if documents.len() == before {
            return Ok(false);
        }

        self.save(&documents)?;
        Ok(true)
    }

    async fn get(&self, id: &str) -> Result<Option<StoredDocument>, MetadataError> {
        let _guard = self.lock()?;
        Ok(self.load()?.into_iter().find(|d| d.id == id))
    }

    async fn list_all(&self) -> Result<Vec<StoredDocument>, MetadataError> {
        let _guard = self.lock()?;
        let mut documents = self.load()?;
        // Reverse first so the stable sort keeps later inserts ahead on ties.
        documents.reverse();
        documents.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(documents)
    }
}
