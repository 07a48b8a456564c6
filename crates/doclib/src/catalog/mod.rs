//! The catalog service: list, look up, add, and delete documents over a
//! blob store and a metadata store.
//!
//! The two stores are independent. Adds write the blob first and the
//! metadata second; deletes remove the blob first and the metadata
//! second. Neither pair is transactional:
//!
//! - a failed metadata insert triggers a best-effort removal of the blob
//!   just written; if that removal fails too, the orphan is logged with
//!   its path and the insert error is returned.
//! - a failed blob removal aborts the delete and leaves the metadata in
//!   place.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::error::CatalogError;
use crate::metadata::MetadataStore;
use crate::model::{DocumentRecord, NewDocument, StoredDocument, UploadFile, PDF_CONTENT_TYPE};
use crate::sanitize::hash_id;
use crate::storage::BlobStore;

pub mod path;
pub mod validation;

pub use path::{sanitize_file_name, storage_path};
pub use validation::{is_pdf_file_name, validate_upload};

#[derive(Clone)]
pub struct CatalogService {
    blobs: Arc<dyn BlobStore>,
    metadata: Arc<dyn MetadataStore>,
}

impl CatalogService {
    pub fn new(blobs: Arc<dyn BlobStore>, metadata: Arc<dyn MetadataStore>) -> Self {
        Self { blobs, metadata }
    }

    pub fn blob_store(&self) -> &Arc<dyn BlobStore> {
        &self.blobs
    }

    /// All documents, newest first.
    pub async fn list(&self) -> Result<Vec<DocumentRecord>, CatalogError> {
        let documents = self
            .metadata
            .list_all()
            .instrument(info_span!("catalog.list"))
            .await?;

        debug!(count = documents.len(), "catalog.list");
        Ok(documents.into_iter().map(|d| self.to_record(d)).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<DocumentRecord>, CatalogError> {
        let span = info_span!("catalog.get", doc = %hash_id(id));
        let found = self.metadata.get(id).instrument(span).await?;
        Ok(found.map(|d| self.to_record(d)))
    }

    /// Bytes of a document, `None` if the record or its blob is gone.
    pub async fn download(&self, id: &str) -> Result<Option<Vec<u8>>, CatalogError> {
        let span = info_span!("catalog.download", doc = %hash_id(id));
        self.download_inner(id).instrument(span).await
    }

    /// Validates, stores the bytes, then records the metadata.
    pub async fn add(&self, upload: UploadFile, title: &str) -> Result<DocumentRecord, CatalogError> {
        validate_upload(&upload, title)?;
        let title = title.to_string();
        let span = info_span!("catalog.add", size = upload.bytes.len());
        self.add_inner(upload, title).instrument(span).await
    }

    /// Removes blob and metadata. `Ok(false)` when no such document exists.
    pub async fn delete(&self, id: &str) -> Result<bool, CatalogError> {
        let span = info_span!("catalog.delete", doc = %hash_id(id));
        self.delete_inner(id).instrument(span).await
    }

    async fn download_inner(&self, id: &str) -> Result<Option<Vec<u8>>, CatalogError> {
        let Some(doc) = self.metadata.get(id).await? else {
            return Ok(None);
        };
        let Some(path) = doc.path.as_deref() else {
            debug!("record has no storage path");
            return Ok(None);
        };
        Ok(self.blobs.fetch(path).await?)
    }

    async fn add_inner(&self, upload: UploadFile, title: String) -> Result<DocumentRecord, CatalogError> {
        let path = storage_path(&upload.file_name, Utc::now());

        self.blobs
            .put(&path, &upload.bytes, PDF_CONTENT_TYPE)
            .await?;

        let new_doc = NewDocument {
            title,
            file_name: upload.file_name.clone(),
            size: Some(upload.size()),
            path: Some(path.clone()),
        };

        let stored = match self.metadata.insert(new_doc).await {
            Ok(stored) => stored,
            Err(insert_err) => {
                warn!(error = %insert_err, "metadata insert failed, removing uploaded blob");
                if let Err(cleanup_err) = self.blobs.remove(&path).await {
                    error!(path = %path, error = %cleanup_err, "orphaned blob left in storage");
                }
                return Err(insert_err.into());
            }
        };

        info!(doc = %hash_id(&stored.id), "document added");
        Ok(self.to_record(stored))
    }

    async fn delete_inner(&self, id: &str) -> Result<bool, CatalogError> {
        let Some(doc) = self.metadata.get(id).await? else {
            debug!("nothing to delete");
            return Ok(false);
        };

        if let Some(path) = doc.path.as_deref() {
            self.blobs.remove(path).await?;
        }

        let removed = self.metadata.delete(id).await?;
        if removed {
            info!("document deleted");
        }
        Ok(removed)
    }

    fn to_record(&self, doc: StoredDocument) -> DocumentRecord {
        let url = doc
            .path
            .as_deref()
            .map(|p| self.blobs.resolve_url(p))
            .unwrap_or_default();
        doc.into_record(url)
    }
}
