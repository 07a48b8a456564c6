use async_trait::async_trait;
use chrono::Utc;

use super::MetadataStore;
use crate::db::document_repo::{self, DocumentRow};
use crate::db::Database;
use crate::error::MetadataError;
use crate::model::{NewDocument, StoredDocument};

/// Metadata in the `pdf_documents` table of a local SQLite database.
#[derive(Clone)]
pub struct SqliteMetadataStore {
    db: Database,
}

impl SqliteMetadataStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MetadataStore for SqliteMetadataStore {
    async fn insert(&self, doc: NewDocument) -> Result<StoredDocument, MetadataError> {
        let stored = StoredDocument {
            id: uuid::Uuid::new_v4().to_string(),
            title: doc.title,
            file_name: doc.file_name,
            uploaded_at: Utc::now(),
            size: doc.size,
            path: doc.path,
        };

        document_repo::insert(&self.db, &DocumentRow::from_document(&stored))?;
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> Result<bool, MetadataError> {
        Ok(document_repo::delete(&self.db, id)?)
    }

    async fn get(&self, id: &str) -> Result<Option<StoredDocument>, MetadataError> {
        match document_repo::find_by_id(&self.db, id)? {
            Some(row) => Ok(Some(row.into_document()?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<StoredDocument>, MetadataError> {
        document_repo::list_newest_first(&self.db)?
            .into_iter()
            .map(|row| row.into_document().map_err(MetadataError::from))
            .collect()
    }
}
