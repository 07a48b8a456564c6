//! Metadata stores: what we know about each stored PDF.

use async_trait::async_trait;

use crate::error::MetadataError;
use crate::model::{NewDocument, StoredDocument};

pub mod local;
pub mod sqlite;
pub mod supabase;

pub use local::LocalMetadataStore;
pub use sqlite::SqliteMetadataStore;
pub use supabase::SupabaseMetadataStore;

#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Inserts a record. The store assigns `id` and `uploaded_at`.
    async fn insert(&self, doc: NewDocument) -> Result<StoredDocument, MetadataError>;

    /// Deletes a record. `Ok(false)` when no record had this id.
    async fn delete(&self, id: &str) -> Result<bool, MetadataError>;

    async fn get(&self, id: &str) -> Result<Option<StoredDocument>, MetadataError>;

    /// Every record, newest `uploaded_at` first.
    async fn list_all(&self) -> Result<Vec<StoredDocument>, MetadataError>;
}
