pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod library;
pub mod logging;
pub mod metadata;
pub mod model;
pub mod persistence;
pub mod sanitize;
pub mod secrets;
pub mod session;
pub mod storage;
pub mod supabase;

pub use catalog::CatalogService;
pub use config::{load_config, BackendKind, LibraryConfig};
pub use error::{
    CatalogError, ConfigError, LibraryError, MetadataError, Result, SessionError, StorageError,
    ValidationError,
};
pub use library::Library;
pub use logging::init_logging;
pub use metadata::MetadataStore;
pub use model::{DocumentRecord, UploadFile};
pub use persistence::{JsonFileStore, KeyValueStore, MemoryStore};
pub use secrets::{SecretError, SecretSource};
pub use session::{CredentialVerifier, Credentials, SessionGate, SessionState};
pub use storage::BlobStore;
