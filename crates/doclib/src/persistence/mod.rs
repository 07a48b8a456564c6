//! Client-local key/value persistence.
//!
//! Stands in for browser local storage: the local metadata store keeps its
//! document list here and the session gate keeps its marker here.

use std::path::PathBuf;
use thiserror::Error;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Key holding the serialized document list of the local backend.
pub const DOCUMENTS_KEY: &str = "dbms-pdf-documents";

/// Key holding the administrator session marker.
pub const AUTH_TOKEN_KEY: &str = "dbms-admin-auth";

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt state file '{path}': {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("State lock poisoned")]
    LockPoisoned,
}

/// A string-to-string store with local-storage semantics.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}
