use std::path::PathBuf;
use thiserror::Error;

use crate::supabase::RemoteError;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] crate::persistence::PersistenceError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),

    #[error("Remote backend error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Administrator login required")]
    Unauthorized,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },

    #[error("Failed to resolve secret '{name}': {source}")]
    Secret {
        name: String,
        #[source]
        source: crate::secrets::SecretError,
    },
}

/// Errors from the blob side of the catalog.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove file '{path}': {source}")]
    RemoveFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Blob already exists at '{0}'")]
    BlobExists(String),

    #[error("Invalid storage path '{0}'")]
    InvalidPath(String),

    #[error("Blob store lock poisoned")]
    LockPoisoned,

    #[error("Remote storage error: {0}")]
    Remote(#[from] RemoteError),
}

/// Errors from the metadata side of the catalog.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),

    #[error("Local storage error: {0}")]
    Persistence(#[from] crate::persistence::PersistenceError),

    #[error("Remote metadata error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Corrupt document record: {0}")]
    Corrupt(String),
}

/// Upload input rejected before any storage call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("A document title is required")]
    EmptyTitle,

    #[error("No file was provided")]
    MissingFile,

    #[error("'{file_name}' is not a PDF file")]
    NotPdf { file_name: String },
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid upload: {0}")]
    Validation(#[from] ValidationError),

    #[error("Blob storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Metadata storage failed: {0}")]
    Metadata(#[from] MetadataError),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to persist session marker: {0}")]
    Persistence(#[from] crate::persistence::PersistenceError),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
