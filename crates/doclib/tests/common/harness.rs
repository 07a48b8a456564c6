//! Isolated environment for integration tests.
//!
//! Every harness owns a temp directory holding the state file, the SQLite
//! database and the blob directory, so tests never share state.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use doclib::config::{BackendKind, LibraryConfig};
use doclib::{Credentials, Library};

use super::builders::ConfigBuilder;

pub struct TestHarness {
    temp_dir: TempDir,
    pub state_path: PathBuf,
    pub db_path: PathBuf,
    pub blob_dir: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();

        Self {
            state_path: base.join("state.json"),
            db_path: base.join("data").join("doclib.db"),
            blob_dir: base.join("blobs"),
            temp_dir,
        }
    }

    pub fn base_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Config for `backend` with every path inside the temp directory.
    pub fn config(&self, backend: BackendKind) -> LibraryConfig {
        ConfigBuilder::new()
            .backend(backend)
            .state_file(&self.state_path.to_string_lossy())
            .database_path(&self.db_path.to_string_lossy())
            .blob_directory(&self.blob_dir.to_string_lossy())
            .build()
    }

    pub fn library(&self, backend: BackendKind) -> Library {
        Library::from_config(&self.config(backend)).expect("Failed to build library")
    }

    /// Library with the default administrator already logged in.
    pub fn admin_library(&self, backend: BackendKind) -> Library {
        let library = self.library(backend);
        let ok = library
            .login(&Credentials::new("admin", "pass"))
            .expect("Login failed");
        assert!(ok, "default admin credentials rejected");
        library
    }

    /// Path of a stored blob for the filesystem-backed backend.
    pub fn blob_path(&self, storage_path: &str) -> PathBuf {
        self.blob_dir.join(storage_path)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
