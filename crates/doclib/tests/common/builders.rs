//! Builders for test configurations and uploads.

#![allow(dead_code)]

use doclib::config::{BackendKind, LibraryConfig};
use doclib::UploadFile;

/// Minimal bytes that look like a PDF header.
pub const PDF_BYTES: &[u8] = b"%PDF-1.7\n%test\n";

pub fn pdf_upload(file_name: &str) -> UploadFile {
    UploadFile::new(file_name, PDF_BYTES.to_vec())
}

pub fn upload_with(file_name: &str, bytes: &[u8]) -> UploadFile {
    UploadFile::new(file_name, bytes.to_vec())
}

/// Builder for `LibraryConfig` instances.
pub struct ConfigBuilder {
    config: LibraryConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: LibraryConfig::default(),
        }
    }

    pub fn backend(mut self, backend: BackendKind) -> Self {
        self.config.backend = backend;
        self
    }

    pub fn state_file(mut self, path: &str) -> Self {
        self.config.state_file = Some(path.to_string());
        self
    }

    pub fn database_path(mut self, path: &str) -> Self {
        self.config.sqlite.database_path = Some(path.to_string());
        self
    }

    pub fn blob_directory(mut self, path: &str) -> Self {
        self.config.sqlite.blob_directory = Some(path.to_string());
        self
    }

    pub fn public_base_url(mut self, url: &str) -> Self {
        self.config.sqlite.public_base_url = Some(url.to_string());
        self
    }

    pub fn admin(mut self, username: &str, password: &str) -> Self {
        self.config.session.username = Some(username.to_string());
        self.config.session.password = Some(password.to_string());
        self
    }

    pub fn build(self) -> LibraryConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
