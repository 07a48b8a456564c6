use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::{validate_path, BlobStore};
use crate::error::StorageError;

/// Blobs stored as files below a root directory.
pub struct FileSystemBlobStore {
    root: PathBuf,
    public_base_url: Option<String>,
}

impl FileSystemBlobStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            public_base_url: None,
        }
    }

    /// Serve URLs as `<base>/<path>` instead of `file://` URLs.
    pub fn with_public_base_url(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.public_base_url = Some(base.trim_end_matches('/').to_string());
        self
    }

    fn full_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        validate_path(path)?;
        Ok(self.root.join(path))
    }

    async fn ensure_directory(&self, path: &Path) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| StorageError::CreateDirectory {
                path: path.to_path_buf(),
                source: e,
            })
    }
}

#[async_trait]
impl BlobStore for FileSystemBlobStore {
    async fn put(&self, path: &str, bytes: &[u8], _content_type: &str) -> Result<(), StorageError> {
        let full_path = self.full_path(path)?;
        if let Some(parent) = full_path.parent() {
            self.ensure_directory(parent).await?;
        }

        // create_new gives an atomic check-and-create (O_CREAT | O_EXCL)
        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::BlobExists(path.to_string()));
            }
            Err(e) => {
                return Err(StorageError::WriteFile {
                    path: full_path,
                    source: e,
                });
            }
        };

        let written = async {
            file.write_all(bytes).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            // Don't leave a truncated blob behind.
            let _ = tokio::fs::remove_file(&full_path).await;
            return Err(StorageError::WriteFile {
                path: full_path,
                source: e,
            });
        }

        log::debug!("Stored blob {} ({} bytes)", path, bytes.len());
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        let full_path = self.full_path(path)?;
        match tokio::fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Blob {} already absent on remove", path);
                Ok(())
            }
            Err(e) => Err(StorageError::RemoveFile {
                path: full_path,
                source: e,
            }),
        }
    }

    async fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let full_path = self.full_path(path)?;
        match tokio::fs::read(&full_path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFile {
                path: full_path,
                source: e,
            }),
        }
    }

    fn resolve_url(&self, path: &str) -> String {
        if let Some(base) = &self.public_base_url {
            return format!("{}/{}", base, path);
        }

        let full_path = self.root.join(path);
        reqwest::Url::from_file_path(&full_path)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| full_path.display().to_string())
    }
}
