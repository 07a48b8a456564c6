use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Serialize;

use super::{validate_path, BlobStore};
use crate::error::StorageError;
use crate::supabase::{RemoteError, SupabaseClient, BUCKET};

/// Blobs in the `pdfs` bucket of Supabase Storage.
pub struct SupabaseBlobStore {
    client: SupabaseClient,
}

#[derive(Serialize)]
struct RemoveRequest<'a> {
    prefixes: [&'a str; 1],
}

impl SupabaseBlobStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BlobStore for SupabaseBlobStore {
    async fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError> {
        validate_path(path)?;
        let url = self.client.endpoint(&["storage", "v1", "object", BUCKET, path])?;

        let request = self
            .client
            .request(Method::POST, url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes.to_vec());

        match self.client.send(request).await {
            Ok(_) => {
                log::debug!("Uploaded {} ({} bytes) to bucket {}", path, bytes.len(), BUCKET);
                Ok(())
            }
            // Storage reports duplicates as 409, or as 400 with a 409 body.
            Err(RemoteError::Status { status, ref body })
                if status == StatusCode::CONFLICT.as_u16() || body.contains("\"409\"") =>
            {
                Err(StorageError::BlobExists(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        validate_path(path)?;
        let url = self.client.endpoint(&["storage", "v1", "object", BUCKET])?;

        let request = self
            .client
            .request(Method::DELETE, url)
            .json(&RemoveRequest { prefixes: [path] });

        self.client.send(request).await?;
        Ok(())
    }

    async fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_path(path)?;
        let url = self
            .client
            .endpoint(&["storage", "v1", "object", "public", BUCKET, path])?;

        let request = self.client.request(Method::GET, url);
        match self.client.send(request).await {
            Ok(response) => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| StorageError::Remote(RemoteError::Request(e)))?;
                Ok(Some(bytes.to_vec()))
            }
            Err(RemoteError::Status { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16()
                    || status == StatusCode::BAD_REQUEST.as_u16() =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn resolve_url(&self, path: &str) -> String {
        self.client
            .display_endpoint(&["storage", "v1", "object", "public", BUCKET, path])
    }
}
