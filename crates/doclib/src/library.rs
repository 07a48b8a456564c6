//! Presentation-facing facade.
//!
//! [`Library`] bundles the catalog with the session gate. Reads are open to
//! everyone; `add` and `delete` require an authenticated administrator and
//! fail with [`LibraryError::Unauthorized`] otherwise.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;

use crate::catalog::CatalogService;
use crate::config::{BackendKind, LibraryConfig};
use crate::db::{default_database_path, Database};
use crate::error::{ConfigError, LibraryError, Result};
use crate::metadata::{LocalMetadataStore, SqliteMetadataStore, SupabaseMetadataStore};
use crate::model::{DocumentRecord, UploadFile};
use crate::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
use crate::sanitize::redact_path;
use crate::secrets::{expand_home, SecretSource};
use crate::session::{
    CredentialVerifier, Credentials, SessionGate, StaticCredentials, DEFAULT_ADMIN_USERNAME,
};
use crate::storage::{FileSystemBlobStore, MemoryBlobStore, SupabaseBlobStore};
use crate::supabase::SupabaseClient;

pub struct Library {
    catalog: CatalogService,
    session: SessionGate,
}

impl Library {
    pub fn new(catalog: CatalogService, session: SessionGate) -> Self {
        Self { catalog, session }
    }

    /// Assembles the configured backend.
    ///
    /// Missing Supabase values are logged and the client is built empty, so
    /// assembly succeeds and the first remote call fails instead.
    pub fn from_config(config: &LibraryConfig) -> Result<Self> {
        let state = open_state(config)?;
        let verifier = build_verifier(config)?;

        let catalog = match config.backend {
            BackendKind::Local => {
                log::warn!(
                    "Local backend keeps uploaded file bytes in memory only; they are lost on restart"
                );
                CatalogService::new(
                    Arc::new(MemoryBlobStore::new()),
                    Arc::new(LocalMetadataStore::new(state.clone())),
                )
            }
            BackendKind::Sqlite => {
                let db_path = match &config.sqlite.database_path {
                    Some(path) => PathBuf::from(expand_home(path)),
                    None => default_database_path().ok_or_else(|| ConfigError::Validation {
                        message: "No home directory; set sqlite.databasePath".to_string(),
                    })?,
                };
                let db = Database::open(&db_path)?;

                let blob_root = config.sqlite.blob_directory_for(&db_path);
                let mut blobs = FileSystemBlobStore::new(&blob_root);
                if let Some(base) = &config.sqlite.public_base_url {
                    blobs = blobs.with_public_base_url(base.clone());
                }
                log::info!(
                    "SQLite backend: database '{}', blobs under '{}'",
                    redact_path(&db_path),
                    redact_path(&blob_root)
                );

                CatalogService::new(Arc::new(blobs), Arc::new(SqliteMetadataStore::new(db)))
            }
            BackendKind::Supabase => {
                let client = build_supabase_client(config)?;
                CatalogService::new(
                    Arc::new(SupabaseBlobStore::new(client.clone())),
                    Arc::new(SupabaseMetadataStore::new(client)),
                )
            }
        };

        Ok(Self::new(catalog, SessionGate::new(state, verifier)))
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    pub async fn list(&self) -> Result<Vec<DocumentRecord>> {
        Ok(self.catalog.list().await?)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<DocumentRecord>> {
        Ok(self.catalog.get_by_id(id).await?)
    }

    pub async fn download(&self, id: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.catalog.download(id).await?)
    }

    pub async fn add(&self, upload: UploadFile, title: &str) -> Result<DocumentRecord> {
        self.require_admin("add")?;
        Ok(self.catalog.add(upload, title).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.require_admin("delete")?;
        Ok(self.catalog.delete(id).await?)
    }

    pub fn login(&self, credentials: &Credentials) -> Result<bool> {
        Ok(self.session.login(credentials)?)
    }

    pub fn logout(&self) -> Result<()> {
        Ok(self.session.logout()?)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    fn require_admin(&self, action: &str) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            log::warn!("Rejected anonymous {} request", action);
            Err(LibraryError::Unauthorized)
        }
    }
}

fn open_state(config: &LibraryConfig) -> Result<Arc<dyn KeyValueStore>> {
    match &config.state_file {
        Some(path) => Ok(Arc::new(JsonFileStore::open(expand_home(path))?)),
        None => Ok(Arc::new(MemoryStore::new())),
    }
}

fn build_verifier(config: &LibraryConfig) -> Result<Arc<dyn CredentialVerifier>> {
    let password = config
        .session
        .password_source()
        .resolve_optional()
        .map_err(|e| ConfigError::Secret {
            name: "session.password".to_string(),
            source: e,
        })?;

    let verifier = match (config.session.username.as_deref(), password) {
        (None, None) => StaticCredentials::default(),
        (username, Some(password)) => {
            StaticCredentials::new(username.unwrap_or(DEFAULT_ADMIN_USERNAME), password)
        }
        (Some(username), None) => {
            log::warn!("Admin username configured without a password; keeping the default password");
            StaticCredentials::new(
                username,
                SecretString::from(crate::session::DEFAULT_ADMIN_PASSWORD.to_string()),
            )
        }
    };
    Ok(Arc::new(verifier))
}

/// Resolves one required remote setting, logging instead of failing.
fn resolve_or_empty(name: &str, source: SecretSource<'_>) -> SecretString {
    match source.resolve() {
        Ok(value) => value,
        Err(e) => {
            log::error!("Supabase {} is not configured: {}", name, e);
            SecretString::from(String::new())
        }
    }
}

fn build_supabase_client(config: &LibraryConfig) -> Result<SupabaseClient> {
    use secrecy::ExposeSecret;

    let url = resolve_or_empty("URL", config.supabase.url_source());
    let anon_key = resolve_or_empty("anon key", config.supabase.anon_key_source());

    let client = SupabaseClient::new(url.expose_secret().to_string(), anon_key)?;
    if client.is_configured() {
        log::info!("Supabase backend at {:?}", client);
    }
    Ok(client)
}
