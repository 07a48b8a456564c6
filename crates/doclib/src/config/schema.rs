use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::secrets::SecretSource;

pub const CONFIG_VERSION: &str = "1.0";
pub const DEFAULT_URL_ENV_VAR: &str = "SUPABASE_URL";
pub const DEFAULT_ANON_KEY_ENV_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryConfig {
    pub version: String,
    #[serde(default)]
    pub backend: BackendKind,
    /// Key/value state file. `None` keeps state in memory.
    #[serde(default)]
    pub state_file: Option<String>,
    #[serde(default)]
    pub sqlite: SqliteConfig,
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            backend: BackendKind::default(),
            state_file: None,
            sqlite: SqliteConfig::default(),
            supabase: SupabaseConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Local,
    Sqlite,
    Supabase,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BackendKind::Local => "local",
            BackendKind::Sqlite => "sqlite",
            BackendKind::Supabase => "supabase",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqliteConfig {
    /// Defaults to `~/.doclib/data/doclib.db`.
    #[serde(default)]
    pub database_path: Option<String>,
    /// Defaults to a `blobs` directory next to the database.
    #[serde(default)]
    pub blob_directory: Option<String>,
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl SqliteConfig {
    /// Blob root for a given database file.
    pub fn blob_directory_for(&self, database_path: &std::path::Path) -> PathBuf {
        match &self.blob_directory {
            Some(dir) => PathBuf::from(crate::secrets::expand_home(dir)),
            None => database_path
                .parent()
                .map(|p| p.join("blobs"))
                .unwrap_or_else(|| PathBuf::from("blobs")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_file: Option<String>,
    #[serde(default = "default_url_env_var")]
    pub url_env_var: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
    #[serde(default)]
    pub anon_key_file: Option<String>,
    #[serde(default = "default_anon_key_env_var")]
    pub anon_key_env_var: Option<String>,
}

fn default_url_env_var() -> Option<String> {
    Some(DEFAULT_URL_ENV_VAR.to_string())
}

fn default_anon_key_env_var() -> Option<String> {
    Some(DEFAULT_ANON_KEY_ENV_VAR.to_string())
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            url_file: None,
            url_env_var: default_url_env_var(),
            anon_key: None,
            anon_key_file: None,
            anon_key_env_var: default_anon_key_env_var(),
        }
    }
}

impl SupabaseConfig {
    pub fn url_source(&self) -> SecretSource<'_> {
        SecretSource::new(
            self.url.as_deref(),
            self.url_file.as_deref(),
            self.url_env_var.as_deref(),
        )
    }

    pub fn anon_key_source(&self) -> SecretSource<'_> {
        SecretSource::new(
            self.anon_key.as_deref(),
            self.anon_key_file.as_deref(),
            self.anon_key_env_var.as_deref(),
        )
    }
}

/// Administrator credentials. Unset fields fall back to `admin` / `pass`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_file: Option<String>,
    #[serde(default)]
    pub password_env_var: Option<String>,
}

impl SessionConfig {
    pub fn password_source(&self) -> SecretSource<'_> {
        SecretSource::new(
            self.password.as_deref(),
            self.password_file.as_deref(),
            self.password_env_var.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
