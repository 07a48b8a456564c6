pub mod loader;
pub mod schema;

use std::path::PathBuf;

pub use loader::{load_config, load_config_from_str, validate_config};
pub use schema::{
    BackendKind, LibraryConfig, LogFormat, LoggingConfig, SessionConfig, SqliteConfig,
    SupabaseConfig,
};

/// `~/.doclib/config.json`, or a relative `config.json` without a home directory.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".doclib").join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}
