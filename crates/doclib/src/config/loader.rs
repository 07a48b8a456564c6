use std::path::Path;

use crate::config::schema::{BackendKind, LibraryConfig, CONFIG_VERSION};
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../../../schema/library-config-v1.json");

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LibraryConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = load_config_from_str(&content)?;
    log::info!(
        "Loaded config '{}' (backend: {})",
        crate::sanitize::redact_path(path),
        config.backend
    );
    Ok(config)
}

pub fn load_config_from_str(content: &str) -> Result<LibraryConfig, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: LibraryConfig = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let errors: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !errors.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: errors.join("; "),
        });
    }

    Ok(())
}

/// Checks the schema cannot express.
pub fn validate_config(config: &LibraryConfig) -> Result<(), ConfigError> {
    if config.version != CONFIG_VERSION {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::Validation {
            message: format!("Unknown log level: {}", config.logging.level),
        });
    }

    if let Some(base) = &config.sqlite.public_base_url {
        if reqwest::Url::parse(base).is_err() {
            return Err(ConfigError::Validation {
                message: format!("sqlite.publicBaseUrl is not a valid URL: {}", base),
            });
        }
    }

    if config.backend == BackendKind::Supabase {
        if let Some(url) = config.supabase.url.as_deref().filter(|u| !u.is_empty()) {
            if reqwest::Url::parse(url).is_err() {
                return Err(ConfigError::Validation {
                    message: "supabase.url is not a valid URL".to_string(),
                });
            }
        }
    } else if config.supabase.url.is_some() || config.supabase.anon_key.is_some() {
        log::warn!(
            "Supabase settings are ignored with the '{}' backend",
            config.backend
        );
    }

    if config.session.password_source().is_configured() && config.session.username.is_none() {
        log::debug!("Admin password configured without username; using the default username");
    }

    Ok(())
}
