//! Process-wide log subscriber.
//!
//! `log` records from this crate and its dependencies are bridged into
//! `tracing`, so catalog spans and plain log lines share one output.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("A global tracing subscriber is already installed")]
    SubscriberAlreadySet,

    #[error("A global log bridge is already installed")]
    LogBridgeAlreadySet,
}

/// Filter directive used when `RUST_LOG` is unset.
fn default_directive(config: &LoggingConfig) -> String {
    format!("doclib={level},{level}", level = config.level.to_ascii_lowercase())
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directive = default_directive(config);
    EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter {
        filter: directive,
        reason: e.to_string(),
    })
}

/// Installs the global subscriber. Call once at startup; `RUST_LOG`
/// overrides the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(tracing_subscriber::fmt::layer().json().with_target(true)),
        ),
        LogFormat::Text => tracing::subscriber::set_global_default(
            registry.with(tracing_subscriber::fmt::layer().with_target(true)),
        ),
    };
    installed.map_err(|_| LoggingError::SubscriberAlreadySet)?;

    tracing_log::LogTracer::init().map_err(|_| LoggingError::LogBridgeAlreadySet)?;

    log::debug!(
        "Logging initialized (level: {}, format: {:?})",
        config.level,
        config.format
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_directive() {
        let config = LoggingConfig {
            level: "WARN".to_string(),
            format: LogFormat::Text,
        };
        assert_eq!(default_directive(&config), "doclib=warn,warn");
    }

    #[test]
    #[serial]
    fn test_build_filter_from_config() {
        std::env::remove_var("RUST_LOG");
        let filter = build_filter(&LoggingConfig::default()).unwrap();
        assert!(filter.to_string().to_lowercase().contains("doclib=info"));
    }

    #[test]
    #[serial]
    fn test_rust_log_overrides_config() {
        std::env::set_var("RUST_LOG", "doclib=trace");
        let filter = build_filter(&LoggingConfig::default()).unwrap();
        std::env::remove_var("RUST_LOG");
        assert!(filter.to_string().to_lowercase().contains("doclib=trace"));
    }
}
