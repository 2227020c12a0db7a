//! Registry configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file is valid:
//!
//! ```toml
//! prebake = true
//!
//! [logging]
//! level = "debug"
//! include_target = false
//! use_ansi = false
//! ```

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for registries and their logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Bake every registry during warm-up instead of on first dispatch
    pub prebake: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            prebake: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl RegistryConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (e.g. "info" or "handler_registry=debug")
    pub level: String,

    /// Whether to include target/module
    pub include_target: bool,

    /// Whether to use ANSI colors
    pub use_ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            include_target: true,
            use_ansi: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_registry_config_default() {
        let config = RegistryConfig::default();
        assert!(config.prebake);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.include_target);
        assert!(config.logging.use_ansi);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = RegistryConfig::from_toml_str("").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = RegistryConfig::from_toml_str(
            r#"
            prebake = false

            [logging]
            level = "handler_registry=trace"
            "#,
        )
        .unwrap();

        assert!(!config.prebake);
        assert_eq!(config.logging.level, "handler_registry=trace");
        // Unset fields keep their defaults
        assert!(config.logging.use_ansi);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = RegistryConfig::from_toml_str("prebake = \"sometimes\"")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prebake = false").unwrap();

        let config = RegistryConfig::load(file.path()).unwrap();
        assert!(!config.prebake);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RegistryConfig::load(dir.path().join("missing.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_serialize_round_trips() {
        let config = RegistryConfig {
            prebake: false,
            logging: LoggingConfig {
                level: "warn".to_string(),
                include_target: false,
                use_ansi: false,
            },
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(RegistryConfig::from_toml_str(&text).unwrap(), config);
    }
}
