//! Error types for handler registries

use crate::priority::EventPriority;
use thiserror::Error;

/// Registry error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An equal (owner, handler, priority) subscription is already registered.
    ///
    /// This is an integration error in the registering code, not a runtime
    /// condition to retry. The registry is left exactly as it was.
    #[error(
        "Subscription {subscription} is already registered to priority {priority} in '{category}'"
    )]
    DuplicateRegistration {
        /// Event category of the rejecting registry
        category: String,
        /// Priority bucket that already holds the subscription
        priority: EventPriority,
        /// Debug rendering of the rejected subscription
        subscription: String,
    },
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Configuration loading error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::config::RegistryConfig`]
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_registration_display() {
        let err = RegistryError::DuplicateRegistration {
            category: "block_break".to_string(),
            priority: EventPriority::Low,
            subscription: "h1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Subscription h1 is already registered to priority low in 'block_break'"
        );
    }

    #[test]
    fn test_config_io_error_keeps_source() {
        let err = ConfigError::Io {
            path: "/missing.toml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/missing.toml"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
