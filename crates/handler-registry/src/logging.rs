//! Logging setup for processes embedding the registry.
//!
//! Registries only emit `tracing` events; installing a subscriber is up to
//! the host. [`init_logging`] is the stock way to do that from a
//! [`LoggingConfig`].

use crate::config::LoggingConfig;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a global fmt subscriber configured from `config`.
///
/// `RUST_LOG` takes precedence over `config.level` when set. Calling this
/// more than once is harmless; only the first call installs a subscriber,
/// and an already installed subscriber (e.g. from a test harness) is kept.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config);

        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.include_target)
            .with_ansi(config.use_ansi)
            .try_init();

        if result.is_ok() {
            tracing::debug!(level = %config.level, "Logging initialized");
        }
    });
}

/// Build the filter `init_logging` would install
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
