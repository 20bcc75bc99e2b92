//! # Logging Setup
//!
//! Structured logging configuration built on `tracing-subscriber`.
//!
//! The codec itself only emits trace/debug events (key algorithm dispatch,
//! compression ratios); hosting applications call [`init`] once at startup
//! or install their own subscriber instead.

use std::sync::Once;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Install a global subscriber honoring `RUST_LOG`, falling back to the
/// configured level. Safe to call more than once; only the first call
/// installs anything.
pub fn init(config: &LoggingConfig) {
    INIT.call_once(|| {
        let fallback = config.log_level.to_string().to_lowercase();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    });
}

/// Install a default subscriber at INFO level.
pub fn init_default() {
    init(&LoggingConfig {
        log_level: Level::INFO,
        ..LoggingConfig::default()
    });
}
