use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{keys, ConfigStore};

/// Installs the global `tracing` subscriber for a test run.
///
/// Filtering comes from `RUST_LOG`, defaulting to `info`. Safe to call from
/// every test binary; installations after the first are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs the effective configuration at suite start.
///
/// Credential values are redacted; everything else is printed as stored.
pub fn log_config_summary(config: &ConfigStore) {
    info!("test configuration:");
    for (key, value) in config.snapshot() {
        if key == keys::TEST_PASSWORD {
            info!("- {key}: <redacted>");
        } else {
            info!("- {key}: {value}");
        }
    }
}
