//! Shared start-up for the compliance binaries: logging and settings.
use anyhow::Result;
use tracing_subscriber::EnvFilter;

use compliance_core::config::{Config, Settings};

pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug,lance=info,lancedb=info" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_target(false)
        .init();
}

/// `config.toml` + `config.<RUST_ENV>.toml` + `APP_*` overrides.
pub fn load_settings() -> Result<Settings> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    config.settings()
}
