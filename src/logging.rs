//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI while the countdown runs, so log output can
//! only go to a file. Without `--log-file` no subscriber is installed and the
//! `tracing` macros compile down to cheap no-ops.

use crate::config::Config;
use crate::error::{CountdownError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter directive for `config`, unless `RUST_LOG` overrides it.
pub fn filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("countdown_rings={}", config.log_level())))
}

/// Installs the global subscriber. Returns whether one was installed.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| CountdownError::LogFile {
            path: path.clone(),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(true)
}
