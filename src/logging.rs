//! Tracing subscriber setup.
//!
//! A full-screen terminal UI owns stdout, so logs go to stderr or to an
//! append-mode file.

use crate::config::LoggingConfig;
use crate::error::UiError;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` overrides the configured level. Returns `Ok(false)` when a
/// subscriber was already installed.
pub fn init(config: &LoggingConfig) -> Result<bool, UiError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|err| UiError::Logging(err.to_string()))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    if installed.is_err() {
        return Ok(false);
    }
    tracing::info!(level = %config.level, file = ?config.file, "logging initialised");
    Ok(true)
}
