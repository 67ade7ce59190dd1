//! Diagnostic logging bootstrap.
//!
//! The core only emits `tracing` events; the binary installs a subscriber
//! here. Output goes to stderr so it never interleaves with command output
//! on stdout.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Logging was already initialized")]
    AlreadyInitialized,
}

pub fn parse_filter(filter: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(filter).map_err(|source| LoggingError::InvalidFilter {
        filter: filter.to_string(),
        source,
    })
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(filter: &str) -> Result<(), LoggingError> {
    let env_filter = parse_filter(filter)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    tracing::debug!(filter, version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Ok(())
}
