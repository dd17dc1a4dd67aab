//! Logging setup for the storefront.
//!
//! This crate provides:
//! - `LogLevel` / `LogFormat` / `LogConfig` - the `[logging]` settings section
//! - `init_logging` - installs the global `tracing` subscriber

mod logging;

pub use logging::*;

use thiserror::Error;

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),

    /// Unknown level name.
    #[error("unknown log level: {0}")]
    InvalidLevel(String),
}
