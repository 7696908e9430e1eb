//! Logging initialisation.
//!
//! `RUST_LOG` takes precedence; otherwise the level from [`LogConfig`] is used.

use crate::config::LogConfig;
use crate::error::{LanaiError, LanaiResult};
use tracing_subscriber::EnvFilter;

/// Builds the env filter for `config`.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize the global tracing subscriber.
pub fn init(config: &LogConfig) -> LanaiResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_line_number(config.source_location)
        .with_file(config.source_location)
        .with_thread_names(true)
        .with_writer(std::io::stderr);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };

    result.map_err(|e| LanaiError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}
