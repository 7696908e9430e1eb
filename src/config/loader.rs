//! Bulk loader configuration module.
//!
//! This module defines how key/value files are parsed and how many writer
//! threads feed them into the trie.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Bulk loader configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Number of writer threads inserting into the trie
    pub writer_threads: usize,

    /// Character separating the key from the value on each line
    pub separator: char,

    /// Maximum accepted line length in bytes
    pub max_line_bytes: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            writer_threads: num_cpus::get(),
            separator: '\t',
            max_line_bytes: 1024 * 1024, // 1 MiB
        }
    }
}

impl Validate for LoaderConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.writer_threads == 0 {
            return Err(ConfigError::ValidationError(
                "writer_threads must be greater than 0".to_string(),
            ));
        }

        if matches!(self.separator, '\n' | '\r') {
            return Err(ConfigError::ValidationError(
                "separator cannot be a line terminator".to_string(),
            ));
        }

        if self.max_line_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "max_line_bytes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
