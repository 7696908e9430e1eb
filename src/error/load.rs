//! Bulk load error module.
//!
//! This module defines error types raised while reading key/value files
//! for bulk insertion into the trie.

use thiserror::Error;

/// Errors that can occur while reading a key/value file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// A non-blank line has no key/value separator.
    #[error("Line {line}: missing separator {separator:?}")]
    MissingSeparator {
        /// 1-based line number
        line: usize,
        /// The separator that was expected
        separator: char,
    },

    /// A line exceeds the configured maximum length.
    #[error("Line {line}: {len} bytes exceeds limit of {max}")]
    LineTooLong {
        /// 1-based line number
        line: usize,
        /// Bytes read from the line before it was rejected
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// The underlying reader failed.
    #[error("Read failed: {0}")]
    Io(#[from] std::io::Error),
}
