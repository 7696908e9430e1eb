//! Lanai Library
//!
//! This library contains a thread-safe prefix tree over byte-sequence keys and
//! values, together with the configuration, logging, error handling and bulk
//! loading layers used by the `lanai` binary.
//!
//! # Architecture
//!
//! - One coarse reader/writer lock per trie; writers are serialized
//! - Every enumeration returns a fully materialized, unordered `Vec`
//! - Layered configuration (defaults, file, environment)
//! - Explicit error types for everything outside the trie itself

pub mod config;
pub mod data_structures;
pub mod error;
pub mod loader;
pub mod logging;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

