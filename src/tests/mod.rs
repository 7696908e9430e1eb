//! Test modules for Lanai.
//!
//! This module contains crate-internal tests that cut across modules:
//! - Configuration loading and validation
//! - Error types and reporting
//! - Property-based tests of the trie against a reference map
//! - Shared strategies and fixtures

pub mod test_utils;

pub use test_utils::{entries_strategy, key_strategy, value_strategy, TestFixture};
