//! Test utilities and fixtures for Lanai.
//!
//! This module provides reusable strategies for property-based tests and a
//! fixture for tests that need files or environment variables.

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use std::collections::HashMap;
use tempfile::TempDir;

/// Maximum key length for generated test data.
const MAX_KEY_LENGTH: usize = 12;

/// Maximum number of entries in a generated map.
const MAX_ENTRIES: usize = 64;

/// Create a temporary directory for test files.
pub fn create_test_dir() -> std::io::Result<TempDir> {
    tempfile::tempdir()
}

/// Strategy for a single key byte.
///
/// Mostly drawn from a small set so generated keys share prefixes and
/// exercise internal nodes that are also terminals. The set holds `0x00` and
/// bytes that are not valid UTF-8; any other byte shows up occasionally.
pub fn key_byte_strategy() -> BoxedStrategy<u8> {
    prop_oneof![
        4 => prop::sample::select(vec![b'a', b'b', 0x00, 0x80, 0xFF]),
        1 => any::<u8>(),
    ]
    .boxed()
}

/// Strategy for non-empty binary keys.
pub fn key_strategy() -> BoxedStrategy<Vec<u8>> {
    proptest::collection::vec(key_byte_strategy(), 1..MAX_KEY_LENGTH).boxed()
}

/// Strategy for arbitrary values, including the empty value.
pub fn value_strategy() -> BoxedStrategy<Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..8).boxed()
}

/// Strategy for a map of distinct keys to values.
pub fn entries_strategy() -> BoxedStrategy<HashMap<Vec<u8>, Vec<u8>>> {
    proptest::collection::hash_map(key_strategy(), value_strategy(), 0..MAX_ENTRIES).boxed()
}

/// Test fixture for tests requiring files or environment variables.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
    /// Environment variables to clean up after tests
    env_vars: Vec<String>,
}

impl TestFixture {
    /// Create a new test fixture.
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = create_test_dir()?;
        Ok(Self {
            temp_dir,
            env_vars: Vec::new(),
        })
    }

    /// Set an environment variable for this test.
    ///
    /// The variable will be cleaned up when the fixture is dropped.
    pub fn set_env<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key_str = key.into();
        std::env::set_var(&key_str, value.into());
        self.env_vars.push(key_str);
    }

    /// Create a file within the fixture directory.
    ///
    /// The file lives until the fixture is dropped.
    pub fn create_file<C: AsRef<[u8]>>(
        &self,
        contents: C,
        extension: &str,
    ) -> std::io::Result<std::path::PathBuf> {
        let mut file = tempfile::Builder::new()
            .suffix(extension)
            .tempfile_in(&self.temp_dir)?;
        std::io::Write::write_all(&mut file, contents.as_ref())?;
        file.into_temp_path().keep().map_err(|e| e.error)
    }
}

impl Drop for TestFixture {
    fn drop(&mut self) {
        for key in &self.env_vars {
            std::env::remove_var(key);
        }
    }
}
