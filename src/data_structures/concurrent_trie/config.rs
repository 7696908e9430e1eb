// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for the concurrent trie.

use serde::{Deserialize, Serialize};

/// How the trie treats a zero-length key.
///
/// An empty key walks no edges, so storing it means writing the root's own
/// value slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyKeyPolicy {
    /// `insert` with an empty key is a no-op and `search` never finds it.
    #[default]
    Ignore,

    /// The empty key is stored on the root, counted in `size`, found by
    /// `search`, and reported by the full enumerations. Prefix enumerations
    /// never report it.
    Store,
}

/// Configuration options for the concurrent trie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieConfig {
    /// Treatment of zero-length keys
    pub empty_key: EmptyKeyPolicy,
}

impl TrieConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the empty key policy.
    pub fn with_empty_key(mut self, policy: EmptyKeyPolicy) -> Self {
        self.empty_key = policy;
        self
    }
}
