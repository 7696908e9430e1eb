// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Concurrent byte-keyed prefix tree.
//!
//! A trie keyed by opaque byte sequences, with exact lookup, full enumeration,
//! and prefix-bounded enumeration of keys and values. One reader/writer lock
//! guards the whole structure: writers are fully serialized and readers see
//! either the tree before an insert or the tree after it, never in between.
//!
//! # Example
//!
//! ```
//! use lanai_lib::data_structures::ConcurrentTrie;
//!
//! let trie = ConcurrentTrie::new();
//! trie.insert("bad", "1");
//! trie.insert("badly", "2");
//! trie.insert("box", "3");
//!
//! assert_eq!(trie.search("bad"), (b"1".to_vec(), true));
//! assert_eq!(trie.search("ba"), (Vec::new(), false));
//! assert_eq!(trie.get_prefix_keys("bad").len(), 2);
//!
//! // `size` carries a fixed offset of one; `len` is the key count.
//! assert_eq!(trie.size(), 4);
//! assert_eq!(trie.len(), 3);
//! ```

mod config;
mod node;
mod traverse;

use parking_lot::RwLock;
use tracing::{debug, trace};

pub use self::config::{EmptyKeyPolicy, TrieConfig};
use node::TrieNode;

/// Value of `size()` for a trie holding no keys.
pub const INITIAL_SIZE: usize = 1;

/// Everything the lock guards.
#[derive(Debug)]
struct TrieState {
    root: TrieNode,
    size: usize,
}

impl TrieState {
    fn new() -> Self {
        Self {
            root: TrieNode::root(),
            size: INITIAL_SIZE,
        }
    }

    /// Walks `key`, creating missing nodes, and stores `value` at the end.
    fn insert(&mut self, key: &[u8], value: Vec<u8>) -> bool {
        let mut node = &mut self.root;
        for &symbol in key {
            node = node.child_or_insert(symbol);
        }

        let is_new = !node.is_terminal();
        if is_new {
            self.size += 1;
        }
        node.value = Some(value);
        is_new
    }

    /// Returns the node at the end of `key`'s path, terminal or not.
    fn find(&self, key: &[u8]) -> Option<&TrieNode> {
        let mut node = &self.root;
        for &symbol in key {
            node = node.child(symbol)?;
        }
        Some(node)
    }
}

/// Thread-safe prefix tree over byte-sequence keys and values.
///
/// Key features:
/// * Exact lookup with `search`/`get`
/// * Unordered enumeration of all keys or values
/// * Unordered enumeration of keys or values under a non-empty prefix
/// * A single coarse reader/writer lock; no per-node locking
#[derive(Debug)]
pub struct ConcurrentTrie {
    /// Root, descendants and size counter
    state: RwLock<TrieState>,

    /// Configuration options
    config: TrieConfig,
}

impl ConcurrentTrie {
    /// Creates a new empty trie with default configuration.
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Creates a new empty trie with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the trie.
    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            state: RwLock::new(TrieState::new()),
            config,
        }
    }

    /// Returns the configuration this trie was built with.
    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Returns the size counter.
    ///
    /// The counter starts at [`INITIAL_SIZE`] and grows by one per distinct
    /// stored key, so it is always one more than the number of keys. Use
    /// [`len`](Self::len) for the key count.
    pub fn size(&self) -> usize {
        self.state.read().size
    }

    /// Returns the number of distinct stored keys.
    pub fn len(&self) -> usize {
        self.size() - INITIAL_SIZE
    }

    /// Returns `true` if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a key-value pair, overwriting any previous value for the key.
    ///
    /// Holds the write lock for the whole walk.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert.
    /// * `value` - The value to associate with the key.
    ///
    /// # Returns
    ///
    /// `true` if the key was not stored before, `false` if an existing value
    /// was replaced or the key was dropped by [`EmptyKeyPolicy::Ignore`].
    pub fn insert<K, V>(&self, key: K, value: V) -> bool
    where
        K: AsRef<[u8]>,
        V: Into<Vec<u8>>,
    {
        let key = key.as_ref();
        if !self.accepts(key) {
            return false;
        }

        let is_new = self.state.write().insert(key, value.into());
        trace!(key_len = key.len(), is_new, "Inserted key");
        is_new
    }

    /// Inserts every pair from `pairs` under a single acquisition of the write
    /// lock.
    ///
    /// # Returns
    ///
    /// The number of keys that were not stored before.
    pub fn insert_many<I, K, V>(&self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<[u8]>,
        V: Into<Vec<u8>>,
    {
        let mut state = self.state.write();
        let mut added = 0;
        for (key, value) in pairs {
            let key = key.as_ref();
            if self.accepts(key) && state.insert(key, value.into()) {
                added += 1;
            }
        }
        debug!(added, size = state.size, "Inserted batch");
        added
    }

    /// Retrieves the value stored for `key`.
    ///
    /// A path that exists only as an internal segment of longer keys is
    /// reported the same as a path that does not exist.
    pub fn get<K>(&self, key: K) -> Option<Vec<u8>>
    where
        K: AsRef<[u8]>,
    {
        let state = self.state.read();
        state
            .find(key.as_ref())
            .and_then(|node| node.value.clone())
    }

    /// Looks up `key`, returning its value and whether it was found.
    ///
    /// A miss returns an empty value and `false`.
    pub fn search<K>(&self, key: K) -> (Vec<u8>, bool)
    where
        K: AsRef<[u8]>,
    {
        match self.get(key) {
            Some(value) => (value, true),
            None => (Vec::new(), false),
        }
    }

    /// Checks if `key` is stored.
    pub fn contains<K>(&self, key: K) -> bool
    where
        K: AsRef<[u8]>,
    {
        let state = self.state.read();
        state
            .find(key.as_ref())
            .is_some_and(TrieNode::is_terminal)
    }

    /// Returns every stored key, in no particular order.
    pub fn get_all_keys(&self) -> Vec<Vec<u8>> {
        let state = self.state.read();
        traverse::all_keys(&state.root, state.size - INITIAL_SIZE)
    }

    /// Returns every stored value, in no particular order.
    pub fn get_all_values(&self) -> Vec<Vec<u8>> {
        let state = self.state.read();
        traverse::all_values(&state.root, state.size - INITIAL_SIZE)
    }

    /// Returns every stored key starting with `prefix`, in no particular order.
    ///
    /// An empty prefix matches nothing; use [`get_all_keys`](Self::get_all_keys)
    /// to list everything.
    pub fn get_prefix_keys<P>(&self, prefix: P) -> Vec<Vec<u8>>
    where
        P: AsRef<[u8]>,
    {
        let prefix = prefix.as_ref();
        if prefix.is_empty() {
            return Vec::new();
        }

        let state = self.state.read();
        traverse::prefix_keys(&state.root, prefix)
    }

    /// Returns the values of every stored key starting with `prefix`, in no
    /// particular order.
    ///
    /// An empty prefix matches nothing.
    pub fn get_prefix_values<P>(&self, prefix: P) -> Vec<Vec<u8>>
    where
        P: AsRef<[u8]>,
    {
        let prefix = prefix.as_ref();
        if prefix.is_empty() {
            return Vec::new();
        }

        let state = self.state.read();
        traverse::prefix_values(&state.root, prefix)
    }

    fn accepts(&self, key: &[u8]) -> bool {
        if key.is_empty() && self.config.empty_key == EmptyKeyPolicy::Ignore {
            debug!("Ignoring insert of empty key");
            return false;
        }
        true
    }
}

impl Default for ConcurrentTrie {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects pairs into a trie with the default [`TrieConfig`], so an empty
/// key is dropped under [`EmptyKeyPolicy::Ignore`]. Build with
/// [`ConcurrentTrie::with_config`] and [`Extend`] to keep it.
impl<K, V> FromIterator<(K, V)> for ConcurrentTrie
where
    K: AsRef<[u8]>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let trie = Self::new();
        trie.insert_many(iter);
        trie
    }
}

impl<K, V> Extend<(K, V)> for ConcurrentTrie
where
    K: AsRef<[u8]>,
    V: Into<Vec<u8>>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.insert_many(iter);
    }
}
