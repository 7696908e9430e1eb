//! Data structures for Lanai.
//!
//! This module contains the concurrent prefix tree at the heart of the crate.
//! Implementations adhere to the project requirements:
//! - No unsafe code
//! - A single coarse reader/writer lock per structure
//! - Fully materialized results from every enumeration

pub mod concurrent_trie;

// Re-export common data structures
pub use concurrent_trie::{ConcurrentTrie, EmptyKeyPolicy, TrieConfig};
