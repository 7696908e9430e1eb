// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the concurrent trie.
//!
//! Each node stands for one byte position of some inserted key. Children are
//! owned exclusively by their parent, so the whole structure is a strict tree.

use fnv::FnvHashMap;

/// A node in the concurrent trie.
#[derive(Debug, Default)]
pub struct TrieNode {
    /// Byte this node represents. Meaningless for the root.
    pub symbol: u8,

    /// Map of bytes to child nodes
    pub children: FnvHashMap<u8, Box<TrieNode>>,

    /// Value stored for the key ending here, if any
    pub value: Option<Vec<u8>>,
}

impl TrieNode {
    /// Creates the root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a node for `symbol` with no children and no value.
    pub fn new(symbol: u8) -> Self {
        Self {
            symbol,
            children: FnvHashMap::default(),
            value: None,
        }
    }

    /// Returns the child for `symbol`, creating it if missing.
    pub fn child_or_insert(&mut self, symbol: u8) -> &mut TrieNode {
        self.children
            .entry(symbol)
            .or_insert_with(|| Box::new(TrieNode::new(symbol)))
    }

    /// Returns the child for `symbol`, if present.
    pub fn child(&self, symbol: u8) -> Option<&TrieNode> {
        self.children.get(&symbol).map(Box::as_ref)
    }

    /// Whether a key terminates at this node.
    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    /// Identity of this node, used by the traversals' visited sets.
    pub(crate) fn id(&self) -> usize {
        self as *const TrieNode as usize
    }
}

impl Drop for TrieNode {
    /// Frees descendants from an explicit stack so a long key cannot exhaust
    /// the thread stack.
    fn drop(&mut self) {
        let mut stack: Vec<Box<TrieNode>> = self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}
