// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Traversal algorithms for the concurrent trie.
//!
//! All functions here operate on a borrowed root and expect the caller to hold
//! the trie's read lock for as long as they run. They use explicit stacks and
//! queues rather than recursion so that very long keys cannot exhaust the
//! thread stack.
//!
//! Every traversal keeps a visited set keyed by node identity. The tree never
//! shares a node between two parents, so the set never rejects anything today;
//! it stays so that a future layout with shared suffixes cannot double-report.

use std::collections::VecDeque;

use fnv::FnvHashSet;

use super::node::TrieNode;

/// Depth-first walk over the whole tree, returning every stored key.
///
/// The root contributes no symbol, so a value stored on the root itself is
/// reported as the empty key.
pub(crate) fn all_keys(root: &TrieNode, capacity: usize) -> Vec<Vec<u8>> {
    let mut keys = Vec::with_capacity(capacity);
    let mut visited = FnvHashSet::default();
    let mut path: Vec<u8> = Vec::new();

    // (node, number of symbols on the path up to and including this node)
    let mut stack: Vec<(&TrieNode, usize)> = vec![(root, 0)];

    while let Some((node, depth)) = stack.pop() {
        if !visited.insert(node.id()) {
            continue;
        }

        path.truncate(depth.saturating_sub(1));
        if depth > 0 {
            path.push(node.symbol);
        }

        if node.is_terminal() {
            keys.push(path.clone());
        }

        for child in node.children.values().map(Box::as_ref) {
            if !visited.contains(&child.id()) {
                stack.push((child, depth + 1));
            }
        }
    }

    keys
}

/// Breadth-first walk over the whole tree, returning every stored value.
pub(crate) fn all_values(root: &TrieNode, capacity: usize) -> Vec<Vec<u8>> {
    let mut values = Vec::with_capacity(capacity);
    let mut visited = FnvHashSet::default();
    let mut queue: VecDeque<&TrieNode> = VecDeque::new();

    queue.push_back(root);
    while let Some(node) = queue.pop_front() {
        if !visited.insert(node.id()) {
            continue;
        }

        for child in node.children.values().map(Box::as_ref) {
            if !visited.contains(&child.id()) {
                queue.push_back(child);
            }
        }

        if let Some(value) = &node.value {
            values.push(value.clone());
        }
    }

    values
}

/// Returns every stored key that starts with `prefix`.
pub(crate) fn prefix_keys(root: &TrieNode, prefix: &[u8]) -> Vec<Vec<u8>> {
    let mut keys = Vec::new();
    walk_prefix(root, prefix, |path, node| {
        if node.is_terminal() {
            keys.push(path.to_vec());
        }
    });
    keys
}

/// Returns the values of every stored key that starts with `prefix`.
pub(crate) fn prefix_values(root: &TrieNode, prefix: &[u8]) -> Vec<Vec<u8>> {
    let mut values = Vec::new();
    walk_prefix(root, prefix, |_, node| {
        if let Some(value) = &node.value {
            values.push(value.clone());
        }
    });
    values
}

/// Depth-first walk restricted by `prefix`.
///
/// The walk starts at the root's child for `prefix[0]`. While the cursor is
/// still inside the prefix, a node is only entered if its symbol equals
/// `prefix[cursor]`; once the whole prefix has been matched along a branch the
/// cursor stays clamped at `prefix.len()` and the rest of that subtree is
/// visited unconditionally. `visit` receives the full key path of each entered
/// node. An empty prefix matches nothing.
fn walk_prefix<'a, F>(root: &'a TrieNode, prefix: &[u8], mut visit: F)
where
    F: FnMut(&[u8], &'a TrieNode),
{
    let Some(&first) = prefix.first() else {
        return;
    };
    let Some(start) = root.child(first) else {
        return;
    };

    let mut visited = FnvHashSet::default();
    let mut path: Vec<u8> = Vec::with_capacity(prefix.len());

    // (node, prefix cursor, path length including this node)
    let mut stack: Vec<(&TrieNode, usize, usize)> = vec![(start, 0, 1)];

    while let Some((node, cursor, depth)) = stack.pop() {
        if cursor < prefix.len() && node.symbol != prefix[cursor] {
            continue;
        }
        if !visited.insert(node.id()) {
            continue;
        }

        path.truncate(depth - 1);
        path.push(node.symbol);
        visit(path.as_slice(), node);

        let next = (cursor + 1).min(prefix.len());
        for child in node.children.values().map(Box::as_ref) {
            if !visited.contains(&child.id()) {
                stack.push((child, next, depth + 1));
            }
        }
    }
}
