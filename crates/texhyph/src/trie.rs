//! Arena trie keyed by code point.
//!
//! Each stored pattern key is a path from the root; the node at the end of the path
//! carries the pattern's weights. Walking a query suffix from the root visits every
//! stored key that is a prefix of that suffix, shortest first.

use rustc_hash::FxHashMap;

use crate::pattern::{Pattern, Weights};

// ---------------------------------------------------------------------------
// Trie
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: FxHashMap<char, u32>,
    /// Set when a pattern key ends at this node.
    weights: Option<Weights>,
}

/// Pattern storage supporting "every key that prefixes this suffix" queries.
#[derive(Debug, Clone)]
pub struct PatternTrie {
    nodes: Vec<TrieNode>,
    len: usize,
}

impl Default for PatternTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternTrie {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            len: 0,
        }
    }

    /// Number of distinct keys stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `pattern`, replacing the weights of an identical key.
    ///
    /// Returns `true` when the key was not present before.
    pub fn insert(&mut self, pattern: Pattern) -> bool {
        let mut node_idx = 0usize;
        for ch in pattern.key.chars() {
            node_idx = match self.nodes[node_idx].children.get(&ch) {
                Some(&next) => next as usize,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node_idx].children.insert(ch, next as u32);
                    next
                }
            };
        }
        let fresh = self.nodes[node_idx].weights.replace(pattern.weights).is_none();
        if fresh {
            self.len += 1;
        }
        fresh
    }

    /// Exact lookup of one key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        let mut node_idx = 0usize;
        for ch in key.chars() {
            node_idx = *self.nodes[node_idx].children.get(&ch)? as usize;
        }
        self.nodes[node_idx].weights.as_deref()
    }

    /// Every stored key that is a prefix of `query`, as `(key_len, weights)` pairs.
    #[must_use]
    pub fn prefix_matches<'a>(&'a self, query: &'a [char]) -> PrefixMatches<'a> {
        PrefixMatches {
            trie: self,
            query,
            depth: 0,
            node_idx: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Prefix matching
// ---------------------------------------------------------------------------

/// Iterator returned by [`PatternTrie::prefix_matches`].
#[derive(Debug, Clone)]
pub struct PrefixMatches<'a> {
    trie: &'a PatternTrie,
    query: &'a [char],
    depth: usize,
    node_idx: usize,
}

impl<'a> Iterator for PrefixMatches<'a> {
    type Item = (usize, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ch) = self.query.get(self.depth) {
            let Some(&next) = self.trie.nodes[self.node_idx].children.get(ch) else {
                self.depth = self.query.len();
                return None;
            };
            self.node_idx = next as usize;
            self.depth += 1;
            if let Some(weights) = self.trie.nodes[self.node_idx].weights.as_deref() {
                return Some((self.depth, weights));
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
