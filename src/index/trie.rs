//! Prefix trie over literal path components
//!
//! Holds only fully static routes so an exact path resolves in O(k) where k
//! is the path depth, independent of how many routes are registered.
//!
//! ## Implementation Details
//!
//! - Each node owns its children, keyed by the literal component
//! - Routes are stored at the node where their path ends
//! - Insertion recurses into owned children, so there is no aliasing while
//!   the tree is built
//!
//! ## Example
//!
//! ```text
//! /api/users, /api/users/me, /health
//!
//! (root)
//! ├── api
//! │   └── users      [/api/users]
//! │       └── me     [/api/users/me]
//! └── health         [/health]
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::RouteRef;

/// Node in the prefix trie
#[derive(Debug, Default)]
struct TrieNode {
    /// Routes whose path ends at this node, sorted by descending priority
    routes: Vec<RouteRef>,
    /// Child nodes keyed by the next literal component
    children: HashMap<Arc<str>, TrieNode>,
}

impl TrieNode {
    fn insert(&mut self, components: &[&str], route: RouteRef) {
        match components.split_first() {
            None => self.routes.push(route),
            Some((head, rest)) => self
                .children
                .entry(Arc::from(*head))
                .or_default()
                .insert(rest, route),
        }
    }

    fn find(&self, components: &[&str]) -> Option<&TrieNode> {
        let mut node = self;
        for component in components {
            node = node.children.get(*component)?;
        }
        Some(node)
    }

    fn sort_by_priority(&mut self) {
        self.routes
            .sort_by(|a, b| b.route.priority.cmp(&a.route.priority));
        for child in self.children.values_mut() {
            child.sort_by_priority();
        }
    }

    fn depth(&self) -> usize {
        self.children
            .values()
            .map(|c| 1 + c.depth())
            .max()
            .unwrap_or(0)
    }

    fn node_count(&self) -> usize {
        1 + self.children.values().map(TrieNode::node_count).sum::<usize>()
    }
}

/// Trie of fully static routes for exact O(depth) lookup.
#[derive(Debug, Default)]
pub struct PrefixTrie {
    root: TrieNode,
    len: usize,
}

impl PrefixTrie {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully static route. Routes with any non-static segment are
    /// ignored and `false` is returned.
    pub fn insert(&mut self, route: RouteRef) -> bool {
        let source = Arc::clone(&route);
        let components: Option<Vec<&str>> = source
            .route
            .pattern
            .iter()
            .map(|s| s.literal_text())
            .collect();
        let Some(components) = components else {
            return false;
        };
        self.root.insert(&components, route);
        self.len += 1;
        true
    }

    pub(crate) fn finish(&mut self) {
        self.root.sort_by_priority();
    }

    /// Routes attached to the node reached by walking `components` exactly.
    #[must_use]
    pub fn lookup(&self, components: &[&str]) -> &[RouteRef] {
        self.root
            .find(components)
            .map(|n| n.routes.as_slice())
            .unwrap_or(&[])
    }

    /// Number of routes stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Longest root-to-leaf edge count.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Node count including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}
