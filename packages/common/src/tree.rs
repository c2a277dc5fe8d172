//! The edited forest.

use crate::key::KeyAllocator;
use crate::node::Node;
use crate::visitor::{KeyCollector, NodeCounter, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered sequence of root nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    roots: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_roots(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Direct access for the mutation layer; consumers go through the store
    pub fn roots_mut(&mut self) -> &mut Vec<Node> {
        &mut self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        let mut counter = NodeCounter::default();
        counter.visit_tree(self);
        counter.count
    }

    /// First match in pre-order
    pub fn find(&self, key: &str) -> Option<&Node> {
        self.roots.iter().find_map(|root| root.find(key))
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.roots.iter_mut().find_map(|root| root.find_mut(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Parent of `key`, `None` for roots and unknown keys
    pub fn parent_of(&self, key: &str) -> Option<&Node> {
        fn search<'a>(node: &'a Node, key: &str) -> Option<&'a Node> {
            if node.children().iter().any(|child| child.key == key) {
                return Some(node);
            }
            node.children().iter().find_map(|child| search(child, key))
        }

        self.roots.iter().find_map(|root| search(root, key))
    }

    /// True if `key` is `ancestor` or lies in its subtree
    pub fn is_within(&self, ancestor: &str, key: &str) -> bool {
        self.find(ancestor)
            .map(|node| node.contains(key))
            .unwrap_or(false)
    }

    /// Every key in the tree
    pub fn keys(&self) -> HashSet<String> {
        let mut collector = KeyCollector::default();
        collector.visit_tree(self);
        collector.keys
    }

    /// Allocator seeded with the keys currently in use
    pub fn key_allocator(&self) -> KeyAllocator {
        KeyAllocator::with_taken(self.keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKind, ScalarKind};

    fn sample() -> Tree {
        let mut server = Node::new("server", "server", NodeKind::Map, None);
        let mut ports = Node::new("server-ports", "ports", NodeKind::Sequence, None);
        ports.children_mut().unwrap().extend([
            Node::scalar("server-ports-0", "ports-0", ScalarKind::Integer, "80"),
            Node::scalar("server-ports-1", "ports-1", ScalarKind::Integer, "443"),
        ]);
        server.children_mut().unwrap().push(ports);
        let name = Node::scalar("name", "name", ScalarKind::String, "demo");
        Tree::from_roots(vec![server, name])
    }

    #[test]
    fn test_lookup() {
        let tree = sample();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.find("server-ports-1").unwrap().value(), Some("443"));
        assert_eq!(tree.parent_of("server-ports-1").unwrap().key, "server-ports");
        assert!(tree.parent_of("server").is_none());
        assert!(tree.find("nope").is_none());
    }

    #[test]
    fn test_is_within() {
        let tree = sample();
        assert!(tree.is_within("server", "server-ports-0"));
        assert!(tree.is_within("server", "server"));
        assert!(!tree.is_within("server-ports", "server"));
        assert!(!tree.is_within("name", "server"));
    }

    #[test]
    fn test_keys_and_allocator() {
        let tree = sample();
        let keys = tree.keys();
        assert_eq!(keys.len(), 5);
        assert!(keys.contains("server-ports-0"));

        let mut alloc = tree.key_allocator();
        assert_eq!(alloc.allocate(Some("server-ports"), "0"), "server-ports-0#1");
    }
}
