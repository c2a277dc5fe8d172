//! # Key Addressing
//!
//! Every node key is its parent's key plus a separator plus a local
//! discriminator (the title under a map or at the root, the position under a
//! sequence). Discriminators are escaped so that two different
//! (parent, discriminator) pairs never produce the same key.
//!
//! A derived key can still be taken when an earlier node kept its key across a
//! rename or a sibling was deleted. [`KeyAllocator`] resolves that by appending
//! `#n` with the smallest free `n`.

use crate::node::{Node, NodeKind};
use std::borrow::Cow;
use std::collections::HashSet;

pub const KEY_SEPARATOR: char = '-';

const SUFFIX_MARKER: char = '#';

/// Percent-escape the characters that carry structure inside a key
pub fn escape_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains(['%', KEY_SEPARATOR, SUFFIX_MARKER]) {
        return Cow::Borrowed(segment);
    }

    let mut escaped = String::with_capacity(segment.len() + 4);
    for ch in segment.chars() {
        match ch {
            '%' => escaped.push_str("%25"),
            KEY_SEPARATOR => escaped.push_str("%2D"),
            SUFFIX_MARKER => escaped.push_str("%23"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// Key of a root node
pub fn root_key(discriminator: &str) -> String {
    escape_segment(discriminator).into_owned()
}

/// Key of a child of `parent_key`
pub fn derive_child_key(parent_key: &str, discriminator: &str) -> String {
    let segment = escape_segment(discriminator);
    let mut key = String::with_capacity(parent_key.len() + 1 + segment.len());
    key.push_str(parent_key);
    key.push(KEY_SEPARATOR);
    key.push_str(&segment);
    key
}

/// Local discriminator of the child at `index` titled `title` under a parent
/// of kind `parent`; `None` means the child is a root.
pub fn discriminator(parent: Option<NodeKind>, index: usize, title: &str) -> Cow<'_, str> {
    match parent {
        Some(NodeKind::Sequence) => Cow::Owned(index.to_string()),
        _ => Cow::Borrowed(title),
    }
}

/// Hands out keys that are unique within one tree
#[derive(Debug, Default, Clone)]
pub struct KeyAllocator {
    taken: HashSet<String>,
}

impl KeyAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from keys already in use
    pub fn with_taken(taken: HashSet<String>) -> Self {
        Self { taken }
    }

    pub fn is_taken(&self, key: &str) -> bool {
        self.taken.contains(key)
    }

    /// Reserve and return a free key for a node under `parent_key`
    /// (or at the root when `None`)
    pub fn allocate(&mut self, parent_key: Option<&str>, discriminator: &str) -> String {
        let base = match parent_key {
            Some(parent) => derive_child_key(parent, discriminator),
            None => root_key(discriminator),
        };

        let mut key = base.clone();
        let mut n = 1;
        while self.taken.contains(&key) {
            key = format!("{base}{SUFFIX_MARKER}{n}");
            n += 1;
        }

        self.taken.insert(key.clone());
        key
    }

    /// Give `node` the key `key` and re-derive every key below it
    pub fn rekey(&mut self, node: &mut Node, key: String) {
        node.key = key;
        let kind = node.kind();
        let parent_key = node.key.clone();

        if let Some(children) = node.children_mut() {
            for (index, child) in children.iter_mut().enumerate() {
                let disc = discriminator(Some(kind), index, &child.title).into_owned();
                let child_key = self.allocate(Some(&parent_key), &disc);
                self.rekey(child, child_key);
            }
        }
    }
}
