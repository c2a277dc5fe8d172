//! # Undo/Redo History
//!
//! Linear history of full tree snapshots.
//!
//! ## Design
//!
//! - Every committed change records a deep copy of the whole tree
//! - The entry at `index` is always the current tree
//! - Undo and redo only move `index`; entries are never edited once recorded
//! - Recording after an undo discards every entry past `index`
//! - The oldest entries are dropped once `max_entries` is exceeded
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(Tree::new());
//!
//! history.record(tree_after_edit.clone());
//!
//! let previous = history.undo();   // Some(&empty tree)
//! let again = history.redo();      // Some(&tree_after_edit)
//! ```

use configtree_common::Tree;

/// Default number of snapshots kept (0 = unlimited, cleared only by `reset`)
pub const DEFAULT_HISTORY_LIMIT: usize = 0;

/// Undo/redo history of tree snapshots
#[derive(Debug, Clone)]
pub struct History {
    /// Snapshots, oldest first
    entries: Vec<Tree>,

    /// Position of the current tree in `entries`
    index: usize,

    /// Maximum number of snapshots (0 = unlimited)
    max_entries: usize,
}

impl History {
    /// Start a history whose only entry is `initial`
    pub fn new(initial: Tree) -> Self {
        Self::with_max_entries(initial, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_entries(initial: Tree, max_entries: usize) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            max_entries,
        }
    }

    /// Truncate the redo branch, append `snapshot`, and make it current
    pub fn record(&mut self, snapshot: Tree) {
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);

        // Trim if exceeded max entries
        if self.max_entries > 0 && self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }

        self.index = self.entries.len() - 1;
    }

    /// Step back; `None` when already at the oldest entry
    pub fn undo(&mut self) -> Option<&Tree> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Step forward; `None` when already at the newest entry
    pub fn redo(&mut self) -> Option<&Tree> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    /// Drop every entry and restart from `initial`
    pub fn reset(&mut self, initial: Tree) {
        self.entries.clear();
        self.entries.push(initial);
        self.index = 0;
    }

    pub fn current(&self) -> &Tree {
        &self.entries[self.index]
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of undo steps available
    pub fn undo_levels(&self) -> usize {
        self.index
    }

    /// Number of redo steps available
    pub fn redo_levels(&self) -> usize {
        self.entries.len() - 1 - self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Tree::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configtree_common::{Node, ScalarKind};

    fn tree_with(value: &str) -> Tree {
        Tree::from_roots(vec![Node::scalar("v", "v", ScalarKind::String, value)])
    }

    #[test]
    fn test_history_creation() {
        let history = History::default();
        assert_eq!(history.len(), 1);
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.current().is_empty());
    }

    #[test]
    fn test_record_undo_redo() {
        let mut history = History::default();
        history.record(tree_with("1"));
        history.record(tree_with("2"));

        assert_eq!(history.undo(), Some(&tree_with("1")));
        assert_eq!(history.undo(), Some(&Tree::new()));
        assert_eq!(history.undo(), None);
        assert_eq!(history.index(), 0);

        assert_eq!(history.redo(), Some(&tree_with("1")));
        assert_eq!(history.redo(), Some(&tree_with("2")));
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), &tree_with("2"));
    }

    #[test]
    fn test_new_record_clears_redo() {
        let mut history = History::default();
        history.record(tree_with("1"));
        history.record(tree_with("2"));
        history.undo();

        assert_eq!(history.redo_levels(), 1);

        history.record(tree_with("3"));
        assert_eq!(history.redo_levels(), 0);
        assert_eq!(history.redo(), None);
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), &tree_with("3"));
    }

    #[test]
    fn test_max_entries_enforced() {
        let mut history = History::with_max_entries(Tree::new(), 3);
        for i in 0..5 {
            history.record(tree_with(&i.to_string()));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(history.current(), &tree_with("4"));
        assert_eq!(history.undo(), Some(&tree_with("3")));
        assert_eq!(history.undo(), Some(&tree_with("2")));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_unlimited_history() {
        let mut history = History::with_max_entries(Tree::new(), 0);
        for i in 0..250 {
            history.record(tree_with(&i.to_string()));
        }
        assert_eq!(history.len(), 251);
    }

    #[test]
    fn test_default_history_is_unbounded() {
        let mut history = History::default();
        for i in 0..150 {
            history.record(tree_with(&i.to_string()));
        }

        assert_eq!(history.undo_levels(), 150);
        while history.undo().is_some() {}
        assert!(history.current().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut history = History::default();
        history.record(tree_with("1"));
        history.reset(tree_with("fresh"));

        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert_eq!(history.current(), &tree_with("fresh"));
    }
}
