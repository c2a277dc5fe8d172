//! # Tree Store
//!
//! Sole owner of the edited tree.
//!
//! Every change goes through a [`Mutation`] applied to a working copy; the
//! copy replaces the tree only when the mutation succeeds, and each commit is
//! recorded in the [`History`]. A failed operation therefore never touches
//! the tree or the history.
//!
//! ```text
//! command ──▶ validate ──▶ apply to copy ──▶ commit ──▶ record snapshot
//!                 │               │
//!                 └──── error ────┘   (tree and history untouched)
//! ```
//!
//! The store does no I/O and no locking. A multithreaded host has to
//! serialize access itself.

use crate::history::History;
use crate::mutations::{Mutation, MutationError, MutationResult};
use crate::options::EditorOptions;
use configtree_codec::{deserialize, serialize_with, ParseError, RenderError, TextStyle};
use configtree_common::{Node, NodeKind, Tree};
use tracing::debug;

/// Editable configuration tree with undo/redo
#[derive(Debug, Clone)]
pub struct TreeStore {
    tree: Tree,
    history: History,
    options: EditorOptions,

    /// Bumped on every committed change, including undo, redo and import
    version: u64,
}

impl TreeStore {
    /// Empty store with default options
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    pub fn with_options(options: EditorOptions) -> Self {
        Self::from_tree(Tree::new(), options)
    }

    /// Store whose history starts at `tree`
    pub fn from_tree(tree: Tree, options: EditorOptions) -> Self {
        Self {
            history: History::with_max_entries(tree.clone(), options.history_limit),
            tree,
            options,
            version: 0,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// First node with `key` in pre-order
    pub fn find(&self, key: &str) -> Option<&Node> {
        self.tree.find(key)
    }

    /// Apply a mutation and record the result
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, MutationError> {
        let mut next = self.tree.clone();
        let key = mutation.apply(&mut next)?;

        self.commit(next);
        debug!(
            mutation = mutation.name(),
            key = %key,
            version = self.version,
            "Committed mutation"
        );

        Ok(MutationResult {
            version: self.version,
            key,
        })
    }

    /// Add a node under `parent` (or as a root) and return its key
    pub fn add_node(
        &mut self,
        parent: Option<&str>,
        title: &str,
        kind: NodeKind,
        value: Option<&str>,
    ) -> Result<String, MutationError> {
        let result = self.apply(Mutation::AddNode {
            parent: parent.map(str::to_string),
            title: title.to_string(),
            kind,
            value: value.map(str::to_string),
        })?;
        Ok(result.key)
    }

    pub fn delete_node(&mut self, key: &str) -> Result<(), MutationError> {
        self.apply(Mutation::DeleteNode {
            key: key.to_string(),
        })?;
        Ok(())
    }

    pub fn rename_node(&mut self, key: &str, title: &str) -> Result<(), MutationError> {
        self.apply(Mutation::RenameNode {
            key: key.to_string(),
            title: title.to_string(),
        })?;
        Ok(())
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), MutationError> {
        self.apply(Mutation::SetValue {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        Ok(())
    }

    /// Move `key` to the end of `dest`'s children and return its new key
    pub fn move_node(&mut self, key: &str, dest: &str) -> Result<String, MutationError> {
        self.move_node_to(key, dest, None)
    }

    /// Move `key` to position `index` (clamped) among `dest`'s children
    pub fn move_node_at(
        &mut self,
        key: &str,
        dest: &str,
        index: usize,
    ) -> Result<String, MutationError> {
        self.move_node_to(key, dest, Some(index))
    }

    fn move_node_to(
        &mut self,
        key: &str,
        dest: &str,
        index: Option<usize>,
    ) -> Result<String, MutationError> {
        let result = self.apply(Mutation::MoveNode {
            key: key.to_string(),
            dest: dest.to_string(),
            index,
        })?;
        Ok(result.key)
    }

    /// Restore the previous snapshot; `false` when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.tree = snapshot.clone();
                self.version += 1;
                debug!(index = self.history.index(), version = self.version, "Undo");
                true
            }
            None => false,
        }
    }

    /// Re-apply the next snapshot; `false` when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.tree = snapshot.clone();
                self.version += 1;
                debug!(index = self.history.index(), version = self.version, "Redo");
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_levels(&self) -> usize {
        self.history.undo_levels()
    }

    pub fn redo_levels(&self) -> usize {
        self.history.redo_levels()
    }

    /// Replace the tree and clear the history
    pub fn reset(&mut self, tree: Tree) {
        self.history.reset(tree.clone());
        self.tree = tree;
        self.version += 1;
        debug!(nodes = self.tree.len(), "Reset tree and history");
    }

    /// Render the tree in the configured style
    pub fn export_text(&self) -> Result<String, RenderError> {
        self.export_text_with(self.options.text_style)
    }

    pub fn export_text_with(&self, style: TextStyle) -> Result<String, RenderError> {
        serialize_with(&self.tree, style)
    }

    /// Replace the tree with the parsed document as one undoable step.
    /// Malformed text leaves the store untouched.
    pub fn import_text(&mut self, text: &str) -> Result<(), ParseError> {
        let tree = deserialize(text)?;
        debug!(nodes = tree.len(), "Imported document");
        self.commit(tree);
        Ok(())
    }

    fn commit(&mut self, tree: Tree) {
        self.history.record(tree.clone());
        self.tree = tree;
        self.version += 1;
    }
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new()
    }
}
