//! # Tree Mutations
//!
//! Structural operations on a configuration tree.
//!
//! ## Semantics
//!
//! ### AddNode
//! - Without a parent (or on an empty tree) the node becomes a new root
//! - Otherwise the parent must be a sequence or a map
//! - Map children need a title no sibling already uses
//!
//! ### DeleteNode
//! - Removes the node and all descendants
//!
//! ### MoveNode
//! - Reparents a whole subtree under a sequence or map
//! - Fails if the destination lies inside the moved subtree
//! - Every key in the moved subtree is re-derived from the new parent
//!
//! Validation runs before anything is touched; callers that need atomicity
//! across the whole operation apply to a working copy (see `TreeStore`).

use configtree_common::{discriminator, Node, NodeBody, NodeKind, Tree};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural mutation of a tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a node under `parent`, or as a new root
    AddNode {
        parent: Option<String>,
        title: String,
        kind: NodeKind,
        value: Option<String>,
    },

    /// Remove a node and its subtree
    DeleteNode { key: String },

    /// Change the title (map key or label) of a node
    RenameNode { key: String, title: String },

    /// Replace the raw value of a scalar node
    SetValue { key: String, value: String },

    /// Reparent a subtree, appending unless `index` is given
    MoveNode {
        key: String,
        dest: String,
        index: Option<usize>,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NotFound(String),

    #[error("Invalid parent: {0} is missing or is not a sequence or map")]
    InvalidParent(String),

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Key must not be empty")]
    EmptyKey,

    #[error("Node {0} is a container and cannot hold a value")]
    TypeMismatch(String),

    #[error("Cannot move {node} under {dest}: destination is inside the moved subtree")]
    Cycle { node: String, dest: String },

    #[error("Map {parent} already has a child titled {title:?}")]
    DuplicateTitle { parent: String, title: String },
}

impl Mutation {
    /// Debug name of the mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddNode { .. } => "add",
            Mutation::DeleteNode { .. } => "delete",
            Mutation::RenameNode { .. } => "rename",
            Mutation::SetValue { .. } => "set-value",
            Mutation::MoveNode { .. } => "move",
        }
    }

    /// Apply mutation with validation, returning the key of the affected
    /// node (the new key for adds and moves)
    pub fn apply(&self, tree: &mut Tree) -> Result<String, MutationError> {
        // Validate first
        self.validate(tree)?;

        match self {
            Mutation::AddNode {
                parent,
                title,
                kind,
                value,
            } => Self::apply_add(tree, parent.as_deref(), title, *kind, value.clone()),

            Mutation::DeleteNode { key } => Self::apply_delete(tree, key),

            Mutation::RenameNode { key, title } => Self::apply_rename(tree, key, title),

            Mutation::SetValue { key, value } => Self::apply_set_value(tree, key, value),

            Mutation::MoveNode { key, dest, index } => Self::apply_move(tree, key, dest, *index),
        }
    }

    fn apply_add(
        tree: &mut Tree,
        parent: Option<&str>,
        title: &str,
        kind: NodeKind,
        value: Option<String>,
    ) -> Result<String, MutationError> {
        let mut keys = tree.key_allocator();

        match parent.filter(|_| !tree.is_empty()) {
            None => {
                let key = keys.allocate(None, title);
                tree.roots_mut().push(Node::new(key.clone(), title, kind, value));
                Ok(key)
            }
            Some(parent_key) => {
                let parent = tree
                    .find_mut(parent_key)
                    .ok_or_else(|| MutationError::InvalidParent(parent_key.to_string()))?;
                let parent_kind = parent.kind();
                let children = parent
                    .children_mut()
                    .ok_or_else(|| MutationError::InvalidParent(parent_key.to_string()))?;

                let disc = discriminator(Some(parent_kind), children.len(), title);
                let key = keys.allocate(Some(parent_key), &disc);
                children.push(Node::new(key.clone(), title, kind, value));
                Ok(key)
            }
        }
    }

    fn apply_delete(tree: &mut Tree, key: &str) -> Result<String, MutationError> {
        Self::detach(tree, key).ok_or_else(|| MutationError::NotFound(key.to_string()))?;
        Ok(key.to_string())
    }

    fn apply_rename(tree: &mut Tree, key: &str, title: &str) -> Result<String, MutationError> {
        let node = tree
            .find_mut(key)
            .ok_or_else(|| MutationError::NotFound(key.to_string()))?;
        node.title = title.to_string();
        Ok(key.to_string())
    }

    fn apply_set_value(
        tree: &mut Tree,
        key: &str,
        new_value: &str,
    ) -> Result<String, MutationError> {
        let node = tree
            .find_mut(key)
            .ok_or_else(|| MutationError::NotFound(key.to_string()))?;

        match &mut node.body {
            NodeBody::Scalar { value, .. } => {
                *value = new_value.to_string();
                Ok(key.to_string())
            }
            _ => Err(MutationError::TypeMismatch(key.to_string())),
        }
    }

    fn apply_move(
        tree: &mut Tree,
        key: &str,
        dest: &str,
        index: Option<usize>,
    ) -> Result<String, MutationError> {
        // Find and remove the node from its current parent
        let mut node =
            Self::detach(tree, key).ok_or_else(|| MutationError::NotFound(key.to_string()))?;

        // Keys of the detached subtree are free again
        let mut keys = tree.key_allocator();

        let parent = tree
            .find_mut(dest)
            .ok_or_else(|| MutationError::InvalidParent(dest.to_string()))?;
        let parent_kind = parent.kind();
        let children = parent
            .children_mut()
            .ok_or_else(|| MutationError::InvalidParent(dest.to_string()))?;

        let position = index.unwrap_or(children.len()).min(children.len());
        let disc = discriminator(Some(parent_kind), position, &node.title).into_owned();
        let new_key = keys.allocate(Some(dest), &disc);
        keys.rekey(&mut node, new_key.clone());
        children.insert(position, node);

        Ok(new_key)
    }

    /// Remove a node from its parent (or the root list) and return it
    fn detach(tree: &mut Tree, key: &str) -> Option<Node> {
        if let Some(pos) = tree.roots().iter().position(|root| root.key == key) {
            return Some(tree.roots_mut().remove(pos));
        }

        tree.roots_mut()
            .iter_mut()
            .find_map(|root| Self::detach_from(root, key))
    }

    fn detach_from(node: &mut Node, key: &str) -> Option<Node> {
        let children = node.children_mut()?;
        if let Some(pos) = children.iter().position(|child| child.key == key) {
            return Some(children.remove(pos));
        }

        children
            .iter_mut()
            .find_map(|child| Self::detach_from(child, key))
    }

    /// Validate without applying
    pub fn validate(&self, tree: &Tree) -> Result<(), MutationError> {
        match self {
            Mutation::AddNode { parent, title, .. } => {
                if title.trim().is_empty() {
                    return Err(MutationError::EmptyTitle);
                }

                let parent_key = match parent {
                    Some(key) if key.is_empty() => return Err(MutationError::EmptyKey),
                    Some(key) if !tree.is_empty() => key,
                    _ => return Ok(()),
                };

                let parent = tree
                    .find(parent_key)
                    .ok_or_else(|| MutationError::InvalidParent(parent_key.clone()))?;

                Self::check_container(parent)?;
                Self::check_title_free(parent, title, None)
            }

            Mutation::DeleteNode { key } => {
                Self::require(tree, key)?;
                Ok(())
            }

            Mutation::RenameNode { key, title } => {
                Self::require(tree, key)?;

                if title.trim().is_empty() {
                    return Err(MutationError::EmptyTitle);
                }

                match tree.parent_of(key) {
                    Some(parent) => Self::check_title_free(parent, title, Some(key)),
                    None => Ok(()),
                }
            }

            Mutation::SetValue { key, .. } => {
                let node = Self::require(tree, key)?;
                if node.is_container() {
                    return Err(MutationError::TypeMismatch(key.clone()));
                }
                Ok(())
            }

            Mutation::MoveNode { key, dest, .. } => {
                // Check node exists
                let node = Self::require(tree, key)?;

                // Check parent exists
                if dest.is_empty() {
                    return Err(MutationError::EmptyKey);
                }
                let parent = tree
                    .find(dest)
                    .ok_or_else(|| MutationError::InvalidParent(dest.clone()))?;

                // Check wouldn't create cycle
                if node.contains(dest) {
                    return Err(MutationError::Cycle {
                        node: key.clone(),
                        dest: dest.clone(),
                    });
                }

                Self::check_container(parent)?;
                Self::check_title_free(parent, &node.title, Some(key))
            }
        }
    }

    fn require<'a>(tree: &'a Tree, key: &str) -> Result<&'a Node, MutationError> {
        if key.is_empty() {
            return Err(MutationError::EmptyKey);
        }
        tree.find(key)
            .ok_or_else(|| MutationError::NotFound(key.to_string()))
    }

    fn check_container(parent: &Node) -> Result<(), MutationError> {
        if parent.is_container() {
            Ok(())
        } else {
            Err(MutationError::InvalidParent(parent.key.clone()))
        }
    }

    /// Map children must keep distinct titles; `except` is the node being
    /// renamed or moved, which may keep its own title
    fn check_title_free(
        parent: &Node,
        title: &str,
        except: Option<&str>,
    ) -> Result<(), MutationError> {
        if parent.kind() != NodeKind::Map {
            return Ok(());
        }

        let taken = parent
            .children()
            .iter()
            .any(|child| child.title == title && Some(child.key.as_str()) != except);

        if taken {
            Err(MutationError::DuplicateTitle {
                parent: parent.key.clone(),
                title: title.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// Result of applying a mutation through the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// Key of the affected node (the new key for adds and moves)
    pub key: String,
}
