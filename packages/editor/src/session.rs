//! # Edit Session
//!
//! Binds a [`TreeStore`] to an injected [`SnapshotStorage`].
//!
//! Opening a session restores the last saved snapshot (or starts empty when
//! there is none or it cannot be decoded); `save` writes the whole current
//! tree back under the storage's well-known key.

use crate::errors::EditorError;
use crate::options::EditorOptions;
use crate::store::TreeStore;
use configtree_common::{SnapshotStorage, Tree};
use tracing::{debug, warn};

/// One editing session over a persisted tree
pub struct EditSession<S: SnapshotStorage> {
    store: TreeStore,
    storage: S,

    /// Store version at the last save or load
    saved_version: u64,
}

impl<S: SnapshotStorage> EditSession<S> {
    /// Open a session, restoring the stored snapshot if there is a usable one
    pub fn open(storage: S, options: EditorOptions) -> Result<Self, EditorError> {
        let tree = match storage.load()? {
            Some(bytes) => match decode_snapshot(&bytes) {
                Ok(tree) => {
                    debug!(nodes = tree.len(), "Restored snapshot");
                    tree
                }
                Err(e) => {
                    warn!(error = %e, "Ignoring corrupt snapshot");
                    Tree::new()
                }
            },
            None => Tree::new(),
        };

        let store = TreeStore::from_tree(tree, options);
        let saved_version = store.version();
        Ok(Self {
            store,
            storage,
            saved_version,
        })
    }

    /// Persist the current tree
    pub fn save(&mut self) -> Result<(), EditorError> {
        let bytes = encode_snapshot(self.store.tree())?;
        self.storage.save(&bytes)?;
        self.saved_version = self.store.version();
        debug!(bytes = bytes.len(), "Saved session");
        Ok(())
    }

    /// Re-read the stored snapshot, replacing the tree and clearing history
    pub fn reload(&mut self) -> Result<bool, EditorError> {
        let Some(bytes) = self.storage.load()? else {
            return Ok(false);
        };
        let tree = decode_snapshot(&bytes)?;
        self.store.reset(tree);
        self.saved_version = self.store.version();
        Ok(true)
    }

    /// Check if there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.store.version() != self.saved_version
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TreeStore {
        &mut self.store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_parts(self) -> (TreeStore, S) {
        (self.store, self.storage)
    }
}

/// Encode a whole tree (keys, titles, kinds, raw values) as JSON
pub fn encode_snapshot(tree: &Tree) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(tree)
}

/// Decode a snapshot, rejecting trees whose keys are not unique
pub fn decode_snapshot(bytes: &[u8]) -> Result<Tree, serde_json::Error> {
    let tree: Tree = serde_json::from_slice(bytes)?;
    if tree.keys().len() != tree.len() {
        return Err(serde::de::Error::custom("snapshot contains duplicate node keys"));
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use configtree_common::{MemoryStorage, NodeKind};

    #[test]
    fn test_session_starts_empty_without_snapshot() {
        let session = EditSession::open(MemoryStorage::new(), EditorOptions::default()).unwrap();
        assert!(session.store().tree().is_empty());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_save_and_reopen() {
        let mut session =
            EditSession::open(MemoryStorage::new(), EditorOptions::default()).unwrap();
        let root = session.store_mut().add_node(None, "root", NodeKind::Map, None).unwrap();
        session
            .store_mut()
            .add_node(Some(&root), "port", NodeKind::INTEGER, Some("8080"))
            .unwrap();
        assert!(session.is_dirty());

        session.save().unwrap();
        assert!(!session.is_dirty());

        let (store, storage) = session.into_parts();
        let reopened = EditSession::open(storage, EditorOptions::default()).unwrap();
        assert_eq!(reopened.store().tree(), store.tree());
        assert!(!reopened.store().can_undo());
    }

    #[test]
    fn test_corrupt_snapshot_leaves_tree_empty() {
        let storage = MemoryStorage::with_snapshot(b"{not json".to_vec());
        let session = EditSession::open(storage, EditorOptions::default()).unwrap();
        assert!(session.store().tree().is_empty());
    }

    #[test]
    fn test_duplicate_keys_are_corrupt() {
        let json = br#"[
            {"key": "a", "title": "a", "body": {"type": "scalar", "kind": "string", "value": "1"}},
            {"key": "a", "title": "b", "body": {"type": "scalar", "kind": "string", "value": "2"}}
        ]"#;
        assert!(decode_snapshot(json).is_err());

        let session =
            EditSession::open(MemoryStorage::with_snapshot(json.to_vec()), EditorOptions::default())
                .unwrap();
        assert!(session.store().tree().is_empty());
    }

    #[test]
    fn test_reload_discards_unsaved_changes() {
        let mut session =
            EditSession::open(MemoryStorage::new(), EditorOptions::default()).unwrap();
        session.store_mut().add_node(None, "saved", NodeKind::STRING, None).unwrap();
        session.save().unwrap();
        session.store_mut().add_node(None, "unsaved", NodeKind::STRING, None).unwrap();

        assert!(session.reload().unwrap());
        assert!(session.store().find("unsaved").is_none());
        assert!(session.store().find("saved").is_some());
        assert!(!session.is_dirty());
    }
}
