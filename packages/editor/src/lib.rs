//! # Configtree Editor
//!
//! In-memory editing engine for hierarchical configuration documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: rendering layer, forms, file pickers  │
//! └─────────────────────────────────────────────┘
//!                     ↓ commands
//! ┌─────────────────────────────────────────────┐
//! │ editor: TreeStore + History                 │
//! │  - Validate and apply mutations             │
//! │  - Snapshot every committed change          │
//! │  - Undo/redo over snapshots                 │
//! │  - Import/export structured text            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ codec: Tree ⇄ plain value ⇄ YAML text       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Single owner**: the store is the only writer of the tree
//! 2. **All or nothing**: a failed command changes neither tree nor history
//! 3. **Snapshots, not diffs**: history entries are immutable deep copies
//! 4. **No I/O in the core**: persistence is injected through `SnapshotStorage`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use configtree_editor::{NodeKind, TreeStore};
//!
//! let mut store = TreeStore::new();
//! let root = store.add_node(None, "root", NodeKind::Map, None)?;
//! store.add_node(Some(&root), "count", NodeKind::INTEGER, Some("5"))?;
//!
//! assert_eq!(store.export_text()?, "{root: {count: 5}}\n");
//!
//! store.undo();
//! store.redo();
//! ```

mod errors;
mod history;
mod mutations;
mod options;
mod session;
mod store;

pub use errors::EditorError;
pub use history::{History, DEFAULT_HISTORY_LIMIT};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use options::EditorOptions;
pub use session::{decode_snapshot, encode_snapshot, EditSession};
pub use store::TreeStore;

// Re-export common types for convenience
pub use configtree_codec::{ParseError, RenderError, TextStyle};
pub use configtree_common::{
    FileStorage, MemoryStorage, Node, NodeKind, ScalarKind, SnapshotStorage, Tree, SNAPSHOT_KEY,
};
