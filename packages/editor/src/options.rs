use crate::history::DEFAULT_HISTORY_LIMIT;
use configtree_codec::TextStyle;
use serde::{Deserialize, Serialize};

/// Tunables for a tree store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    /// Snapshots kept for undo/redo (0 = unlimited)
    pub history_limit: usize,

    /// Layout used by `export_text`
    pub text_style: TextStyle,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            text_style: TextStyle::default(),
        }
    }
}
