//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] configtree_codec::ParseError),

    #[error("Render error: {0}")]
    Render(#[from] configtree_codec::RenderError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Storage error: {0}")]
    Storage(#[from] configtree_common::CommonError),

    #[error("Snapshot encoding error: {0}")]
    Snapshot(#[from] serde_json::Error),
}
