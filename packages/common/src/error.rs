use thiserror::Error;

/// Errors shared by the model and the storage layer
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Unknown node kind: {0}")]
    UnknownKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot key: {0:?}")]
    InvalidStorageKey(String),
}

pub type CommonResult<T> = Result<T, CommonError>;
