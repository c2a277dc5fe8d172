use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Failure to turn text into a tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid syntax at line {line}, column {column}: {message}")]
    InvalidSyntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },

    #[error("Document root must be a mapping, found {found}")]
    UnsupportedRoot { found: String },
}

impl ParseError {
    pub fn invalid_syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    pub fn unsupported_root(found: impl Into<String>) -> Self {
        Self::UnsupportedRoot {
            found: found.into(),
        }
    }

    /// 1-based (line, column) when the parser reported one
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            Self::InvalidSyntax { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for ParseError {
    fn from(e: serde_yaml::Error) -> Self {
        match e.location() {
            Some(loc) => Self::invalid_syntax(loc.line(), loc.column(), e.to_string()),
            None => Self::invalid_document(e.to_string()),
        }
    }
}

/// Failure to render a plain value as text
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("YAML render error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Double-quoting a flow scalar failed
    #[error("Flow render error: {0}")]
    Json(#[from] serde_json::Error),
}
