//! # Node Model
//!
//! The tagged node shape of an editable configuration tree.
//!
//! A node is either a scalar (string, integer or float, stored as its raw
//! text) or a container (sequence or map) holding ordered children. The body
//! is a closed enum, so a scalar can never carry children and a container can
//! never carry a value.

use crate::error::CommonError;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Number, Value};
use std::fmt;
use std::str::FromStr;

/// Kind of a leaf value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Integer,
    Float,
}

impl ScalarKind {
    /// Raw text of the zero value for this kind
    pub fn default_raw(self) -> &'static str {
        match self {
            ScalarKind::String => "",
            ScalarKind::Integer => "0",
            ScalarKind::Float => "0.0",
        }
    }
}

/// Kind of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Scalar(ScalarKind),
    Sequence,
    Map,
}

impl NodeKind {
    pub const STRING: NodeKind = NodeKind::Scalar(ScalarKind::String);
    pub const INTEGER: NodeKind = NodeKind::Scalar(ScalarKind::Integer);
    pub const FLOAT: NodeKind = NodeKind::Scalar(ScalarKind::Float);

    /// True for `Sequence` and `Map`
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Sequence | NodeKind::Map)
    }

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Scalar(ScalarKind::String) => "string",
            NodeKind::Scalar(ScalarKind::Integer) => "int",
            NodeKind::Scalar(ScalarKind::Float) => "float",
            NodeKind::Sequence => "array",
            NodeKind::Map => "map",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeKind {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "str" | "text" => Ok(NodeKind::STRING),
            "int" | "integer" => Ok(NodeKind::INTEGER),
            "float" | "number" => Ok(NodeKind::FLOAT),
            "array" | "sequence" | "seq" | "list" => Ok(NodeKind::Sequence),
            "map" | "mapping" | "object" => Ok(NodeKind::Map),
            _ => Err(CommonError::UnknownKind(s.to_string())),
        }
    }
}

/// Zero value for each kind, as a plain value
pub fn default_value(kind: NodeKind) -> Value {
    match kind {
        NodeKind::Scalar(ScalarKind::String) => Value::String(String::new()),
        NodeKind::Scalar(ScalarKind::Integer) => Value::Number(Number::from(0i64)),
        NodeKind::Scalar(ScalarKind::Float) => Value::Number(Number::from(0.0f64)),
        NodeKind::Sequence => Value::Sequence(Vec::new()),
        NodeKind::Map => Value::Mapping(Mapping::new()),
    }
}

/// Payload of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeBody {
    Scalar { kind: ScalarKind, value: String },
    Sequence { children: Vec<Node> },
    Map { children: Vec<Node> },
}

impl NodeBody {
    /// Build a body of the given kind. Containers ignore `value`; scalars
    /// fall back to the zero value when none is given.
    pub fn new(kind: NodeKind, value: Option<String>) -> Self {
        match kind {
            NodeKind::Scalar(kind) => NodeBody::Scalar {
                kind,
                value: value.unwrap_or_else(|| kind.default_raw().to_string()),
            },
            NodeKind::Sequence => NodeBody::Sequence { children: Vec::new() },
            NodeKind::Map => NodeBody::Map { children: Vec::new() },
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeBody::Scalar { kind, .. } => NodeKind::Scalar(*kind),
            NodeBody::Sequence { .. } => NodeKind::Sequence,
            NodeBody::Map { .. } => NodeKind::Map,
        }
    }
}

/// One element of the edited tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Tree-unique address, derived from the parent's key
    pub key: String,

    /// Map key for map children, positional label otherwise
    pub title: String,

    pub body: NodeBody,
}

impl Node {
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        kind: NodeKind,
        value: Option<String>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            body: NodeBody::new(kind, value),
        }
    }

    pub fn scalar(
        key: impl Into<String>,
        title: impl Into<String>,
        kind: ScalarKind,
        value: impl Into<String>,
    ) -> Self {
        Self::new(key, title, NodeKind::Scalar(kind), Some(value.into()))
    }

    pub fn kind(&self) -> NodeKind {
        self.body.kind()
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    /// Raw scalar value, `None` for containers
    pub fn value(&self) -> Option<&str> {
        match &self.body {
            NodeBody::Scalar { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Children in order (empty for scalars)
    pub fn children(&self) -> &[Node] {
        match &self.body {
            NodeBody::Sequence { children } | NodeBody::Map { children } => children,
            NodeBody::Scalar { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.body {
            NodeBody::Sequence { children } | NodeBody::Map { children } => Some(children),
            NodeBody::Scalar { .. } => None,
        }
    }

    /// Pre-order search of this subtree
    pub fn find(&self, key: &str) -> Option<&Node> {
        if self.key == key {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(key))
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Node> {
        if self.key == key {
            return Some(self);
        }
        self.children_mut()?
            .iter_mut()
            .find_map(|child| child.find_mut(key))
    }

    /// True if `key` is this node or one of its descendants
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Whether a direct child already uses `title`
    pub fn has_child_titled(&self, title: &str) -> bool {
        self.children().iter().any(|child| child.title == title)
    }
}
