//! # Configtree Codec
//!
//! Bidirectional conversion between configuration trees and structured text.
//!
//! ```text
//! Tree ──serialize──▶ plain value ──render──▶ text
//! Tree ◀──from_value── plain value ◀──parse── text
//! ```
//!
//! The plain value is `serde_yaml::Value`. Flow-style output (the default)
//! is written one line at a time with `serde_yaml` spelling each scalar;
//! block-style output goes through `serde_yaml` as a whole.

mod deserializer;
mod error;
mod serializer;

pub use deserializer::{deserialize, from_value, parse_value};
pub use error::{ParseError, ParseResult, RenderError};
pub use serializer::{
    format_float, node_to_value, parse_float, parse_integer, render, scalar_to_value, serialize,
    serialize_with, to_value, TextStyle,
};

// Re-export the plain value type for convenience
pub use serde_yaml::Value;
