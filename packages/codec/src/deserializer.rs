//! # Deserializer
//!
//! Text → plain value → tree, inferring node kinds from the parsed values.
//!
//! Mappings become `Map` nodes, lists become `Sequence` nodes with
//! positional titles, integers and floats keep the representation the parser
//! gave them, and everything else (booleans, null) is stored as a string.
//! Mapping keys must stringify to distinct, non-blank titles.
//! The whole tree is built before it is returned, so a failure never leaves
//! a partial result behind.

use crate::error::{ParseError, ParseResult};
use crate::serializer::format_float;
use configtree_common::{discriminator, KeyAllocator, Node, NodeKind, ScalarKind, Tree};
use serde_yaml::{Mapping, Number, Value};
use std::collections::HashSet;
use tracing::debug;

/// Parse text into a tree
pub fn deserialize(text: &str) -> ParseResult<Tree> {
    let value = parse_value(text)?;
    let tree = from_value(&value)?;
    debug!(nodes = tree.len(), "Deserialized document");
    Ok(tree)
}

/// Parse text into a plain value
pub fn parse_value(text: &str) -> ParseResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_yaml::from_str(text)?)
}

/// Build a tree from a plain value whose root is a mapping
pub fn from_value(value: &Value) -> ParseResult<Tree> {
    match strip_tag(value) {
        Value::Null => Ok(Tree::new()),
        Value::Mapping(mapping) => {
            let mut keys = KeyAllocator::new();
            let roots = map_entries(mapping, None, &mut keys)?;
            Ok(Tree::from_roots(roots))
        }
        other => Err(ParseError::unsupported_root(value_kind_name(other))),
    }
}

/// Nodes for the entries of one mapping. Keys that stringify to an empty
/// or already used title are rejected.
fn map_entries(
    mapping: &Mapping,
    parent_key: Option<&str>,
    keys: &mut KeyAllocator,
) -> ParseResult<Vec<Node>> {
    let location = parent_key.unwrap_or("the document root");
    let mut titles = HashSet::new();

    mapping
        .iter()
        .map(|(key, child)| {
            let title = key_text(key);
            if title.trim().is_empty() {
                return Err(ParseError::invalid_document(format!(
                    "empty mapping key in {}",
                    location
                )));
            }
            if !titles.insert(title.clone()) {
                return Err(ParseError::invalid_document(format!(
                    "duplicate mapping key {:?} in {}",
                    title, location
                )));
            }

            let node_key = keys.allocate(parent_key, &title);
            infer_node(node_key, title, child, keys)
        })
        .collect()
}

fn infer_node(
    key: String,
    title: String,
    value: &Value,
    keys: &mut KeyAllocator,
) -> ParseResult<Node> {
    let node = match strip_tag(value) {
        Value::Mapping(mapping) => {
            let mut node = Node::new(key, title, NodeKind::Map, None);
            let children = map_entries(mapping, Some(node.key.as_str()), keys)?;
            if let Some(slot) = node.children_mut() {
                *slot = children;
            }
            node
        }
        Value::Sequence(items) => {
            let mut node = Node::new(key, title, NodeKind::Sequence, None);
            let children = items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let disc = discriminator(Some(NodeKind::Sequence), index, "");
                    let node_key = keys.allocate(Some(node.key.as_str()), &disc);
                    let item_title = format!("{}-{}", node.title, index);
                    infer_node(node_key, item_title, item, keys)
                })
                .collect::<ParseResult<Vec<_>>>()?;
            if let Some(slot) = node.children_mut() {
                *slot = children;
            }
            node
        }
        Value::Number(number) => {
            let (kind, raw) = number_scalar(number);
            Node::scalar(key, title, kind, raw)
        }
        other => Node::scalar(key, title, ScalarKind::String, scalar_text(other)),
    };
    Ok(node)
}

fn number_scalar(number: &Number) -> (ScalarKind, String) {
    if let Some(i) = number.as_i64() {
        (ScalarKind::Integer, i.to_string())
    } else if let Some(u) = number.as_u64() {
        (ScalarKind::Integer, u.to_string())
    } else {
        (ScalarKind::Float, format_float(number.as_f64().unwrap_or(0.0)))
    }
}

fn strip_tag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => strip_tag(&tagged.value),
        other => other,
    }
}

/// Stringified leaf value
fn scalar_text(value: &Value) -> String {
    match strip_tag(value) {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(number) => number_scalar(number).1,
        Value::String(s) => s.clone(),
        complex => serde_yaml::to_string(complex)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Mapping keys become titles
fn key_text(key: &Value) -> String {
    scalar_text(key)
}

fn value_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
