//! # Serializer
//!
//! Tree → plain value → text.
//!
//! Scalars are stored as raw text and converted according to their kind.
//! Raw values that do not parse for their kind become the kind's zero value
//! (`0` / `0.0`) instead of failing. Sequences become lists, maps become
//! mappings keyed by child title (last write wins on duplicate titles), and
//! the root forest merges into one mapping.
//!
//! The default layout is a single-line flow document (`{root: {count: 5}}`).
//! Its leaves go through the YAML emitter, so special floats keep their YAML
//! spelling (`.nan`, `.inf`) and strings that would read as another type stay
//! quoted.

use crate::error::RenderError;
use configtree_common::{Node, NodeBody, ScalarKind, Tree};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Number, Value};
use std::fmt;
use std::str::FromStr;

/// Textual layout of the exported document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    /// Indented block mappings and sequences
    Block,

    /// A single-line flow document (`{a: [1, 2]}`)
    #[default]
    Flow,
}

impl FromStr for TextStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(TextStyle::Block),
            "flow" => Ok(TextStyle::Flow),
            other => Err(format!("unknown text style '{}' (expected block or flow)", other)),
        }
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextStyle::Block => f.write_str("block"),
            TextStyle::Flow => f.write_str("flow"),
        }
    }
}

/// Serialize a tree using the default flow style
pub fn serialize(tree: &Tree) -> Result<String, RenderError> {
    serialize_with(tree, TextStyle::default())
}

pub fn serialize_with(tree: &Tree, style: TextStyle) -> Result<String, RenderError> {
    render(&to_value(tree), style)
}

/// Render a plain value. Neither style wraps long lines.
pub fn render(value: &Value, style: TextStyle) -> Result<String, RenderError> {
    match style {
        TextStyle::Block => Ok(serde_yaml::to_string(value)?),
        TextStyle::Flow => {
            let mut text = String::new();
            write_flow(value, &mut text)?;
            text.push('\n');
            Ok(text)
        }
    }
}

/// Characters that end a plain scalar inside a flow collection
const FLOW_INDICATORS: [char; 7] = [',', '[', ']', '{', '}', ':', '#'];

fn write_flow(value: &Value, out: &mut String) -> Result<(), RenderError> {
    match value {
        Value::Mapping(mapping) => {
            out.push('{');
            for (i, (key, child)) in mapping.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_flow(key, out)?;
                out.push_str(": ");
                write_flow(child, out)?;
            }
            out.push('}');
        }
        Value::Sequence(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_flow(item, out)?;
            }
            out.push(']');
        }
        Value::Tagged(tagged) => write_flow(&tagged.value, out)?,
        leaf => out.push_str(&flow_scalar(leaf)?),
    }
    Ok(())
}

/// One scalar as the YAML emitter spells it, double-quoted when that
/// spelling would not survive inside a flow collection
fn flow_scalar(value: &Value) -> Result<String, RenderError> {
    let rendered = serde_yaml::to_string(value)?;
    let text = rendered.trim_end_matches('\n');

    match value {
        Value::String(s) if needs_double_quotes(text) => Ok(serde_json::to_string(s)?),
        _ => Ok(text.to_string()),
    }
}

fn needs_double_quotes(rendered: &str) -> bool {
    // Block scalars span lines; plain scalars must not contain indicators
    rendered.contains('\n')
        || (!rendered.starts_with(['\'', '"']) && rendered.contains(FLOW_INDICATORS))
}

/// Merge every root into one mapping keyed by root title
pub fn to_value(tree: &Tree) -> Value {
    let mut mapping = Mapping::new();
    for root in tree.roots() {
        mapping.insert(Value::String(root.title.clone()), node_to_value(root));
    }
    Value::Mapping(mapping)
}

pub fn node_to_value(node: &Node) -> Value {
    match &node.body {
        NodeBody::Scalar { kind, value } => scalar_to_value(*kind, value),
        NodeBody::Sequence { children } => {
            Value::Sequence(children.iter().map(node_to_value).collect())
        }
        NodeBody::Map { children } => {
            let mut mapping = Mapping::new();
            for child in children {
                mapping.insert(Value::String(child.title.clone()), node_to_value(child));
            }
            Value::Mapping(mapping)
        }
    }
}

pub fn scalar_to_value(kind: ScalarKind, raw: &str) -> Value {
    match kind {
        ScalarKind::String => Value::String(raw.to_string()),
        ScalarKind::Integer => Value::Number(parse_integer(raw)),
        ScalarKind::Float => Value::Number(Number::from(parse_float(raw))),
    }
}

/// Signed, then unsigned 64-bit; anything else is `0`
pub fn parse_integer(raw: &str) -> Number {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map(Number::from)
        .or_else(|_| trimmed.parse::<u64>().map(Number::from))
        .unwrap_or_else(|_| Number::from(0i64))
}

/// Decimal or YAML special float; anything else is `0.0`
pub fn parse_float(raw: &str) -> f64 {
    let trimmed = raw.trim();
    match trimmed {
        ".nan" | ".NaN" | ".NAN" => f64::NAN,
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => f64::INFINITY,
        "-.inf" | "-.Inf" | "-.INF" => f64::NEG_INFINITY,
        _ => trimmed.parse::<f64>().unwrap_or(0.0),
    }
}

/// Raw text for a float that parses back to the same value and still
/// reads as a float
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let text = value.to_string();
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{}.0", text)
    }
}
