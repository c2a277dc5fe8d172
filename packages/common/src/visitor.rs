use crate::node::Node;
use crate::tree::Tree;
use std::collections::HashSet;

/// Visitor pattern for traversing a tree immutably
///
/// The default implementations walk the whole forest in pre-order.
/// Override `visit_node` to act on each node, and call `walk_node` to keep
/// descending.
pub trait Visitor: Sized {
    fn visit_tree(&mut self, tree: &Tree) {
        walk_tree(self, tree);
    }

    fn visit_node(&mut self, node: &Node, depth: usize) {
        walk_node(self, node, depth);
    }
}

pub fn walk_tree<V: Visitor>(visitor: &mut V, tree: &Tree) {
    for root in tree.roots() {
        visitor.visit_node(root, 0);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node, depth: usize) {
    for child in node.children() {
        visitor.visit_node(child, depth + 1);
    }
}

/// Collects every key
#[derive(Debug, Default)]
pub struct KeyCollector {
    pub keys: HashSet<String>,
}

impl Visitor for KeyCollector {
    fn visit_node(&mut self, node: &Node, depth: usize) {
        self.keys.insert(node.key.clone());
        walk_node(self, node, depth);
    }
}

/// Counts nodes
#[derive(Debug, Default)]
pub struct NodeCounter {
    pub count: usize,
}

impl Visitor for NodeCounter {
    fn visit_node(&mut self, node: &Node, depth: usize) {
        self.count += 1;
        walk_node(self, node, depth);
    }
}

/// Renders an indented outline: `key  title: kind = value`
#[derive(Debug, Default)]
pub struct OutlineWriter {
    pub lines: Vec<String>,
}

impl OutlineWriter {
    pub fn render(tree: &Tree) -> String {
        let mut writer = Self::default();
        writer.visit_tree(tree);
        writer.lines.join("\n")
    }
}

impl Visitor for OutlineWriter {
    fn visit_node(&mut self, node: &Node, depth: usize) {
        let indent = "  ".repeat(depth);
        let line = match node.value() {
            Some(value) => format!(
                "{indent}{}: {} = {:?}  [{}]",
                node.title,
                node.kind(),
                value,
                node.key
            ),
            None => format!("{indent}{}: {}  [{}]", node.title, node.kind(), node.key),
        };
        self.lines.push(line);
        walk_node(self, node, depth);
    }
}
