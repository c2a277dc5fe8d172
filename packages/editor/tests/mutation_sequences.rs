//! Tests for longer mutation sequences
//!
//! This tests:
//! - Undo/redo over many steps
//! - Redo-branch truncation
//! - Key uniqueness after adds and moves
//! - Delete cascades
//! - Export → import round trips of edited trees

use configtree_codec::to_value;
use configtree_editor::{NodeKind, Tree, TreeStore};
use std::collections::HashSet;

/// Every key in the tree, failing on duplicates
fn assert_unique_keys(tree: &Tree) {
    fn walk(node: &configtree_editor::Node, seen: &mut HashSet<String>) {
        assert!(seen.insert(node.key.clone()), "duplicate key {}", node.key);
        for child in node.children() {
            walk(child, seen);
        }
    }

    let mut seen = HashSet::new();
    for root in tree.roots() {
        walk(root, &mut seen);
    }
}

/// Builds a small config tree, returning the snapshot after every step
fn build(store: &mut TreeStore) -> Vec<Tree> {
    let mut states = vec![store.tree().clone()];

    let server = store.add_node(None, "server", NodeKind::Map, None).unwrap();
    states.push(store.tree().clone());
    store.add_node(Some(&server), "port", NodeKind::INTEGER, Some("80")).unwrap();
    states.push(store.tree().clone());
    let hosts = store.add_node(Some(&server), "hosts", NodeKind::Sequence, None).unwrap();
    states.push(store.tree().clone());
    store.add_node(Some(&hosts), "h", NodeKind::STRING, Some("a.example")).unwrap();
    states.push(store.tree().clone());
    store.add_node(Some(&hosts), "h", NodeKind::STRING, Some("b.example")).unwrap();
    states.push(store.tree().clone());
    store.set_value("server-port", "8080").unwrap();
    states.push(store.tree().clone());
    store.rename_node("server-port", "listen").unwrap();
    states.push(store.tree().clone());
    store.add_node(None, "ratio", NodeKind::FLOAT, Some("0.5")).unwrap();
    states.push(store.tree().clone());

    states
}

#[test]
fn test_undo_all_then_redo_all() {
    let mut store = TreeStore::new();
    let states = build(&mut store);
    let steps = states.len() - 1;
    assert_eq!(store.undo_levels(), steps);

    for n in (0..steps).rev() {
        assert!(store.undo());
        assert_eq!(store.tree(), &states[n]);
    }
    assert!(!store.undo());

    for n in 1..=steps {
        assert!(store.redo());
        assert_eq!(store.tree(), &states[n]);
    }
    assert!(!store.redo());
}

#[test]
fn test_partial_undo_redo_round_trip() {
    let mut store = TreeStore::new();
    let states = build(&mut store);
    let last = states.last().unwrap().clone();

    for n in 1..states.len() {
        for _ in 0..n {
            assert!(store.undo());
        }
        for _ in 0..n {
            assert!(store.redo());
        }
        assert_eq!(store.tree(), &last);
    }
}

#[test]
fn test_new_mutation_after_undo_truncates_redo() {
    let mut store = TreeStore::new();
    build(&mut store);

    store.undo();
    store.undo();
    assert_eq!(store.redo_levels(), 2);

    store.add_node(None, "branch", NodeKind::STRING, None).unwrap();
    assert_eq!(store.redo_levels(), 0);
    assert!(!store.redo());
    assert!(store.find("branch").is_some());
}

#[test]
fn test_keys_unique_after_adds_and_moves() {
    let mut store = TreeStore::new();
    let a = store.add_node(None, "a", NodeKind::Map, None).unwrap();
    let b = store.add_node(None, "b", NodeKind::Sequence, None).unwrap();
    let c = store.add_node(None, "c", NodeKind::Sequence, None).unwrap();

    for i in 0..4 {
        store
            .add_node(Some(&b), "item", NodeKind::INTEGER, Some(&i.to_string()))
            .unwrap();
    }
    store.add_node(Some(&a), "x-y", NodeKind::STRING, None).unwrap();
    let x = store.add_node(Some(&a), "x", NodeKind::Map, None).unwrap();
    store.add_node(Some(&x), "y", NodeKind::STRING, None).unwrap();
    assert_unique_keys(store.tree());

    // Shuffle items between sequences and back
    store.move_node("b-1", &c).unwrap();
    store.move_node("b-3", &c).unwrap();
    store.add_node(Some(&b), "item", NodeKind::INTEGER, Some("9")).unwrap();
    store.move_node_at("c-0", &b, 0).unwrap();
    store.move_node(&x, &c).unwrap();
    store.delete_node("b-0").unwrap();
    store.add_node(Some(&b), "item", NodeKind::INTEGER, Some("10")).unwrap();
    store.move_node(&c, &a).unwrap();

    assert_unique_keys(store.tree());
    assert_eq!(store.tree().keys().len(), store.tree().len());
}

#[test]
fn test_delete_cascades() {
    let mut store = TreeStore::new();
    store
        .import_text("app:\n  db:\n    hosts: [a, b]\n    pool: {min: 1, max: 4}\n  name: x\n")
        .unwrap();

    let doomed: Vec<String> = store
        .tree()
        .keys()
        .into_iter()
        .filter(|k| k == "app-db" || k.starts_with("app-db-"))
        .collect();
    assert_eq!(doomed.len(), 7);

    store.delete_node("app-db").unwrap();
    for key in &doomed {
        assert!(store.find(key).is_none(), "{} survived delete", key);
    }
    assert!(store.find("app-name").is_some());
}

#[test]
fn test_moved_subtree_rekeys_and_cycle_leaves_tree() {
    let mut store = TreeStore::new();
    store.import_text("a:\n  inner:\n    deep: [1, 2]\nb: {}\n").unwrap();

    let new_key = store.move_node("a-inner", "b").unwrap();
    assert_eq!(new_key, "b-inner");
    assert_eq!(store.find("b-inner-deep-1").unwrap().value(), Some("2"));
    assert!(store.find("a-inner").is_none());

    let before = store.tree().clone();
    assert!(store.move_node("b", "b-inner-deep").is_err());
    assert!(store.move_node("b", "b").is_err());
    assert_eq!(store.tree(), &before);
}

#[test]
fn test_edited_tree_round_trips() {
    let mut store = TreeStore::new();
    build(&mut store);
    store.move_node("server-hosts-0", "server-hosts").unwrap();

    let text = store.export_text().unwrap();
    let mut other = TreeStore::new();
    other.import_text(&text).unwrap();

    assert_eq!(to_value(other.tree()), to_value(store.tree()));
}
