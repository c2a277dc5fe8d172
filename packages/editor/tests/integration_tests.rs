//! Integration tests for editor crate

use configtree_editor::{
    EditSession, EditorOptions, FileStorage, MutationError, NodeKind, ParseError, TextStyle,
    TreeStore,
};

#[test]
fn test_map_with_integer_child_exports() {
    let mut store = TreeStore::new();
    let root = store.add_node(None, "root", NodeKind::Map, None).unwrap();
    store
        .add_node(Some(&root), "count", NodeKind::INTEGER, Some("5"))
        .unwrap();

    assert_eq!(store.export_text().unwrap(), "{root: {count: 5}}\n");
}

#[test]
fn test_sequence_export_and_reimport() {
    let mut store = TreeStore::new();
    let items = store.add_node(None, "items", NodeKind::Sequence, None).unwrap();
    store.add_node(Some(&items), "a", NodeKind::STRING, Some("a")).unwrap();
    store.add_node(Some(&items), "b", NodeKind::STRING, Some("b")).unwrap();

    let text = store.export_text().unwrap();
    assert_eq!(text, "{items: [a, b]}\n");

    let mut other = TreeStore::new();
    other.import_text(&text).unwrap();
    let node = other.find("items").unwrap();
    assert_eq!(node.kind(), NodeKind::Sequence);
    assert_eq!(node.children().len(), 2);
    assert!(node.children().iter().all(|c| c.kind() == NodeKind::STRING));
}

#[test]
fn test_set_value_on_sequence_leaves_tree() {
    let mut store = TreeStore::new();
    let items = store.add_node(None, "items", NodeKind::Sequence, None).unwrap();
    let before = store.tree().clone();

    assert_eq!(
        store.set_value(&items, "oops"),
        Err(MutationError::TypeMismatch(items.clone()))
    );
    assert_eq!(store.tree(), &before);
}

#[test]
fn test_undo_redo_restores_tree() {
    let mut store = TreeStore::new();
    let root = store.add_node(None, "root", NodeKind::Map, None).unwrap();
    store.add_node(Some(&root), "name", NodeKind::STRING, Some("demo")).unwrap();
    let tree_a = store.tree().clone();

    assert!(store.undo());
    assert_ne!(store.tree(), &tree_a);
    assert!(store.redo());
    assert_eq!(store.tree(), &tree_a);
}

#[test]
fn test_malformed_import_keeps_state() {
    let mut store = TreeStore::new();
    store.add_node(None, "keep", NodeKind::STRING, Some("me")).unwrap();
    let before = store.tree().clone();
    let levels = store.undo_levels();

    let err = store.import_text("not: [valid").unwrap_err();
    assert!(matches!(
        err,
        ParseError::InvalidSyntax { .. } | ParseError::InvalidDocument { .. }
    ));
    assert_eq!(store.tree(), &before);
    assert_eq!(store.undo_levels(), levels);
}

#[test]
fn test_move_parent_under_child_is_cycle() {
    let mut store = TreeStore::new();
    let parent = store.add_node(None, "parent", NodeKind::Map, None).unwrap();
    let middle = store.add_node(Some(&parent), "middle", NodeKind::Sequence, None).unwrap();
    let child = store.add_node(Some(&middle), "child", NodeKind::Map, None).unwrap();
    let before = store.tree().clone();

    let err = store.move_node(&parent, &child).unwrap_err();
    assert_eq!(
        err,
        MutationError::Cycle {
            node: parent.clone(),
            dest: child.clone(),
        }
    );
    assert_eq!(store.tree(), &before);
}

#[test]
fn test_file_backed_session_persists() {
    let dir = tempfile::tempdir().unwrap();
    let options = EditorOptions {
        text_style: TextStyle::Block,
        ..EditorOptions::default()
    };

    {
        let storage = FileStorage::in_dir(dir.path());
        let mut session = EditSession::open(storage, options).unwrap();
        session.store_mut().import_text("server: {port: 8080, hosts: [a, b]}").unwrap();
        session.save().unwrap();
    }

    let storage = FileStorage::in_dir(dir.path());
    let session = EditSession::open(storage, options).unwrap();
    assert_eq!(
        session.store().export_text().unwrap(),
        "server:\n  port: 8080\n  hosts:\n  - a\n  - b\n"
    );
    assert_eq!(session.store().find("server-hosts-1").unwrap().value(), Some("b"));
}

#[test]
fn test_special_floats_survive_flow_round_trip() {
    let mut store = TreeStore::new();
    store.add_node(None, "ratio", NodeKind::FLOAT, Some(".nan")).unwrap();
    store.add_node(None, "huge", NodeKind::FLOAT, Some("1e400")).unwrap();

    let text = store.export_text().unwrap();
    let mut other = TreeStore::new();
    other.import_text(&text).unwrap();

    let nan = other.find("ratio").unwrap();
    assert_eq!(nan.kind(), NodeKind::FLOAT);
    assert!(nan.value().unwrap().parse::<f64>().unwrap().is_nan());

    let huge = other.find("huge").unwrap();
    assert_eq!(huge.kind(), NodeKind::FLOAT);
    assert_eq!(huge.value().unwrap().parse::<f64>().unwrap(), f64::INFINITY);
}
