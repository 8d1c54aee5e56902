use arbor::collapse::{self, Toggled};
use arbor::tree::{NetworkRow, RawElement};
use arbor::{MalformedInputError, Tree, TreeData};
use serde_json::json;

fn scenario() -> TreeData {
    TreeData::Nested(
        RawElement::new("root")
            .child(
                RawElement::new("A")
                    .child(RawElement::new("A1"))
                    .child(RawElement::new("A2")),
            )
            .child(
                RawElement::new("B")
                    .child(RawElement::new("B1"))
                    .child(RawElement::new("B2")),
            ),
    )
}

fn labels(tree: &Tree, ixs: &[arbor::NodeIx]) -> Vec<String> {
    ixs.iter().map(|&ix| tree.get(ix).label.clone()).collect()
}

// =============================================================================
// Building
// =============================================================================

#[test]
fn test_nested_build_sets_parents_and_depths() {
    let tree = Tree::build(&scenario()).unwrap();
    assert_eq!(tree.len(), 7);

    let a2 = tree.find_by_label("A2").unwrap();
    assert_eq!(tree.get(a2).depth(), 2);
    assert_eq!(labels(&tree, &tree.path_to(a2)), ["root", "A", "A2"]);
    assert_eq!(tree.parent(tree.root()), None);
}

#[test]
fn test_nested_json_accepts_weight_alias_and_fill() {
    let data: TreeData = serde_json::from_value(json!({
        "name": "root",
        "children": [
            { "name": "A", "WeightOfNode": 3, "fill": "tomato" },
            { "name": "B", "weight": 5, "region": "north" }
        ]
    }))
    .unwrap();
    let tree = Tree::build(&data).unwrap();

    let a = tree.find_by_label("A").unwrap();
    assert_eq!(tree.get(a).weight, Some(json!(3)));
    assert!(tree.get(a).fill.is_some());

    let b = tree.find_by_label("B").unwrap();
    assert_eq!(tree.attribute(b, "region"), Some(json!("north")));
}

#[test]
fn test_network_build_matches_nested() {
    let rows = vec![
        NetworkRow::new("root", None),
        NetworkRow::new("A", Some("root")),
        NetworkRow::new("B", Some("root")),
        NetworkRow::new("A1", Some("A")),
        NetworkRow::new("A2", Some("A")),
    ];
    let tree = Tree::build(&TreeData::Network(rows)).unwrap();

    let root = tree.root();
    assert_eq!(tree.get(root).label, "root");
    assert_eq!(labels(&tree, tree.visible_children(root)), ["A", "B"]);
    let a = tree.find_by_label("A").unwrap();
    assert_eq!(labels(&tree, tree.visible_children(a)), ["A1", "A2"]);
}

#[test]
fn test_network_json_rows() {
    let data: TreeData = serde_json::from_value(json!([
        { "name": "root", "parent": null },
        { "name": "leaf", "parent": "root", "WeightOfNode": 2 }
    ]))
    .unwrap();
    let tree = Tree::build(&data).unwrap();
    assert_eq!(tree.len(), 2);
}

// =============================================================================
// Malformed input
// =============================================================================

#[test]
fn test_network_rejects_cycle() {
    let rows = vec![
        NetworkRow::new("root", None),
        NetworkRow::new("a", Some("b")),
        NetworkRow::new("b", Some("a")),
    ];
    let err = Tree::build(&TreeData::Network(rows)).unwrap_err();
    assert!(matches!(err, MalformedInputError::Cycle { .. }));
}

#[test]
fn test_network_rejects_self_parent() {
    let rows = vec![
        NetworkRow::new("root", None),
        NetworkRow::new("a", Some("a")),
    ];
    let err = Tree::build(&TreeData::Network(rows)).unwrap_err();
    assert_eq!(
        err,
        MalformedInputError::Cycle {
            label: "a".to_string()
        }
    );
}

#[test]
fn test_network_rejects_two_parents() {
    let rows = vec![
        NetworkRow::new("root", None),
        NetworkRow::new("x", Some("root")),
        NetworkRow::new("y", Some("root")),
        NetworkRow::new("z", Some("x")),
        NetworkRow::new("z", Some("y")),
    ];
    let err = Tree::build(&TreeData::Network(rows)).unwrap_err();
    assert!(matches!(err, MalformedInputError::MultipleParents { ref label, .. } if label == "z"));
}

#[test]
fn test_network_rejects_unknown_parent() {
    let rows = vec![
        NetworkRow::new("root", None),
        NetworkRow::new("a", Some("ghost")),
    ];
    let err = Tree::build(&TreeData::Network(rows)).unwrap_err();
    assert!(matches!(err, MalformedInputError::UnknownParent { .. }));
}

#[test]
fn test_network_root_errors() {
    let two_roots = vec![NetworkRow::new("a", None), NetworkRow::new("b", None)];
    assert!(matches!(
        Tree::build(&TreeData::Network(two_roots)),
        Err(MalformedInputError::MultipleRoots { .. })
    ));

    let no_root = vec![NetworkRow::new("a", Some("b")), NetworkRow::new("b", Some("a"))];
    assert_eq!(
        Tree::build(&TreeData::Network(no_root)).unwrap_err(),
        MalformedInputError::NoRoot
    );

    assert_eq!(
        Tree::build(&TreeData::Network(Vec::new())).unwrap_err(),
        MalformedInputError::Empty
    );
}

// =============================================================================
// Collapse state
// =============================================================================

#[test]
fn test_initialize_collapses_below_depth() {
    let mut tree = Tree::build(&scenario()).unwrap();
    collapse::initialize(&mut tree, 1);

    assert_eq!(labels(&tree, &tree.visible_nodes()), ["root", "A", "B"]);
    let a = tree.find_by_label("A").unwrap();
    assert!(tree.get(a).children().is_collapsed());
    assert!(!tree.is_visible(tree.find_by_label("A1").unwrap()));
}

#[test]
fn test_toggle_round_trip_restores_visible_set() {
    let mut tree = Tree::build(&scenario()).unwrap();
    collapse::initialize(&mut tree, 1);
    let before = tree.visible_nodes();
    let a = tree.find_by_label("A").unwrap();

    assert_eq!(collapse::toggle(&mut tree, a), Ok(Toggled::Expanded));
    assert_eq!(tree.visible_nodes().len(), 5);
    assert_eq!(collapse::toggle(&mut tree, a), Ok(Toggled::Collapsed));
    assert_eq!(tree.visible_nodes(), before);
}

#[test]
fn test_toggle_leaf_is_rejected() {
    let mut tree = Tree::build(&scenario()).unwrap();
    let leaf = tree.find_by_label("B2").unwrap();
    let err = collapse::toggle(&mut tree, leaf).unwrap_err();
    assert_eq!(err.label, "B2");
}

#[test]
fn test_collapsed_subtree_keeps_its_own_state() {
    let mut tree = Tree::build(&scenario()).unwrap();
    collapse::expand_all(&mut tree);
    let root = tree.root();
    collapse::toggle(&mut tree, root).unwrap();
    assert_eq!(tree.visible_nodes().len(), 1);

    collapse::toggle(&mut tree, root).unwrap();
    assert_eq!(tree.visible_nodes().len(), 7);
}

#[test]
fn test_leaf_count_includes_hidden_leaves() {
    let mut tree = Tree::build(&scenario()).unwrap();
    collapse::collapse_all(&mut tree);
    let root = tree.root();
    assert_eq!(tree.leaf_count(root), 4);
    assert_eq!(tree.attribute(root, "leafCount"), Some(json!(4)));
}

#[test]
fn test_visible_descendants_stop_at_collapsed_nodes() {
    let mut tree = Tree::build(&scenario()).unwrap();
    collapse::initialize(&mut tree, 1);
    let a = tree.find_by_label("A").unwrap();
    assert_eq!(labels(&tree, &tree.visible_descendants(a)), ["A"]);

    collapse::toggle(&mut tree, a).unwrap();
    assert_eq!(labels(&tree, &tree.visible_descendants(a)), ["A", "A1", "A2"]);
}
