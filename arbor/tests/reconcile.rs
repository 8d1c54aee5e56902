use std::collections::HashSet;

use arbor::collapse;
use arbor::layout::layout;
use arbor::reconcile::{partition, Keyed, Reconciler};
use arbor::tree::{IdentitySequence, RawElement};
use arbor::{Extent, Identity, Tree, TreeData};

fn scenario() -> Tree {
    let data = TreeData::Nested(
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
    );
    let mut tree = Tree::build(&data).unwrap();
    collapse::initialize(&mut tree, 1);
    tree
}

const EXTENT: Extent = Extent::new(780.0, 450.0);

fn identity_of(tree: &Tree, label: &str) -> Identity {
    tree.get(tree.find_by_label(label).unwrap())
        .identity()
        .unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Item(Identity);

impl Keyed for Item {
    fn key(&self) -> Identity {
        self.0
    }
}

// =============================================================================
// Partition
// =============================================================================

#[test]
fn test_partition_is_complete_and_disjoint() {
    let mut ids = IdentitySequence::new();
    let [a, b, c, d, e]: [Item; 5] = std::array::from_fn(|_| Item(ids.next_identity()));
    let previous = [a, b, c];
    let next = [b, c, d, e];
    let out = partition(&previous, &next);

    assert_eq!(out.enter, vec![d, e]);
    assert_eq!(out.exit, vec![a]);
    assert_eq!(out.update.len(), 2);

    let all: HashSet<Identity> = previous.iter().chain(&next).map(Keyed::key).collect();
    let covered: HashSet<Identity> = out
        .entering()
        .into_iter()
        .chain(out.updating())
        .chain(out.exiting())
        .collect();
    assert_eq!(covered, all);
    assert_eq!(out.len(), all.len());
}

#[test]
fn test_partition_of_empty_frames() {
    let out = partition::<Item>(&[], &[]);
    assert!(out.is_empty());
}

// =============================================================================
// Reconciler
// =============================================================================

#[test]
fn test_first_frame_enters_everything() {
    let mut tree = scenario();
    let mut ids = IdentitySequence::new();
    let mut reconciler = Reconciler::new();

    let frame = layout(&tree, EXTENT, 180.0).unwrap();
    let changes = reconciler.reconcile(&mut tree, &mut ids, &frame);

    assert_eq!(changes.node_enter().len(), 3);
    assert_eq!(changes.link_enter().len(), 2);
    assert!(changes.node_update().is_empty());
    assert!(changes.node_exit().is_empty());
    assert_eq!(ids.issued(), 3);
}

#[test]
fn test_expand_enters_children_and_updates_the_rest() {
    let mut tree = scenario();
    let mut ids = IdentitySequence::new();
    let mut reconciler = Reconciler::new();
    let frame = layout(&tree, EXTENT, 180.0).unwrap();
    reconciler.reconcile(&mut tree, &mut ids, &frame);

    let a = tree.find_by_label("A").unwrap();
    collapse::toggle(&mut tree, a).unwrap();
    let frame = layout(&tree, EXTENT, 180.0).unwrap();
    let changes = reconciler.reconcile(&mut tree, &mut ids, &frame);

    let entering = changes.nodes.entering();
    assert_eq!(
        entering,
        HashSet::from([identity_of(&tree, "A1"), identity_of(&tree, "A2")])
    );
    assert_eq!(
        changes.nodes.updating(),
        HashSet::from([
            identity_of(&tree, "root"),
            identity_of(&tree, "A"),
            identity_of(&tree, "B"),
        ])
    );
    assert!(changes.node_exit().is_empty());
    assert_eq!(changes.link_enter().len(), 2);
    assert_eq!(changes.link_update().len(), 2);
}

#[test]
fn test_collapse_exits_children_with_same_identities() {
    let mut tree = scenario();
    let mut ids = IdentitySequence::new();
    let mut reconciler = Reconciler::new();
    let a = tree.find_by_label("A").unwrap();

    let frame = layout(&tree, EXTENT, 180.0).unwrap();
    reconciler.reconcile(&mut tree, &mut ids, &frame);
    collapse::toggle(&mut tree, a).unwrap();
    let frame = layout(&tree, EXTENT, 180.0).unwrap();
    let expanded = reconciler.reconcile(&mut tree, &mut ids, &frame);

    collapse::toggle(&mut tree, a).unwrap();
    let frame = layout(&tree, EXTENT, 180.0).unwrap();
    let collapsed = reconciler.reconcile(&mut tree, &mut ids, &frame);

    assert_eq!(collapsed.nodes.exiting(), expanded.nodes.entering());
    assert_eq!(collapsed.nodes.updating().len(), 3);
    assert!(collapsed.node_enter().is_empty());
    assert_eq!(collapsed.link_exit().len(), 2);
}

#[test]
fn test_identities_survive_toggles_and_are_never_reused() {
    let mut tree = scenario();
    let mut ids = IdentitySequence::new();
    let mut reconciler = Reconciler::new();
    let a = tree.find_by_label("A").unwrap();
    let b = tree.find_by_label("B").unwrap();

    let frame = layout(&tree, EXTENT, 180.0).unwrap();
    reconciler.reconcile(&mut tree, &mut ids, &frame);
    let root_id = identity_of(&tree, "root");

    let mut seen = HashSet::new();
    for ix in [a, b, a, b, a] {
        collapse::toggle(&mut tree, ix).unwrap();
        let frame = layout(&tree, EXTENT, 180.0).unwrap();
        reconciler.reconcile(&mut tree, &mut ids, &frame);
        for node in &reconciler.previous().nodes {
            seen.insert((node.node, node.identity));
        }
    }

    assert_eq!(identity_of(&tree, "root"), root_id);
    // One identity per node ever shown, no matter how often it was toggled.
    let identities: HashSet<Identity> = seen.iter().map(|(_, id)| *id).collect();
    let nodes: HashSet<arbor::NodeIx> = seen.iter().map(|(ix, _)| *ix).collect();
    assert_eq!(identities.len(), nodes.len());
    assert_eq!(ids.issued(), 7);
}

#[test]
fn test_links_are_keyed_by_child() {
    let mut tree = scenario();
    let mut ids = IdentitySequence::new();
    let mut reconciler = Reconciler::new();
    let frame = layout(&tree, EXTENT, 180.0).unwrap();
    let changes = reconciler.reconcile(&mut tree, &mut ids, &frame);

    let root = identity_of(&tree, "root");
    let children: HashSet<Identity> = changes.link_enter().iter().map(|l| l.identity).collect();
    assert_eq!(
        children,
        HashSet::from([identity_of(&tree, "A"), identity_of(&tree, "B")])
    );
    assert!(changes.link_enter().iter().all(|l| l.parent == root));
}
