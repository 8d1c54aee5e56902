use arbor::collapse;
use arbor::layout::{check_invariants, layout};
use arbor::tree::RawElement;
use arbor::{Extent, Tree, TreeData};

const EPS: f32 = 1e-3;

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
    Tree::build(&data).unwrap()
}

/// Root with `width` children, each with `width` children, `depth` levels deep.
fn bushy(width: usize, depth: usize) -> Tree {
    fn grow(name: String, width: usize, depth: usize) -> RawElement {
        let el = RawElement::new(name.clone());
        if depth == 0 {
            return el;
        }
        el.children((0..width).map(|i| grow(format!("{name}.{i}"), width, depth - 1)))
    }
    Tree::build(&TreeData::Nested(grow("n".into(), width, depth))).unwrap()
}

fn position(tree: &Tree, frame: &arbor::Frame, label: &str) -> arbor::Point {
    frame
        .position_of(tree.find_by_label(label).unwrap())
        .unwrap()
}

// =============================================================================
// Placement
// =============================================================================

#[test]
fn test_collapsed_children_are_spread_around_root() {
    let mut tree = scenario();
    collapse::initialize(&mut tree, 1);
    let frame = layout(&tree, Extent::new(780.0, 450.0), 180.0).unwrap();

    assert_eq!(frame.len(), 3);
    let root = position(&tree, &frame, "root");
    let a = position(&tree, &frame, "A");
    let b = position(&tree, &frame, "B");

    assert!((a.x - 112.5).abs() < EPS);
    assert!((b.x - 337.5).abs() < EPS);
    assert!((root.x - 225.0).abs() < EPS);
    assert!(a.x < b.x);

    assert_eq!(root.y, 0.0);
    assert_eq!(a.y, 180.0);
    assert_eq!(b.y, 180.0);
}

#[test]
fn test_single_node_is_centered() {
    let tree = Tree::build(&TreeData::Nested(RawElement::new("alone"))).unwrap();
    let frame = layout(&tree, Extent::new(100.0, 200.0), 180.0).unwrap();
    assert_eq!(frame.len(), 1);
    assert!(frame.links.is_empty());
    assert!((frame.nodes[0].position.x - 100.0).abs() < EPS);
}

#[test]
fn test_cousins_get_more_room_than_siblings() {
    let mut tree = scenario();
    collapse::expand_all(&mut tree);
    let frame = layout(&tree, Extent::new(780.0, 700.0), 180.0).unwrap();

    let a1 = position(&tree, &frame, "A1");
    let a2 = position(&tree, &frame, "A2");
    let b1 = position(&tree, &frame, "B1");
    let sibling_gap = a2.x - a1.x;
    let cousin_gap = b1.x - a2.x;
    assert!((cousin_gap - 2.0 * sibling_gap).abs() < EPS);
}

#[test]
fn test_non_positive_level_spacing_spreads_over_width() {
    let mut tree = scenario();
    collapse::expand_all(&mut tree);
    let frame = layout(&tree, Extent::new(600.0, 300.0), 0.0).unwrap();
    assert_eq!(position(&tree, &frame, "A").y, 300.0);
    assert_eq!(position(&tree, &frame, "A1").y, 600.0);
}

#[test]
fn test_links_join_parent_and_child_positions() {
    let mut tree = scenario();
    collapse::expand_all(&mut tree);
    let frame = layout(&tree, Extent::new(780.0, 450.0), 180.0).unwrap();

    assert_eq!(frame.links.len(), frame.len() - 1);
    for link in &frame.links {
        assert_eq!(Some(link.source), frame.position_of(link.parent));
        assert_eq!(Some(link.target), frame.position_of(link.child));
        assert_eq!(tree.parent(link.child), Some(link.parent));
    }
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn test_no_overlap_at_any_depth() {
    let mut tree = bushy(3, 4);
    collapse::expand_all(&mut tree);
    let frame = layout(&tree, Extent::new(900.0, 2000.0), 120.0).unwrap();
    assert_eq!(frame.len(), tree.len());
    check_invariants(&tree, &frame).unwrap();
}

#[test]
fn test_parent_within_children_range() {
    let mut tree = bushy(4, 3);
    collapse::expand_all(&mut tree);
    let first = tree.find_by_label("n.0").unwrap();
    collapse::toggle(&mut tree, first).unwrap();
    let frame = layout(&tree, Extent::new(900.0, 1200.0), 120.0).unwrap();

    for node in &frame.nodes {
        let xs: Vec<f32> = tree
            .visible_children(node.node)
            .iter()
            .map(|&c| frame.position_of(c).unwrap().x)
            .collect();
        if xs.is_empty() {
            continue;
        }
        let min = xs.iter().copied().fold(f32::INFINITY, f32::min);
        let max = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(node.position.x >= min - EPS && node.position.x <= max + EPS);
    }
}

#[test]
fn test_layout_is_deterministic() {
    let mut tree = bushy(3, 3);
    collapse::initialize(&mut tree, 2);
    let extent = Extent::new(960.0, 500.0);
    let first = layout(&tree, extent, 180.0).unwrap();
    let second = layout(&tree, extent, 180.0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_hidden_nodes_are_not_placed() {
    let mut tree = scenario();
    collapse::initialize(&mut tree, 1);
    let frame = layout(&tree, Extent::new(780.0, 450.0), 180.0).unwrap();
    assert!(!frame.contains(tree.find_by_label("A1").unwrap()));
}

#[test]
fn test_tiny_extent_still_separates_nodes() {
    let mut tree = bushy(5, 2);
    collapse::expand_all(&mut tree);
    let frame = layout(&tree, Extent::new(1.0, 1.0), 10.0).unwrap();
    check_invariants(&tree, &frame).unwrap();
}
