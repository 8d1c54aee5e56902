//! Tidy tree placement along the breadth axis.
//!
//! Subtrees are packed bottom-up by comparing contours: the right edge of
//! everything already placed against the left edge of the next sibling's
//! subtree, level by level. Siblings keep one unit apart and cousins two,
//! and every parent sits midway between its first and last child.

use std::collections::HashMap;

use crate::tree::{NodeIx, Tree};

const SIBLING_SEPARATION: f32 = 1.0;
const COUSIN_SEPARATION: f32 = 2.0;

/// Leftmost and rightmost extents of a subtree per level, relative to the
/// subtree root.
#[derive(Debug)]
struct Contour {
    left: Vec<f32>,
    right: Vec<f32>,
}

impl Contour {
    fn leaf() -> Self {
        Self {
            left: vec![0.0],
            right: vec![0.0],
        }
    }
}

/// Separation between two nodes on the same level, in layout units.
pub(crate) fn separation(tree: &Tree, a: NodeIx, b: NodeIx) -> f32 {
    if tree.parent(a) == tree.parent(b) {
        SIBLING_SEPARATION
    } else {
        COUSIN_SEPARATION
    }
}

/// Unscaled breadth coordinate of every node in `order`, which must be a
/// breadth-first traversal of the visible tree starting at its root.
pub(crate) fn place(tree: &Tree, order: &[NodeIx]) -> HashMap<NodeIx, f32> {
    let mut offsets: HashMap<NodeIx, f32> = HashMap::with_capacity(order.len());
    let mut contours: HashMap<NodeIx, Contour> = HashMap::new();

    for &v in order.iter().rev() {
        let children = tree.visible_children(v);
        let (Some(&first), Some(&last)) = (children.first(), children.last()) else {
            contours.insert(v, Contour::leaf());
            continue;
        };

        let mut merged = contours.remove(&first).unwrap_or_else(Contour::leaf);
        offsets.insert(first, 0.0);

        for &child in &children[1..] {
            let contour = contours.remove(&child).unwrap_or_else(Contour::leaf);
            let shift = merged
                .right
                .iter()
                .zip(&contour.left)
                .enumerate()
                .map(|(level, (right, left))| {
                    let gap = if level == 0 {
                        SIBLING_SEPARATION
                    } else {
                        COUSIN_SEPARATION
                    };
                    right + gap - left
                })
                .fold(f32::NEG_INFINITY, f32::max);
            offsets.insert(child, shift);

            for (level, (left, right)) in contour.left.iter().zip(&contour.right).enumerate() {
                if level < merged.right.len() {
                    merged.right[level] = right + shift;
                } else {
                    merged.left.push(left + shift);
                    merged.right.push(right + shift);
                }
            }
        }

        let mid = (offsets[&first] + offsets[&last]) / 2.0;
        for child in children {
            if let Some(offset) = offsets.get_mut(child) {
                *offset -= mid;
            }
        }

        let mut contour = Contour::leaf();
        contour.left.extend(merged.left.iter().map(|x| x - mid));
        contour.right.extend(merged.right.iter().map(|x| x - mid));
        contours.insert(v, contour);
    }

    let mut absolute: HashMap<NodeIx, f32> = HashMap::with_capacity(order.len());
    for &v in order {
        let base = match tree.parent(v) {
            Some(parent) if absolute.contains_key(&parent) => absolute[&parent],
            _ => 0.0,
        };
        let x = base + offsets.get(&v).copied().unwrap_or(0.0);
        absolute.insert(v, x);
    }
    absolute
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::RawElement;

    fn leaves(name: &str, n: usize) -> RawElement {
        RawElement::new(name).children((0..n).map(|i| RawElement::new(format!("{name}{i}"))))
    }

    #[test]
    fn siblings_one_unit_apart_and_parent_centered() {
        let tree = Tree::from_nested(&leaves("r", 3));
        let order = tree.visible_nodes();
        let x = place(&tree, &order);
        let kids = tree.visible_children(tree.root());
        assert_eq!(x[&kids[0]], -1.0);
        assert_eq!(x[&kids[1]], 0.0);
        assert_eq!(x[&kids[2]], 1.0);
        assert_eq!(x[&tree.root()], 0.0);
    }

    #[test]
    fn cousins_are_pushed_two_units_apart() {
        let root = RawElement::new("r").child(leaves("a", 2)).child(leaves("b", 2));
        let tree = Tree::from_nested(&root);
        let order = tree.visible_nodes();
        let x = place(&tree, &order);
        let a = tree.find_by_label("a1").unwrap();
        let b = tree.find_by_label("b0").unwrap();
        assert_eq!(x[&b] - x[&a], COUSIN_SEPARATION);
    }
}
