//! Layout engine: visible tree in, positioned [`Frame`] out.
//!
//! Breadth coordinates come from the tidy placement in [`tidy`] and are scaled
//! to fill the extent's height; depth coordinates use a fixed step per level
//! so a deep, narrow subtree never gets squeezed.

mod frame;
mod tidy;

use std::collections::HashMap;

pub use frame::{Frame, FrameLink, FrameNode};

use crate::error::LayoutInvariantViolation;
use crate::tree::{NodeIx, Tree};
use crate::types::{Extent, Point};

/// Position every visible node.
///
/// `extent.height` is the room available along the breadth axis. The depth
/// axis advances by `level_spacing` per level; when that is not a positive
/// number the levels are spread across `extent.width` instead.
///
/// The same tree shape and collapse state always yield bit-identical output.
pub fn layout(
    tree: &Tree,
    extent: Extent,
    level_spacing: f32,
) -> Result<Frame, LayoutInvariantViolation> {
    let order = tree.visible_nodes();
    let raw = tidy::place(tree, &order);

    let (left, right) = extremes(&order, &raw);
    let s = if left == right {
        1.0
    } else {
        tidy::separation(tree, left, right) / 2.0
    };
    let tx = s - raw[&left];
    let kx = extent.height / (raw[&right] + s + tx);

    let step = if level_spacing.is_finite() && level_spacing > 0.0 {
        level_spacing
    } else {
        let deepest = order
            .iter()
            .map(|&ix| tree.get(ix).depth())
            .max()
            .unwrap_or(0);
        extent.width / deepest.max(1) as f32
    };

    let positions: HashMap<NodeIx, Point> = order
        .iter()
        .map(|&ix| {
            let depth = tree.get(ix).depth();
            (ix, Point::new((raw[&ix] + tx) * kx, depth as f32 * step))
        })
        .collect();

    let nodes: Vec<FrameNode> = order
        .iter()
        .map(|&ix| FrameNode {
            node: ix,
            depth: tree.get(ix).depth(),
            position: positions[&ix],
        })
        .collect();

    let links = order
        .iter()
        .filter_map(|&child| {
            let parent = tree.parent(child)?;
            Some(FrameLink {
                parent,
                child,
                source: positions[&parent],
                target: positions[&child],
            })
        })
        .collect();

    let frame = Frame { nodes, links };
    check_invariants(tree, &frame)?;
    log::trace!("[layout] {} nodes placed in {:?}", frame.len(), extent);
    Ok(frame)
}

/// First leftmost and first rightmost node in traversal order.
fn extremes(order: &[NodeIx], raw: &HashMap<NodeIx, f32>) -> (NodeIx, NodeIx) {
    let mut left = order[0];
    let mut right = order[0];
    for &ix in order {
        if raw[&ix] < raw[&left] {
            left = ix;
        }
        if raw[&ix] > raw[&right] {
            right = ix;
        }
    }
    (left, right)
}

/// Verify the guarantees the reconciler and renderer rely on.
pub fn check_invariants(tree: &Tree, frame: &Frame) -> Result<(), LayoutInvariantViolation> {
    let mut by_depth: HashMap<usize, Vec<&FrameNode>> = HashMap::new();
    let mut breadth: HashMap<NodeIx, f32> = HashMap::with_capacity(frame.len());
    for node in &frame.nodes {
        let p = node.position;
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(LayoutInvariantViolation::NonFinite {
                node: node.node.index(),
            });
        }
        breadth.insert(node.node, p.x);
        by_depth.entry(node.depth).or_default().push(node);
    }

    for (&depth, nodes) in by_depth.iter_mut() {
        nodes.sort_by(|a, b| a.position.x.total_cmp(&b.position.x));
        for pair in nodes.windows(2) {
            if pair[0].position.x == pair[1].position.x {
                return Err(LayoutInvariantViolation::Overlap {
                    depth,
                    first: pair[0].node.index(),
                    second: pair[1].node.index(),
                    x: pair[0].position.x,
                });
            }
        }
    }

    for node in &frame.nodes {
        let children = tree.visible_children(node.node);
        let xs = children.iter().filter_map(|c| breadth.get(c).copied());
        let (min, max) = xs.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
        if min > max {
            continue;
        }
        let x = node.position.x;
        let tolerance = 1e-3 * x.abs().max(1.0);
        if x < min - tolerance || x > max + tolerance {
            return Err(LayoutInvariantViolation::ParentOutsideChildren {
                parent: node.node.index(),
                x,
                min,
                max,
            });
        }
    }

    Ok(())
}
