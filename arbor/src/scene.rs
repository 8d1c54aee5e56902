//! Retained render target.
//!
//! The scene maps each identity to the handle that was last drawn for it.
//! Handles are created when an element enters, mutated while it updates, and
//! dropped once its exit transition finishes.

use std::collections::BTreeMap;

use crate::tree::{Identity, NodeIx, Tree};
use crate::types::{Color, Point};

/// Radius and opacity of an element that has not grown in yet or has
/// shrunk away. Zero would make some renderers drop the element early.
pub const VANISHED: f32 = 1e-6;

/// Horizontal distance between a node's center and its label.
pub const LABEL_OFFSET: f32 = 13.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Enter,
    Update,
    Exit,
    Idle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisual {
    pub position: Point,
    pub radius: f32,
    /// Label opacity.
    pub opacity: f32,
    pub fill: Color,
    pub stroke_width: f32,
}

impl NodeVisual {
    pub fn lerp(&self, to: &NodeVisual, t: f32) -> NodeVisual {
        NodeVisual {
            position: self.position.lerp(to.position, t),
            radius: self.radius + (to.radius - self.radius) * t,
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            fill: self.fill.lerp(&to.fill, t),
            stroke_width: self.stroke_width + (to.stroke_width - self.stroke_width) * t,
        }
    }

    /// The same node shrunk to nothing at `position`.
    pub fn vanished_at(&self, position: Point) -> NodeVisual {
        NodeVisual {
            position,
            radius: VANISHED,
            opacity: VANISHED,
            ..self.clone()
        }
    }
}

/// A link drawn from its parent (`source`) to its child (`target`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkVisual {
    pub source: Point,
    pub target: Point,
}

impl LinkVisual {
    /// A zero-length link sitting on `point`.
    pub fn degenerate(point: Point) -> Self {
        Self {
            source: point,
            target: point,
        }
    }

    pub fn lerp(&self, to: &LinkVisual, t: f32) -> LinkVisual {
        LinkVisual {
            source: self.source.lerp(to.source, t),
            target: self.target.lerp(to.target, t),
        }
    }

    /// Cubic curve from the child to the parent in screen space, where a
    /// diagram point `(x, y)` is drawn at `(y, x)`.
    pub fn path(&self) -> String {
        let s = self.target;
        let d = self.source;
        let mid = (s.y + d.y) / 2.0;
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            s.y, s.x, mid, s.x, mid, d.x, d.y, d.x
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeHandle {
    pub node: NodeIx,
    pub label: String,
    pub has_children: bool,
    pub collapsed: bool,
    pub phase: Phase,
    pub visual: NodeVisual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkHandle {
    pub parent: Identity,
    pub phase: Phase,
    pub visual: LinkVisual,
}

/// How nodes look once fully shown.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub radius: f32,
    /// Fill for collapsed nodes without their own fill.
    pub collapsed_fill: Color,
}

impl NodeStyle {
    /// Full-weight visual for `ix` at `position`.
    ///
    /// A node's own fill wins; otherwise collapsed nodes use the collapsed
    /// fill and everything else is white. Collapsed nodes get a heavier
    /// outline so hidden children stand out.
    pub fn resolve(&self, tree: &Tree, ix: NodeIx, position: Point) -> NodeVisual {
        let node = tree.get(ix);
        let collapsed = node.children().is_collapsed();
        let fill = match (&node.fill, collapsed) {
            (Some(fill), _) => fill.clone(),
            (None, true) => self.collapsed_fill.clone(),
            (None, false) => Color::WHITE,
        };
        NodeVisual {
            position,
            radius: self.radius,
            opacity: 1.0,
            fill,
            stroke_width: if collapsed { 3.0 } else { 1.0 },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: BTreeMap<Identity, NodeHandle>,
    links: BTreeMap<Identity, LinkHandle>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, identity: Identity) -> Option<&NodeHandle> {
        self.nodes.get(&identity)
    }

    pub fn link(&self, identity: Identity) -> Option<&LinkHandle> {
        self.links.get(&identity)
    }

    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = (Identity, &NodeHandle)> {
        self.nodes.iter().map(|(id, h)| (*id, h))
    }

    pub fn links(&self) -> impl DoubleEndedIterator<Item = (Identity, &LinkHandle)> {
        self.links.iter().map(|(id, h)| (*id, h))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Handle for a node reported by `tree`, created on first use.
    ///
    /// The label and expand state are refreshed from the tree; the visual is
    /// only used when the handle is new.
    pub(crate) fn upsert_node(
        &mut self,
        identity: Identity,
        tree: &Tree,
        ix: NodeIx,
        phase: Phase,
        visual: NodeVisual,
    ) -> &mut NodeHandle {
        let node = tree.get(ix);
        let handle = self.nodes.entry(identity).or_insert_with(|| NodeHandle {
            node: ix,
            label: String::new(),
            has_children: false,
            collapsed: false,
            phase,
            visual,
        });
        handle.node = ix;
        handle.label.clone_from(&node.label);
        handle.has_children = node.has_children();
        handle.collapsed = node.children().is_collapsed();
        handle.phase = phase;
        handle
    }

    pub(crate) fn node_mut(&mut self, identity: Identity) -> Option<&mut NodeHandle> {
        self.nodes.get_mut(&identity)
    }

    pub(crate) fn upsert_link(
        &mut self,
        identity: Identity,
        parent: Identity,
        phase: Phase,
        visual: LinkVisual,
    ) -> &mut LinkHandle {
        let handle = self.links.entry(identity).or_insert(LinkHandle {
            parent,
            phase,
            visual,
        });
        handle.parent = parent;
        handle.phase = phase;
        handle
    }

    pub(crate) fn link_mut(&mut self, identity: Identity) -> Option<&mut LinkHandle> {
        self.links.get_mut(&identity)
    }

    pub(crate) fn remove_node(&mut self, identity: Identity) -> Option<NodeHandle> {
        self.nodes.remove(&identity)
    }

    pub(crate) fn remove_link(&mut self, identity: Identity) -> Option<LinkHandle> {
        self.links.remove(&identity)
    }
}
