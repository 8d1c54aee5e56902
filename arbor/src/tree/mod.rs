//! Navigable tree model.
//!
//! Nodes live in an arena owned by [`Tree`]. A parent owns the ordered list of
//! its children's indices; the `parent` field on a child is a plain back
//! reference used for path reconstruction and never for downward traversal.

mod build;
mod data;
mod identity;

use std::collections::VecDeque;

use serde_json::{Map, Value};

pub use data::{NetworkRow, RawElement, TreeData};
pub use identity::{Identity, IdentitySequence};

use crate::types::{Color, Point};

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIx(usize);

impl NodeIx {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Expand/collapse state of a node's children.
///
/// A collapsed node keeps the very same child indices it shows when expanded,
/// so a collapse followed by an expand restores the subtree untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChildState {
    #[default]
    Leaf,
    Expanded(Vec<NodeIx>),
    Collapsed(Vec<NodeIx>),
}

impl ChildState {
    /// All children, visible or stashed.
    pub fn all(&self) -> &[NodeIx] {
        match self {
            ChildState::Leaf => &[],
            ChildState::Expanded(children) | ChildState::Collapsed(children) => children,
        }
    }

    /// Children that take part in layout.
    pub fn visible(&self) -> &[NodeIx] {
        match self {
            ChildState::Expanded(children) => children,
            ChildState::Leaf | ChildState::Collapsed(_) => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ChildState::Leaf)
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self, ChildState::Collapsed(_))
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub label: String,
    pub weight: Option<Value>,
    pub fill: Option<Color>,
    pub attributes: Map<String, Value>,
    identity: Option<Identity>,
    parent: Option<NodeIx>,
    pub(crate) children: ChildState,
    depth: usize,
    position: Option<Point>,
    previous_position: Option<Point>,
}

impl Node {
    pub fn identity(&self) -> Option<Identity> {
        self.identity
    }

    pub fn parent(&self) -> Option<NodeIx> {
        self.parent
    }

    pub fn children(&self) -> &ChildState {
        &self.children
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Position from the most recent layout, if the node was visible.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Position at the start of the most recent completed transition.
    pub fn previous_position(&self) -> Option<Point> {
        self.previous_position
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_leaf()
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn root(&self) -> NodeIx {
        NodeIx(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, ix: NodeIx) -> &Node {
        &self.nodes[ix.0]
    }

    pub(crate) fn get_mut(&mut self, ix: NodeIx) -> &mut Node {
        &mut self.nodes[ix.0]
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIx, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIx(i), n))
    }

    pub fn parent(&self, ix: NodeIx) -> Option<NodeIx> {
        self.get(ix).parent
    }

    pub fn visible_children(&self, ix: NodeIx) -> &[NodeIx] {
        self.get(ix).children.visible()
    }

    /// First node in pre-order whose label matches.
    pub fn find_by_label(&self, label: &str) -> Option<NodeIx> {
        self.iter().find(|(_, n)| n.label == label).map(|(ix, _)| ix)
    }

    /// Ancestor chain from the root down to and including `ix`.
    pub fn path_to(&self, ix: NodeIx) -> Vec<NodeIx> {
        let mut path = vec![ix];
        let mut current = ix;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Visible nodes in breadth-first order, starting at the root.
    pub fn visible_nodes(&self) -> Vec<NodeIx> {
        self.visible_descendants(self.root())
    }

    /// `ix` and every node reachable from it through expanded children, in
    /// breadth-first order.
    pub fn visible_descendants(&self, ix: NodeIx) -> Vec<NodeIx> {
        let mut order = Vec::new();
        let mut queue = VecDeque::from([ix]);
        while let Some(current) = queue.pop_front() {
            order.push(current);
            queue.extend(self.visible_children(current).iter().copied());
        }
        order
    }

    /// Whether `ix` is currently part of the visible tree.
    pub fn is_visible(&self, ix: NodeIx) -> bool {
        let mut current = ix;
        while let Some(parent) = self.parent(current) {
            if self.get(parent).children.is_collapsed() {
                return false;
            }
            current = parent;
        }
        true
    }

    /// Number of leaves below `ix`, counting collapsed subtrees.
    pub fn leaf_count(&self, ix: NodeIx) -> usize {
        let mut count = 0;
        let mut stack = vec![ix];
        while let Some(current) = stack.pop() {
            let children = self.get(current).children.all();
            if children.is_empty() {
                count += 1;
            }
            stack.extend(children.iter().copied());
        }
        count
    }

    /// Value of a named attribute for display.
    ///
    /// Looks at the element's own fields first, then falls back to the
    /// computed `leafCount`, then to the node weight.
    pub fn attribute(&self, ix: NodeIx, name: &str) -> Option<Value> {
        let node = self.get(ix);
        if let Some(value) = node.attributes.get(name) {
            return Some(value.clone());
        }
        if name == "leafCount" {
            return Some(Value::from(self.leaf_count(ix)));
        }
        node.weight.clone()
    }

    /// Returns the node's identity, allocating one on first use.
    pub fn ensure_identity(&mut self, ix: NodeIx, ids: &mut IdentitySequence) -> Identity {
        let node = self.get_mut(ix);
        *node.identity.get_or_insert_with(|| ids.next_identity())
    }

    pub(crate) fn set_position(&mut self, ix: NodeIx, position: Point) {
        self.get_mut(ix).position = Some(position);
    }

    pub(crate) fn set_previous_position(&mut self, ix: NodeIx, position: Point) {
        self.get_mut(ix).previous_position = Some(position);
    }

    /// Prime the next cycle: every visible node's previous position becomes
    /// its current one.
    pub(crate) fn commit_positions(&mut self) {
        for ix in self.visible_nodes() {
            let node = self.get_mut(ix);
            if let Some(position) = node.position {
                node.previous_position = Some(position);
            }
        }
    }
}
