use crate::tree::NodeIx;
use crate::types::Point;

/// A visible node placed by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameNode {
    pub node: NodeIx,
    pub depth: usize,
    pub position: Point,
}

/// The edge from a visible node to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLink {
    pub parent: NodeIx,
    pub child: NodeIx,
    pub source: Point,
    pub target: Point,
}

/// One complete positioned snapshot of the visible tree.
///
/// Nodes are in breadth-first order starting at the root; links follow the
/// same order (one per non-root node).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub nodes: Vec<FrameNode>,
    pub links: Vec<FrameLink>,
}

impl Frame {
    pub fn node(&self, ix: NodeIx) -> Option<&FrameNode> {
        self.nodes.iter().find(|n| n.node == ix)
    }

    pub fn position_of(&self, ix: NodeIx) -> Option<Point> {
        self.node(ix).map(|n| n.position)
    }

    pub fn contains(&self, ix: NodeIx) -> bool {
        self.node(ix).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
