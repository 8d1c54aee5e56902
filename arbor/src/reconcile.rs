//! Identity-keyed diffing of layout frames.
//!
//! Elements are matched by [`Identity`], never by position or index, so a
//! node keeps its identity while its coordinates and the number of visible
//! nodes change on every toggle.

use std::collections::{HashMap, HashSet};

use crate::layout::Frame;
use crate::tree::{Identity, IdentitySequence, NodeIx, Tree};
use crate::types::Point;

/// A positioned node together with its identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedNode {
    pub identity: Identity,
    pub node: NodeIx,
    pub depth: usize,
    pub position: Point,
}

/// A link keyed by its child's identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedLink {
    pub identity: Identity,
    pub parent: Identity,
    pub source: Point,
    pub target: Point,
}

/// A frame whose elements all carry identities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedFrame {
    pub nodes: Vec<RenderedNode>,
    pub links: Vec<RenderedLink>,
}

pub trait Keyed {
    fn key(&self) -> Identity;
}

impl Keyed for RenderedNode {
    fn key(&self) -> Identity {
        self.identity
    }
}

impl Keyed for RenderedLink {
    fn key(&self) -> Identity {
        self.identity
    }
}

/// An element present in both frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Update<T> {
    pub previous: T,
    pub next: T,
}

/// Enter/update/exit classification of one element kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    /// Only in the next frame, in next-frame order.
    pub enter: Vec<T>,
    /// In both frames, in next-frame order.
    pub update: Vec<Update<T>>,
    /// Only in the previous frame, in previous-frame order.
    pub exit: Vec<T>,
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self {
            enter: Vec::new(),
            update: Vec::new(),
            exit: Vec::new(),
        }
    }
}

impl<T: Keyed> Partition<T> {
    pub fn entering(&self) -> HashSet<Identity> {
        self.enter.iter().map(Keyed::key).collect()
    }

    pub fn updating(&self) -> HashSet<Identity> {
        self.update.iter().map(|u| u.next.key()).collect()
    }

    pub fn exiting(&self) -> HashSet<Identity> {
        self.exit.iter().map(Keyed::key).collect()
    }

    pub fn len(&self) -> usize {
        self.enter.len() + self.update.len() + self.exit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of one reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    pub nodes: Partition<RenderedNode>,
    pub links: Partition<RenderedLink>,
}

impl Reconciliation {
    pub fn node_enter(&self) -> &[RenderedNode] {
        &self.nodes.enter
    }

    pub fn node_update(&self) -> &[Update<RenderedNode>] {
        &self.nodes.update
    }

    pub fn node_exit(&self) -> &[RenderedNode] {
        &self.nodes.exit
    }

    pub fn link_enter(&self) -> &[RenderedLink] {
        &self.links.enter
    }

    pub fn link_update(&self) -> &[Update<RenderedLink>] {
        &self.links.update
    }

    pub fn link_exit(&self) -> &[RenderedLink] {
        &self.links.exit
    }
}

/// Classify `previous ∪ next` by identity. Each element lands in exactly one
/// of enter, update or exit.
pub fn partition<T: Keyed + Copy>(previous: &[T], next: &[T]) -> Partition<T> {
    let before: HashMap<Identity, &T> = previous.iter().map(|e| (e.key(), e)).collect();
    let after: HashSet<Identity> = next.iter().map(Keyed::key).collect();

    let mut out = Partition::default();
    for element in next {
        match before.get(&element.key()) {
            Some(&&previous) => out.update.push(Update {
                previous,
                next: *element,
            }),
            None => out.enter.push(*element),
        }
    }
    out.exit = previous
        .iter()
        .filter(|e| !after.contains(&e.key()))
        .copied()
        .collect();
    out
}

/// Diff two identity-carrying frames.
pub fn diff(previous: &RenderedFrame, next: &RenderedFrame) -> Reconciliation {
    Reconciliation {
        nodes: partition(&previous.nodes, &next.nodes),
        links: partition(&previous.links, &next.links),
    }
}

/// Holds the previously rendered frame and diffs each new layout against it.
#[derive(Debug, Default)]
pub struct Reconciler {
    previous: RenderedFrame,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The frame produced by the last call to [`reconcile`](Self::reconcile).
    pub fn previous(&self) -> &RenderedFrame {
        &self.previous
    }

    /// Diff `next` against the stored frame, then store it.
    ///
    /// Nodes appearing for the first time are given an identity from `ids`.
    pub fn reconcile(
        &mut self,
        tree: &mut Tree,
        ids: &mut IdentitySequence,
        next: &Frame,
    ) -> Reconciliation {
        let rendered = materialize(tree, ids, next);
        let changes = diff(&self.previous, &rendered);
        log::debug!(
            "[reconcile] nodes: {} enter, {} update, {} exit; links: {} enter, {} update, {} exit",
            changes.nodes.enter.len(),
            changes.nodes.update.len(),
            changes.nodes.exit.len(),
            changes.links.enter.len(),
            changes.links.update.len(),
            changes.links.exit.len(),
        );
        self.previous = rendered;
        changes
    }
}

fn materialize(tree: &mut Tree, ids: &mut IdentitySequence, frame: &Frame) -> RenderedFrame {
    let mut identities: HashMap<NodeIx, Identity> = HashMap::with_capacity(frame.len());
    let nodes = frame
        .nodes
        .iter()
        .map(|n| {
            let identity = tree.ensure_identity(n.node, ids);
            identities.insert(n.node, identity);
            RenderedNode {
                identity,
                node: n.node,
                depth: n.depth,
                position: n.position,
            }
        })
        .collect();

    // Every link's endpoints are frame nodes, so both lookups succeed.
    let links = frame
        .links
        .iter()
        .filter_map(|l| {
            Some(RenderedLink {
                identity: *identities.get(&l.child)?,
                parent: *identities.get(&l.parent)?,
                source: l.source,
                target: l.target,
            })
        })
        .collect();

    RenderedFrame { nodes, links }
}
