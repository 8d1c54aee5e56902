//! Expand/collapse state.
//!
//! Toggling is the only mutation the tree sees after it is built, and it only
//! ever touches the toggled node's own [`ChildState`].

use crate::error::InvalidToggleError;
use crate::tree::{ChildState, NodeIx, Tree};

/// Depth at and below which nodes start collapsed.
pub const DEFAULT_COLLAPSE_DEPTH: usize = 1;

/// Outcome of a successful toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Expanded,
    Collapsed,
}

/// Collapse every node at depth `collapse_below_depth` or deeper.
///
/// With the default threshold of 1 the root's children stay visible and
/// everything beneath them starts stashed. Deeper subtrees are collapsed too,
/// so expanding a node reveals exactly one more level.
pub fn initialize(tree: &mut Tree, collapse_below_depth: usize) {
    let mut collapsed = 0;
    for node in tree.nodes_mut() {
        let state = std::mem::take(&mut node.children);
        node.children = match state {
            ChildState::Leaf => ChildState::Leaf,
            ChildState::Expanded(children) | ChildState::Collapsed(children) => {
                if node.depth() < collapse_below_depth {
                    ChildState::Expanded(children)
                } else {
                    collapsed += 1;
                    ChildState::Collapsed(children)
                }
            }
        };
    }
    log::debug!(
        "[collapse] initialized: {collapsed} nodes collapsed at depth >= {collapse_below_depth}"
    );
}

/// Flip a node between expanded and collapsed.
pub fn toggle(tree: &mut Tree, ix: NodeIx) -> Result<Toggled, InvalidToggleError> {
    let node = tree.get_mut(ix);
    let (next, toggled) = match std::mem::take(&mut node.children) {
        ChildState::Leaf => {
            return Err(InvalidToggleError {
                label: node.label.clone(),
            })
        }
        ChildState::Expanded(children) => (ChildState::Collapsed(children), Toggled::Collapsed),
        ChildState::Collapsed(children) => (ChildState::Expanded(children), Toggled::Expanded),
    };
    node.children = next;
    log::debug!("[collapse] {:?} {:?}", node.label, toggled);
    Ok(toggled)
}

/// Expand every node in the tree.
pub fn expand_all(tree: &mut Tree) {
    initialize(tree, usize::MAX);
}

/// Collapse every node, leaving only the root visible.
pub fn collapse_all(tree: &mut Tree) {
    initialize(tree, 0);
}
