//! Layout invariant errors

/// The layout engine produced geometry that breaks its own guarantees.
///
/// This always indicates a bug in the engine. The render cycle that produced
/// it is abandoned and the previous frame stays on screen.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutInvariantViolation {
    /// Two visible nodes at the same depth share a breadth coordinate.
    #[error("nodes {first} and {second} overlap at depth {depth} (x = {x})")]
    Overlap {
        /// Depth of both nodes.
        depth: usize,
        /// Arena index of the first node.
        first: usize,
        /// Arena index of the second node.
        second: usize,
        /// The shared coordinate.
        x: f32,
    },

    /// A parent is not centered within the range of its visible children.
    #[error("parent {parent} at x = {x} lies outside its children's range [{min}, {max}]")]
    ParentOutsideChildren {
        /// Arena index of the parent.
        parent: usize,
        /// Parent coordinate.
        x: f32,
        /// Lowest child coordinate.
        min: f32,
        /// Highest child coordinate.
        max: f32,
    },

    /// A coordinate came out as NaN or infinite.
    #[error("node {node} has a non-finite position")]
    NonFinite {
        /// Arena index of the node.
        node: usize,
    },
}
