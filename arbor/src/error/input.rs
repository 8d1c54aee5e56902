//! Input validation errors

/// The input data does not describe a strict tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedInputError {
    /// No elements were supplied.
    #[error("tree data is empty")]
    Empty,

    /// A node is reachable from itself.
    #[error("cycle detected at node {label:?}")]
    Cycle {
        /// Label of the first node found on the cycle.
        label: String,
    },

    /// A node is claimed as a child by more than one parent.
    #[error("node {label:?} has more than one parent ({first:?} and {second:?})")]
    MultipleParents {
        /// Label of the child node.
        label: String,
        /// Parent seen first.
        first: String,
        /// Parent seen second.
        second: String,
    },

    /// A row references a parent that does not exist.
    #[error("node {label:?} references unknown parent {parent:?}")]
    UnknownParent {
        /// Label of the orphaned node.
        label: String,
        /// The missing parent label.
        parent: String,
    },

    /// More than one row has no parent.
    #[error("multiple roots: {first:?} and {second:?}")]
    MultipleRoots {
        /// Root seen first.
        first: String,
        /// Root seen second.
        second: String,
    },

    /// Every row has a parent, so there is nowhere to start.
    #[error("no root node: every row names a parent")]
    NoRoot,
}
