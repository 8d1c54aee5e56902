//! Interaction errors

/// A toggle was requested on a node that has nothing to toggle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot toggle leaf node {label:?}")]
pub struct InvalidToggleError {
    /// Label of the leaf.
    pub label: String,
}
