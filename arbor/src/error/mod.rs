//! Error types

mod input;
mod layout;
mod options;
mod toggle;

pub use input::*;
pub use layout::*;
pub use options::*;
pub use toggle::*;

/// Any error that aborts a render cycle.
///
/// Interaction-level problems such as [`InvalidToggleError`] are recovered
/// where they happen and only appear here when an operation is asked for
/// directly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    MalformedInput(#[from] MalformedInputError),

    #[error(transparent)]
    InvalidToggle(#[from] InvalidToggleError),

    #[error(transparent)]
    Layout(#[from] LayoutInvariantViolation),

    #[error(transparent)]
    Options(#[from] OptionsError),
}
