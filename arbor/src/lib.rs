//! Collapsible tree diagrams.
//!
//! A [`Diagram`] takes hierarchical data, lays out the visible part of it as a
//! tidy left-to-right tree and animates every change between layouts: clicking
//! a node expands or collapses it, new nodes grow out of the clicked one and
//! hidden ones shrink back into it.
//!
//! ```ignore
//! let payload = RenderPayload::from_json(&json)?;
//! let mut diagram = Diagram::new(payload, Extent::new(960.0, 500.0), Instant::now())?;
//! let notifications = diagram.handle_event(Event::Click { x, y }, Instant::now())?;
//! while !diagram.tick(Instant::now()) { /* draw diagram.scene() */ }
//! ```

pub mod animation;
pub mod collapse;
pub mod diagram;
pub mod error;
pub mod event;
pub mod hit;
pub mod layout;
pub mod options;
pub mod reconcile;
pub mod scene;
pub mod svg;
pub mod text;
pub mod transitions;
pub mod tree;
pub mod types;

pub use animation::{TransitionDriver, TransitionOrigin};
pub use collapse::Toggled;
pub use diagram::Diagram;
pub use error::{Error, InvalidToggleError, LayoutInvariantViolation, MalformedInputError, OptionsError};
pub use event::{Event, Notification, Selection, SelectionPath, TooltipRequest};
pub use hit::hit_test;
pub use layout::{layout, Frame};
pub use options::{Options, RenderPayload};
pub use reconcile::{Reconciler, Reconciliation};
pub use scene::{NodeHandle, Phase, Scene};
pub use transitions::{Easing, TransitionConfig};
pub use tree::{Identity, NodeIx, Tree, TreeData};
pub use types::*;
