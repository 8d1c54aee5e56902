//! Diagram state and interaction handling.
//!
//! A [`Diagram`] owns everything one rendered instance needs: the tree, its
//! options, the identity sequence, the last frame, the transition driver and
//! the scene. Every entry point takes `&mut self` and the current frame-clock
//! time, so a toggle and the layout that follows it happen as one step that no
//! other event can observe half-done.

use std::time::Instant;

use crate::animation::{TransitionDriver, TransitionOrigin};
use crate::collapse;
use crate::error::Error;
use crate::event::{Event, Notification, Selection, SelectionPath, TooltipRequest};
use crate::hit::hit_test;
use crate::layout::{layout, Frame};
use crate::options::{Options, RenderPayload};
use crate::reconcile::{Reconciler, Reconciliation};
use crate::scene::{NodeStyle, Scene};
use crate::svg;
use crate::tree::{Identity, IdentitySequence, NodeIx, Tree};
use crate::types::{Extent, Point};

/// Vertical offset of the tooltip above the pointer.
const TOOLTIP_OFFSET: f32 = 28.0;

#[derive(Debug)]
pub struct Diagram {
    tree: Tree,
    options: Options,
    ids: IdentitySequence,
    surface: Extent,
    reconciler: Reconciler,
    driver: TransitionDriver,
    scene: Scene,
    frame: Frame,
    last_changes: Reconciliation,
    hovered: Option<Identity>,
}

/// A validated tree and its first frame, ready to be swapped in.
struct Prepared {
    tree: Tree,
    options: Options,
    frame: Frame,
}

impl Diagram {
    /// Build a diagram and start its first transition: every visible node
    /// grows out of the root.
    pub fn new(payload: RenderPayload, surface: Extent, now: Instant) -> Result<Self, Error> {
        let Prepared {
            tree,
            options,
            frame,
        } = Self::prepare(payload, surface)?;
        let mut diagram = Self {
            driver: TransitionDriver::new(options.transition_config()),
            tree,
            options,
            ids: IdentitySequence::new(),
            surface,
            reconciler: Reconciler::new(),
            scene: Scene::new(),
            frame: Frame::default(),
            last_changes: Reconciliation::default(),
            hovered: None,
        };
        let root = diagram.tree.root();
        diagram.apply(frame, root, now);
        Ok(diagram)
    }

    /// Replace the tree and options wholesale.
    ///
    /// Identities keep counting from where the old tree left off, so nothing
    /// from the new data can be mistaken for an old node. A tooltip shown for
    /// the old data is hidden. On error the current diagram is left untouched.
    pub fn render(
        &mut self,
        payload: RenderPayload,
        now: Instant,
    ) -> Result<Vec<Notification>, Error> {
        let Prepared {
            tree,
            options,
            frame,
        } = Self::prepare(payload, self.surface)?;
        let notifications: Vec<Notification> = self.hover_end().into_iter().collect();

        self.tree = tree;
        self.driver.set_config(options.transition_config());
        self.options = options;
        self.hovered = None;
        let root = self.tree.root();
        self.apply(frame, root, now);
        Ok(notifications)
    }

    fn prepare(payload: RenderPayload, surface: Extent) -> Result<Prepared, Error> {
        let RenderPayload { data, options } = payload;
        options.validate()?;
        let mut tree = Tree::build(&data)?;
        collapse::initialize(&mut tree, options.collapse_below_depth);

        let inner = surface.inner(&options.margin);
        let root = tree.root();
        tree.set_previous_position(root, Point::new(inner.height / 2.0, 0.0));

        let frame = layout(&tree, inner, options.level_spacing)?;
        Ok(Prepared {
            tree,
            options,
            frame,
        })
    }

    /// Reconcile `frame` against the last one and start transitions that
    /// treat `origin` as the node the change came from.
    fn apply(&mut self, frame: Frame, origin: NodeIx, now: Instant) {
        for node in &frame.nodes {
            self.tree.set_position(node.node, node.position);
        }

        self.driver.sample(&mut self.scene, now);
        let origin = self.origin(origin, &frame);
        let changes = self
            .reconciler
            .reconcile(&mut self.tree, &mut self.ids, &frame);
        let style = self.node_style();
        self.driver
            .begin(&mut self.scene, &changes, &self.tree, &style, origin, now);
        if !self.driver.is_active() {
            self.tree.commit_positions();
        }

        self.frame = frame;
        self.last_changes = changes;
    }

    /// Where the origin node is drawn right now, and where it is headed.
    fn origin(&self, ix: NodeIx, frame: &Frame) -> TransitionOrigin {
        let node = self.tree.get(ix);
        let current = frame
            .position_of(ix)
            .or(node.position())
            .unwrap_or_default();
        let previous = node
            .identity()
            .and_then(|id| self.scene.node(id))
            .map(|handle| handle.visual.position)
            .or(node.previous_position())
            .unwrap_or(current);
        TransitionOrigin { previous, current }
    }

    fn node_style(&self) -> NodeStyle {
        NodeStyle {
            radius: self.options.node_radius,
            collapsed_fill: self.options.fill_color.clone(),
        }
    }

    /// Toggle `ix` and animate the diagram around it.
    ///
    /// Clicking a leaf does nothing. Otherwise the tooltip is hidden and, if a
    /// selection channel is configured, a selection notification carrying the
    /// root-to-node path is emitted.
    pub fn click(&mut self, ix: NodeIx, now: Instant) -> Result<Vec<Notification>, Error> {
        let mut notifications = Vec::new();

        if let Err(e) = collapse::toggle(&mut self.tree, ix) {
            log::debug!("[diagram] ignoring click: {e}");
            return Ok(notifications);
        }

        let frame = match layout(&self.tree, self.inner_extent(), self.options.level_spacing) {
            Ok(frame) => frame,
            Err(e) => {
                // Undo the toggle so the tree still matches the frame on screen.
                let _ = collapse::toggle(&mut self.tree, ix);
                log::warn!("[diagram] layout failed, keeping last frame: {e}");
                return Err(e.into());
            }
        };
        self.apply(frame, ix, now);

        if self.options.show_tooltip {
            self.hovered = None;
            notifications.push(Notification::Tooltip(TooltipRequest::Hide));
        }
        if let Some(selection) = self.selection(ix) {
            log::debug!("[diagram] selection on {}", selection.channel);
            notifications.push(Notification::Selection(selection));
        }
        Ok(notifications)
    }

    /// Root-first path to `ix` keyed by hierarchy level name, if selection
    /// notifications are enabled.
    pub fn selection(&self, ix: NodeIx) -> Option<Selection> {
        let channel = self.options.selection_channel.clone()?;
        let entries = self
            .options
            .hierarchy_names
            .iter()
            .zip(self.tree.path_to(ix))
            .map(|(level, node)| (level.clone(), self.tree.get(node).label.clone()))
            .collect();
        Some(Selection {
            channel,
            path: SelectionPath::new(entries),
        })
    }

    /// Tooltip request for hovering `ix` with the pointer at `pointer`
    /// (surface coordinates).
    pub fn hover(&self, ix: NodeIx, pointer: Point) -> Option<Notification> {
        if !self.options.show_tooltip {
            return None;
        }
        let attribute = &self.options.tooltip_attribute;
        let value = self.tree.attribute(ix, attribute).map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
        Some(Notification::Tooltip(TooltipRequest::Show {
            label: self.tree.get(ix).label.clone(),
            attribute: attribute.clone(),
            value,
            x: pointer.x,
            y: pointer.y - TOOLTIP_OFFSET,
            font_size: self.options.font_size + 1.0,
        }))
    }

    pub fn hover_end(&self) -> Option<Notification> {
        self.options
            .show_tooltip
            .then_some(Notification::Tooltip(TooltipRequest::Hide))
    }

    /// Resize the surface and lay out again.
    ///
    /// Transitions in flight are cut short: exiting elements disappear at
    /// once and everything else restarts from where it was headed.
    /// Nothing changes if the new extents cannot be laid out.
    pub fn resize(&mut self, width: f32, height: f32, now: Instant) -> Result<(), Error> {
        let surface = Extent::new(width, height);
        let frame = layout(
            &self.tree,
            surface.inner(&self.options.margin),
            self.options.level_spacing,
        )
        .inspect_err(|e| log::warn!("[diagram] rejected resize to {width}x{height}: {e}"))?;

        self.surface = surface;
        self.driver.finish(&mut self.scene);
        self.tree.commit_positions();
        let root = self.tree.root();
        self.apply(frame, root, now);
        log::debug!("[diagram] resized to {width}x{height}");
        Ok(())
    }

    /// Expand every node and animate from the root.
    pub fn expand_all(&mut self, now: Instant) -> Result<(), Error> {
        self.restructure(collapse::expand_all, now)
    }

    /// Collapse everything below the root and animate back into it.
    pub fn collapse_all(&mut self, now: Instant) -> Result<(), Error> {
        self.restructure(collapse::collapse_all, now)
    }

    /// Apply a collapse-state change to the whole tree as one step. If the
    /// result cannot be laid out the previous state is restored.
    fn restructure(&mut self, change: fn(&mut Tree), now: Instant) -> Result<(), Error> {
        let before = self.tree.clone();
        change(&mut self.tree);
        match layout(&self.tree, self.inner_extent(), self.options.level_spacing) {
            Ok(frame) => {
                let root = self.tree.root();
                self.apply(frame, root, now);
                Ok(())
            }
            Err(e) => {
                self.tree = before;
                log::warn!("[diagram] layout failed, keeping last frame: {e}");
                Err(e.into())
            }
        }
    }

    /// Advance transitions to `now`. Returns true when nothing is left to
    /// animate. Once the last transition ends every node's previous position
    /// is primed for the next cycle.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.driver.tick(&mut self.scene, now) {
            self.tree.commit_positions();
        }
        !self.driver.is_active()
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) -> Result<Vec<Notification>, Error> {
        match event {
            Event::Click { x, y } => match self.node_at(x, y) {
                Some(ix) => self.click(ix, now),
                None => Ok(Vec::new()),
            },
            Event::MouseMove { x, y } => {
                let hit = self.identity_at(x, y);
                if hit == self.hovered {
                    return Ok(Vec::new());
                }
                self.hovered = hit;
                let request = match hit.and_then(|id| self.scene.node(id)) {
                    Some(handle) => self.hover(handle.node, Point::new(x, y)),
                    None => self.hover_end(),
                };
                Ok(request.into_iter().collect())
            }
            Event::MouseLeave => {
                if self.hovered.take().is_none() {
                    return Ok(Vec::new());
                }
                Ok(self.hover_end().into_iter().collect())
            }
            Event::Resize { width, height } => {
                self.resize(width, height, now)?;
                Ok(Vec::new())
            }
        }
    }

    /// Handle a batch of events that arrived in the same tick. Resizes go
    /// first so clicks are resolved against the new geometry.
    pub fn handle_events(
        &mut self,
        events: &[Event],
        now: Instant,
    ) -> Result<Vec<Notification>, Error> {
        let (resizes, others): (Vec<Event>, Vec<Event>) =
            events.iter().partition(|e| e.is_resize());
        let mut notifications = Vec::new();
        for event in resizes.into_iter().chain(others) {
            notifications.extend(self.handle_event(event, now)?);
        }
        Ok(notifications)
    }

    fn identity_at(&self, x: f32, y: f32) -> Option<Identity> {
        hit_test(&self.scene, self.to_diagram(x, y), self.options.font_size)
    }

    /// Node under the surface point `(x, y)`.
    pub fn node_at(&self, x: f32, y: f32) -> Option<NodeIx> {
        let identity = self.identity_at(x, y)?;
        self.scene.node(identity).map(|handle| handle.node)
    }

    /// Convert surface coordinates to diagram space.
    pub fn to_diagram(&self, x: f32, y: f32) -> Point {
        let margin = &self.options.margin;
        Point::new(y - margin.top, x - margin.left)
    }

    /// Convert a diagram point to surface coordinates.
    pub fn to_surface(&self, point: Point) -> (f32, f32) {
        let margin = &self.options.margin;
        (point.y + margin.left, point.x + margin.top)
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.driver.set_reduced_motion(enabled);
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_active()
    }

    pub fn inner_extent(&self) -> Extent {
        self.surface.inner(&self.options.margin)
    }

    pub fn surface(&self) -> Extent {
        self.surface
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Changes computed by the most recent render cycle.
    pub fn last_changes(&self) -> &Reconciliation {
        &self.last_changes
    }

    /// The scene as an SVG document.
    pub fn to_svg(&self) -> String {
        svg::render(&self.scene, self.surface, &self.options)
    }
}
