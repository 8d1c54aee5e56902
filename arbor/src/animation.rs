use std::collections::HashMap;
use std::time::Instant;

use crate::reconcile::Reconciliation;
use crate::scene::{LinkVisual, NodeStyle, NodeVisual, Phase, Scene};
use crate::transitions::TransitionConfig;
use crate::tree::{Identity, Tree};
use crate::types::Point;

/// Where entering elements grow out of and exiting elements retract into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionOrigin {
    /// The origin node's position before this cycle; entering elements start here.
    pub previous: Point,
    /// The origin node's freshly computed position; exiting elements end here.
    pub current: Point,
}

impl TransitionOrigin {
    pub fn at(point: Point) -> Self {
        Self {
            previous: point,
            current: point,
        }
    }
}

/// A single active transition.
#[derive(Debug, Clone)]
struct Track<V> {
    phase: Phase,
    from: V,
    to: V,
    start: Instant,
}

/// Drives enter, update and exit transitions and writes the interpolated
/// state into the [`Scene`].
#[derive(Debug, Default)]
pub struct TransitionDriver {
    config: TransitionConfig,
    nodes: HashMap<Identity, Track<NodeVisual>>,
    links: HashMap<Identity, Track<LinkVisual>>,
    /// Reduced motion flag - when true, transitions complete instantly.
    reduced_motion: bool,
}

impl TransitionDriver {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TransitionConfig) {
        self.config = config;
    }

    /// Enable or disable reduced motion (accessibility).
    /// When enabled, all transitions complete instantly.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    /// Returns true if any transition is currently active.
    pub fn is_active(&self) -> bool {
        !self.nodes.is_empty() || !self.links.is_empty()
    }

    /// Start transitions for one reconciliation.
    ///
    /// Elements already in flight continue from wherever they are at `now`,
    /// so a second click during a transition redirects it instead of
    /// restarting from a stale position.
    pub fn begin(
        &mut self,
        scene: &mut Scene,
        changes: &Reconciliation,
        tree: &Tree,
        style: &NodeStyle,
        origin: TransitionOrigin,
        now: Instant,
    ) {
        self.sample(scene, now);

        for entering in &changes.nodes.enter {
            let to = style.resolve(tree, entering.node, entering.position);
            let from = match scene.node(entering.identity) {
                Some(handle) => handle.visual.clone(),
                None => to.vanished_at(origin.previous),
            };
            scene.upsert_node(entering.identity, tree, entering.node, Phase::Enter, from.clone());
            self.start_node(entering.identity, Phase::Enter, from, to, now);
        }

        for update in &changes.nodes.update {
            let next = &update.next;
            let to = style.resolve(tree, next.node, next.position);
            let from = match scene.node(next.identity) {
                Some(handle) => handle.visual.clone(),
                None => NodeVisual {
                    position: update.previous.position,
                    ..to.clone()
                },
            };
            scene.upsert_node(next.identity, tree, next.node, Phase::Update, from.clone());
            self.start_node(next.identity, Phase::Update, from, to, now);
        }

        for exiting in &changes.nodes.exit {
            let Some(handle) = scene.node_mut(exiting.identity) else {
                continue;
            };
            handle.phase = Phase::Exit;
            let from = handle.visual.clone();
            let to = from.vanished_at(origin.current);
            self.start_node(exiting.identity, Phase::Exit, from, to, now);
        }

        for entering in &changes.links.enter {
            let to = LinkVisual {
                source: entering.source,
                target: entering.target,
            };
            let from = match scene.link(entering.identity) {
                Some(handle) => handle.visual,
                None => LinkVisual::degenerate(origin.previous),
            };
            scene.upsert_link(entering.identity, entering.parent, Phase::Enter, from);
            self.start_link(entering.identity, Phase::Enter, from, to, now);
        }

        for update in &changes.links.update {
            let next = &update.next;
            let to = LinkVisual {
                source: next.source,
                target: next.target,
            };
            let from = match scene.link(next.identity) {
                Some(handle) => handle.visual,
                None => LinkVisual {
                    source: update.previous.source,
                    target: update.previous.target,
                },
            };
            scene.upsert_link(next.identity, next.parent, Phase::Update, from);
            self.start_link(next.identity, Phase::Update, from, to, now);
        }

        for exiting in &changes.links.exit {
            let Some(handle) = scene.link_mut(exiting.identity) else {
                continue;
            };
            handle.phase = Phase::Exit;
            let from = handle.visual;
            self.start_link(
                exiting.identity,
                Phase::Exit,
                from,
                LinkVisual::degenerate(origin.current),
                now,
            );
        }

        log::debug!(
            "[animation] begin: {} node tracks, {} link tracks over {:?}",
            self.nodes.len(),
            self.links.len(),
            self.config.duration
        );

        if self.reduced_motion {
            self.finish(scene);
        }
    }

    fn start_node(
        &mut self,
        identity: Identity,
        phase: Phase,
        from: NodeVisual,
        to: NodeVisual,
        start: Instant,
    ) {
        self.nodes.insert(
            identity,
            Track {
                phase,
                from,
                to,
                start,
            },
        );
    }

    fn start_link(
        &mut self,
        identity: Identity,
        phase: Phase,
        from: LinkVisual,
        to: LinkVisual,
        start: Instant,
    ) {
        self.links.insert(
            identity,
            Track {
                phase,
                from,
                to,
                start,
            },
        );
    }

    /// Write the interpolated state at `now` into the scene.
    pub fn sample(&self, scene: &mut Scene, now: Instant) {
        for (identity, track) in &self.nodes {
            let t = self.config.progress(now.saturating_duration_since(track.start));
            if let Some(handle) = scene.node_mut(*identity) {
                handle.visual = track.from.lerp(&track.to, t);
            }
        }
        for (identity, track) in &self.links {
            let t = self.config.progress(now.saturating_duration_since(track.start));
            if let Some(handle) = scene.link_mut(*identity) {
                handle.visual = track.from.lerp(&track.to, t);
            }
        }
    }

    /// Advance to `now`: sample, then retire finished tracks and drop the
    /// handles of elements that finished exiting.
    ///
    /// Returns true when this call brought the driver to rest.
    pub fn tick(&mut self, scene: &mut Scene, now: Instant) -> bool {
        if !self.is_active() {
            return false;
        }
        self.sample(scene, now);

        let duration = self.config.duration;
        let done = |track_start: Instant| now.saturating_duration_since(track_start) >= duration;

        let finished_nodes: Vec<(Identity, Phase)> = self
            .nodes
            .iter()
            .filter(|(_, track)| done(track.start))
            .map(|(id, track)| (*id, track.phase))
            .collect();
        for (identity, phase) in finished_nodes {
            self.nodes.remove(&identity);
            settle_node(scene, identity, phase);
        }

        let finished_links: Vec<(Identity, Phase)> = self
            .links
            .iter()
            .filter(|(_, track)| done(track.start))
            .map(|(id, track)| (*id, track.phase))
            .collect();
        for (identity, phase) in finished_links {
            self.links.remove(&identity);
            settle_link(scene, identity, phase);
        }

        let idle = !self.is_active();
        if idle {
            log::trace!("[animation] settled");
        }
        idle
    }

    /// Jump every track to its end state. Exiting elements are removed
    /// immediately; nothing is left half-way.
    pub fn finish(&mut self, scene: &mut Scene) {
        for (identity, track) in self.nodes.drain() {
            if let Some(handle) = scene.node_mut(identity) {
                handle.visual = track.to;
            }
            settle_node(scene, identity, track.phase);
        }
        for (identity, track) in self.links.drain() {
            if let Some(handle) = scene.link_mut(identity) {
                handle.visual = track.to;
            }
            settle_link(scene, identity, track.phase);
        }
    }
}

fn settle_node(scene: &mut Scene, identity: Identity, phase: Phase) {
    if phase == Phase::Exit {
        scene.remove_node(identity);
    } else if let Some(handle) = scene.node_mut(identity) {
        handle.phase = Phase::Idle;
    }
}

fn settle_link(scene: &mut Scene, identity: Identity, phase: Phase) {
    if phase == Phase::Exit {
        scene.remove_link(identity);
    } else if let Some(handle) = scene.link_mut(identity) {
        handle.phase = Phase::Idle;
    }
}
