use crate::scene::{Phase, Scene, LABEL_OFFSET};
use crate::text::label_width;
use crate::tree::Identity;
use crate::types::Point;

/// Find the node under `point` (diagram space).
///
/// A node is hit through its circle or its label. Exiting nodes are not
/// interactive. Later handles are drawn on top, so they are checked first.
pub fn hit_test(scene: &Scene, point: Point, font_size: f32) -> Option<Identity> {
    scene
        .nodes()
        .rev()
        .filter(|(_, handle)| handle.phase != Phase::Exit)
        .find(|(_, handle)| {
            let center = handle.visual.position;
            if center.distance(point) <= handle.visual.radius {
                return true;
            }

            let half_height = font_size * 0.6;
            if (point.x - center.x).abs() > half_height {
                return false;
            }
            let width = label_width(&handle.label, font_size);
            let (start, end) = if handle.has_children {
                (center.y - LABEL_OFFSET - width, center.y - LABEL_OFFSET)
            } else {
                (center.y + LABEL_OFFSET, center.y + LABEL_OFFSET + width)
            };
            point.y >= start && point.y <= end
        })
        .map(|(identity, _)| identity)
}
