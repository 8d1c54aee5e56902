use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Input events from the host surface, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Pointer click
    Click { x: f32, y: f32 },
    /// Pointer movement (for hover tracking)
    MouseMove { x: f32, y: f32 },
    /// Pointer left the surface
    MouseLeave,
    /// Surface resized
    Resize { width: f32, height: f32 },
}

impl Event {
    pub fn is_resize(&self) -> bool {
        matches!(self, Event::Resize { .. })
    }
}

/// Outbound messages for the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    Selection(Selection),
    Tooltip(TooltipRequest),
}

/// Emitted once per click on an expandable node when a channel is configured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub channel: String,
    pub path: SelectionPath,
}

/// Ordered mapping from hierarchy level name to the label at that level.
///
/// Serializes as a JSON object whose keys keep their root-first order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionPath(Vec<(String, String)>);

impl SelectionPath {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self(entries)
    }

    pub fn get(&self, level: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == level)
            .map(|(_, label)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SelectionPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (level, label) in &self.0 {
            map.serialize_entry(level, label)?;
        }
        map.end()
    }
}

/// Request to show or hide the hover tooltip. Presentation is up to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TooltipRequest {
    Show {
        label: String,
        attribute: String,
        value: Option<String>,
        /// Surface position of the tooltip's top-left corner.
        x: f32,
        y: f32,
        font_size: f32,
    },
    Hide,
}
