//! Render payload and diagram options.

use std::time::Duration;

use serde::Deserialize;

use crate::collapse::DEFAULT_COLLAPSE_DEPTH;
use crate::error::OptionsError;
use crate::transitions::{Easing, TransitionConfig, DEFAULT_DURATION};
use crate::tree::TreeData;
use crate::types::{Color, Margin};

/// Everything a host hands over to draw a diagram.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderPayload {
    pub data: TreeData,
    #[serde(default)]
    pub options: Options,
}

impl RenderPayload {
    pub fn new(data: TreeData, options: Options) -> Self {
        Self { data, options }
    }

    /// Decode a payload from JSON and validate its options.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let payload: RenderPayload = serde_json::from_str(json)?;
        payload.options.validate()?;
        Ok(payload)
    }
}

/// Rendering options.
///
/// JSON field names follow the widget's own option names
/// (`linkLength`, `fill`, `tooltip`, ...); the descriptive names
/// (`levelSpacing`, `fillColor`, `showTooltip`, ...) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Pixels between depth levels.
    ///
    /// Default: 180
    #[serde(rename = "linkLength", alias = "levelSpacing")]
    pub level_spacing: f32,

    /// Fill for collapsed nodes that have no fill of their own.
    ///
    /// Default: `lightsteelblue`
    #[serde(rename = "fill", alias = "fillColor")]
    pub fill_color: Color,

    /// Label font size in pixels.
    ///
    /// Default: 10
    pub font_size: f32,

    /// Whether hovering a node requests a tooltip.
    ///
    /// Default: false
    #[serde(rename = "tooltip", alias = "showTooltip")]
    pub show_tooltip: bool,

    /// Name of the attribute the tooltip displays.
    ///
    /// Default: `leafCount`
    #[serde(rename = "attribute", alias = "tooltipAttribute")]
    pub tooltip_attribute: String,

    /// Level names used as keys of the selection notification, root first.
    #[serde(rename = "hierarchy", alias = "hierarchyNames")]
    pub hierarchy_names: Vec<String>,

    /// Where selection notifications go; `None` disables them.
    #[serde(rename = "input", alias = "selectionChannel")]
    pub selection_channel: Option<String>,

    /// Space between the surface edge and the diagram.
    pub margin: Margin,

    /// Transition length in milliseconds.
    ///
    /// Default: 750
    #[serde(rename = "duration")]
    pub duration_ms: u64,

    /// Timing curve of every transition: `linear`, `easeIn`, `easeOut`,
    /// `easeInOut` or `cubicInOut`.
    ///
    /// Default: `cubicInOut`
    pub easing: Easing,

    /// Depth at and below which nodes start collapsed.
    ///
    /// Default: 1
    pub collapse_below_depth: usize,

    /// Radius of a fully shown node.
    ///
    /// Default: 10
    pub node_radius: f32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level_spacing: 180.0,
            fill_color: Color::rgb(0xb0, 0xc4, 0xde),
            font_size: 10.0,
            show_tooltip: false,
            tooltip_attribute: "leafCount".to_string(),
            hierarchy_names: Vec::new(),
            selection_channel: None,
            margin: Margin::default(),
            duration_ms: DEFAULT_DURATION.as_millis() as u64,
            easing: Easing::default(),
            collapse_below_depth: DEFAULT_COLLAPSE_DEPTH,
            node_radius: 10.0,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level_spacing(mut self, spacing: f32) -> Self {
        self.level_spacing = spacing;
        self
    }

    pub fn with_fill_color(mut self, fill: Color) -> Self {
        self.fill_color = fill;
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_tooltip(mut self, attribute: impl Into<String>) -> Self {
        self.show_tooltip = true;
        self.tooltip_attribute = attribute.into();
        self
    }

    pub fn with_hierarchy_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hierarchy_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_selection_channel(mut self, channel: impl Into<String>) -> Self {
        self.selection_channel = Some(channel.into());
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_collapse_below_depth(mut self, depth: usize) -> Self {
        self.collapse_below_depth = depth;
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn transition_config(&self) -> TransitionConfig {
        TransitionConfig::default()
            .with_duration(self.duration())
            .with_easing(self.easing)
    }

    /// Reject values no diagram can be drawn with.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(OptionsError::invalid(
                "fontSize",
                format!("must be positive, got {}", self.font_size),
            ));
        }
        if !self.node_radius.is_finite() || self.node_radius <= 0.0 {
            return Err(OptionsError::invalid(
                "nodeRadius",
                format!("must be positive, got {}", self.node_radius),
            ));
        }
        if self.level_spacing.is_nan() {
            return Err(OptionsError::invalid("linkLength", "must be a number"));
        }
        Ok(())
    }
}
