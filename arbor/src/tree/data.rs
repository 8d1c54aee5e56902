use serde::Deserialize;
use serde_json::{Map, Value};

use crate::types::Color;

/// Hierarchical input accepted by [`Tree::build`](super::Tree::build).
///
/// A JSON object is read as a nested element; a JSON array is read as a
/// parent/child table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeData {
    Nested(RawElement),
    Network(Vec<NetworkRow>),
}

/// One element of the nested input format.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawElement {
    pub name: String,
    #[serde(default, alias = "WeightOfNode")]
    pub weight: Option<Value>,
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub children: Option<Vec<RawElement>>,
    /// Every other field, available to the tooltip by name.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl RawElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn child(mut self, child: RawElement) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = RawElement>) -> Self {
        self.children.get_or_insert_with(Vec::new).extend(children);
        self
    }

    pub fn weight(mut self, weight: impl Into<Value>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    pub fn fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// One row of the parent/child table format. Rows are keyed by `name`; the
/// single row without a `parent` is the root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkRow {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default, alias = "WeightOfNode")]
    pub weight: Option<Value>,
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl NetworkRow {
    pub fn new(name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            name: name.into(),
            parent: parent.map(str::to_string),
            ..Default::default()
        }
    }
}
