/// A point in diagram space.
///
/// `x` runs along the breadth axis (siblings are spread along it) and `y`
/// along the depth axis. The SVG surface draws the tree sideways, so a point
/// lands at screen coordinates `(y, x)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, to: Point, t: f32) -> Point {
        Point {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Size of a drawing surface or of the area inside its margins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The drawable area inside `margin`. Never shrinks below one unit per
    /// axis so the layout always has room to separate nodes.
    pub fn inner(self, margin: &Margin) -> Extent {
        Extent {
            width: (self.width - margin.left - margin.right).max(1.0),
            height: (self.height - margin.top - margin.bottom).max(1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(20.0, 50.0, 30.0, 90.0)
    }
}
