mod color;
mod geometry;

pub use color::{Color, ColorParseError, Rgb};
pub use geometry::{Extent, Margin, Point};
