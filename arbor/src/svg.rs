//! SVG serialization of a [`Scene`].

use std::fmt::Write;

use crate::options::Options;
use crate::scene::{Scene, LABEL_OFFSET};
use crate::text::escape_xml;
use crate::types::Extent;

const LINK_STROKE: &str = "#ccc";
const NODE_STROKE: &str = "steelblue";

/// Render the scene as it currently looks.
///
/// Links are drawn first so nodes sit on top of them. The diagram is drawn
/// sideways: depth runs left to right.
pub fn render(scene: &Scene, surface: Extent, options: &Options) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_document(&mut out, scene, surface, options);
    out
}

fn write_document(
    out: &mut String,
    scene: &Scene,
    surface: Extent,
    options: &Options,
) -> std::fmt::Result {
    let margin = &options.margin;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        num(surface.width),
        num(surface.height)
    )?;
    writeln!(
        out,
        r#"<g transform="translate({},{})">"#,
        num(margin.left),
        num(margin.top)
    )?;

    for (identity, link) in scene.links() {
        writeln!(
            out,
            r#"<path class="link" id="link-{}" d="{}" fill="none" stroke="{LINK_STROKE}" stroke-width="2"/>"#,
            identity.get(),
            link.visual.path()
        )?;
    }

    for (identity, node) in scene.nodes() {
        let v = &node.visual;
        writeln!(
            out,
            r#"<g class="node" id="{identity}" transform="translate({},{})">"#,
            num(v.position.y),
            num(v.position.x)
        )?;
        writeln!(
            out,
            r#"<circle class="node" r="{}" fill="{}" stroke="{NODE_STROKE}" stroke-width="{}"/>"#,
            num(v.radius),
            v.fill.to_hex(),
            num(v.stroke_width)
        )?;
        let (dx, anchor) = if node.has_children {
            (-LABEL_OFFSET, "end")
        } else {
            (LABEL_OFFSET, "start")
        };
        writeln!(
            out,
            r#"<text dy=".35em" x="{}" text-anchor="{anchor}" font-size="{}px" fill-opacity="{}">{}</text>"#,
            num(dx),
            num(options.font_size),
            num(v.opacity),
            escape_xml(&node.label)
        )?;
        writeln!(out, "</g>")?;
    }

    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")
}

/// Format a coordinate with at most two decimals and no trailing zeros.
fn num(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let s = format!("{rounded:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::num;

    #[test]
    fn trims_numbers() {
        assert_eq!(num(240.0), "240");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(1e-6), "0");
        assert_eq!(num(-13.0), "-13");
    }
}
