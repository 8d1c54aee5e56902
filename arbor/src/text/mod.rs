use unicode_width::UnicodeWidthStr;

/// Average glyph advance as a fraction of the font size.
const GLYPH_ASPECT: f32 = 0.6;

pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Approximate rendered width of a label, in the same units as `font_size`.
pub fn label_width(label: &str, font_size: f32) -> f32 {
    display_width(label) as f32 * font_size * GLYPH_ASPECT
}

/// Escape text for use in SVG content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_glyphs_count_double() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
        assert_eq!(label_width("ab", 10.0), 12.0);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
