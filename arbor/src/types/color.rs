use std::fmt;

use palette::{IntoColor, Oklch, Srgb};

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum Color {
    Oklch { l: f32, c: f32, h: f32 },
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color string that is neither a CSS color name nor a hex literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized color: {0:?}")]
pub struct ColorParseError(pub String);

impl Color {
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch { l, c, h }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    /// Parse a CSS color: `#rgb`, `#rrggbb`, or a CSS named color.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError(s.to_string()));
        }
        let name = trimmed.to_ascii_lowercase();
        palette::named::from_str(&name)
            .map(|c| Color::rgb(c.red, c.green, c.blue))
            .ok_or_else(|| ColorParseError(s.to_string()))
    }

    pub fn to_rgb(&self) -> Rgb {
        match self {
            Self::Rgb { r, g, b } => Rgb::new(*r, *g, *b),
            Self::Oklch { l, c, h } => oklch_to_rgb(*l, *c, *h),
        }
    }

    pub fn to_hex(&self) -> String {
        let Rgb { r, g, b } = self.to_rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Interpolate in OKLCH space, taking the shortest path around the hue circle.
    pub fn lerp(&self, to: &Color, t: f32) -> Color {
        if self == to {
            return self.clone();
        }
        let (from_l, from_c, from_h) = color_to_oklch(self);
        let (to_l, to_c, to_h) = color_to_oklch(to);

        let l = from_l + (to_l - from_l) * t;
        let c = from_c + (to_c - from_c) * t;

        let mut dh = to_h - from_h;
        if dh > 180.0 {
            dh -= 360.0;
        } else if dh < -180.0 {
            dh += 360.0;
        }
        let h = (from_h + dh * t).rem_euclid(360.0);

        Color::oklch(l, c, h)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
    match hex.len() {
        3 => {
            let r = digit(0, 1)?;
            let g = digit(1, 1)?;
            let b = digit(2, 1)?;
            Some(Color::rgb(r * 17, g * 17, b * 17))
        }
        6 => Some(Color::rgb(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
        _ => None,
    }
}

fn oklch_to_rgb(l: f32, c: f32, h: f32) -> Rgb {
    let oklch = Oklch::new(l, c, h);
    let srgb: Srgb = oklch.into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();

    Rgb::new(r, g, b)
}

fn color_to_oklch(color: &Color) -> (f32, f32, f32) {
    match color {
        Color::Oklch { l, c, h } => (*l, *c, *h),
        Color::Rgb { r, g, b } => {
            let srgb = Srgb::new(*r as f32 / 255.0, *g as f32 / 255.0, *b as f32 / 255.0);
            let oklch: Oklch = srgb.into_color();
            (oklch.l, oklch.chroma, oklch.hue.into_positive_degrees())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(Color::parse("#fff"), Ok(Color::WHITE));
        assert_eq!(Color::parse("#B0C4DE"), Ok(Color::rgb(0xb0, 0xc4, 0xde)));
        assert_eq!(Color::parse("LightSteelBlue"), Ok(Color::rgb(0xb0, 0xc4, 0xde)));
        assert!(Color::parse("#12").is_err());
        assert!(Color::parse("not-a-color").is_err());
    }

    #[test]
    fn rejects_signs_in_hex() {
        assert!(Color::parse("#+fffff").is_err());
        assert!(Color::parse("#+ff").is_err());
        assert!(Color::parse("#-0a").is_err());
    }

    #[test]
    fn lerp_endpoints_round_trip_through_rgb() {
        let from = Color::rgb(255, 0, 0);
        let to = Color::rgb(0, 0, 255);
        assert_eq!(from.lerp(&to, 0.0).to_hex(), "#ff0000");
        assert_eq!(from.lerp(&to, 1.0).to_hex(), "#0000ff");
        assert_eq!(from.lerp(&from, 0.5), from);
    }
}
