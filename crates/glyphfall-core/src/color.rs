//! Colors used by the animator and its surfaces.

use serde::{Deserialize, Serialize};

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0.0, 1.0]`.
    pub a: f32,
}

impl Rgba {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color with alpha clamped to `[0.0, 1.0]`. NaN alpha is treated as transparent.
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        let a = if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) };
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
                Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(
                byte(0)?,
                byte(2)?,
                byte(4)?,
                f32::from(byte(6)?) / 255.0,
            )),
            _ => None,
        }
    }
}

/// Color theme for the falling glyphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Green,
    Cyan,
    Magenta,
    Yellow,
    Red,
    Blue,
    White,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 7] = [
        ColorTheme::Green,
        ColorTheme::Cyan,
        ColorTheme::Magenta,
        ColorTheme::Yellow,
        ColorTheme::Red,
        ColorTheme::Blue,
        ColorTheme::White,
    ];

    /// Cycle to the next color theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::Green => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
            ColorTheme::White => ColorTheme::Green,
        }
    }

    /// Glyph color for this theme.
    pub fn rgba(self) -> Rgba {
        match self {
            ColorTheme::Green => Rgba::rgb(0, 255, 0),
            ColorTheme::Cyan => Rgba::rgb(0, 255, 255),
            ColorTheme::Magenta => Rgba::rgb(255, 0, 255),
            ColorTheme::Yellow => Rgba::rgb(255, 255, 0),
            ColorTheme::Red => Rgba::rgb(255, 0, 0),
            ColorTheme::Blue => Rgba::rgb(64, 128, 255),
            ColorTheme::White => Rgba::rgb(255, 255, 255),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Green => "green",
            ColorTheme::Cyan => "cyan",
            ColorTheme::Magenta => "magenta",
            ColorTheme::Yellow => "yellow",
            ColorTheme::Red => "red",
            ColorTheme::Blue => "blue",
            ColorTheme::White => "white",
        }
    }

    /// Look up a theme by its case-insensitive name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(name))
    }
}
