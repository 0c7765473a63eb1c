//! Animator settings and their default values.

use std::time::Duration;

use crate::{GlyphSet, Rgba};

/// Pixel size of one glyph cell.
pub const DEFAULT_CELL_SIZE: u32 = 24;

/// Time between animation ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(80);

/// Chance per tick that a column past the bottom edge restarts at the top.
pub const DEFAULT_RESET_CHANCE: f64 = 0.025;

/// Font used for glyph draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    /// Size in pixels.
    pub size: u32,
    pub family: String,
}

impl FontSpec {
    pub fn new(size: u32, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE, "arial")
    }
}

impl std::fmt::Display for FontSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px {}", self.size, self.family)
    }
}

/// Everything the rain animator needs besides its surface and random source.
#[derive(Debug, Clone, PartialEq)]
pub struct RainSettings {
    /// Pixel size of one glyph cell, both axes.
    pub cell_size: u32,
    pub glyph_color: Rgba,
    /// Translucent fill painted over the whole surface before each tick's glyphs.
    pub overlay: Rgba,
    /// Per-tick restart probability for a column past the bottom edge, in `(0, 1)`.
    pub reset_chance: f64,
    pub font: FontSpec,
    pub glyphs: GlyphSet,
    pub interval: Duration,
}

impl RainSettings {
    /// A uniform draw in `[0, 1)` above this value restarts a column.
    pub fn reset_threshold(&self) -> f64 {
        1.0 - self.reset_chance
    }
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            glyph_color: Rgba::rgb(0, 255, 0),
            overlay: Rgba::new(0, 0, 0, 0.05),
            reset_chance: DEFAULT_RESET_CHANCE,
            font: FontSpec::default(),
            glyphs: GlyphSet::default(),
            interval: DEFAULT_INTERVAL,
        }
    }
}
