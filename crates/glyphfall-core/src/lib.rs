//! Core types shared by the glyphfall crates.
//!
//! Holds the value types the rain animator is configured with, the
//! drawing-surface seam it paints through, and the fixed-interval
//! schedule that drives it.

mod color;
mod glyphs;
mod schedule;
mod settings;
mod surface;

pub use color::{ColorTheme, Rgba};
pub use glyphs::{DEFAULT_GLYPHS, GlyphSet};
pub use schedule::{Schedule, ScheduleState};
pub use settings::{
    DEFAULT_CELL_SIZE, DEFAULT_INTERVAL, DEFAULT_RESET_CHANCE, FontSpec, RainSettings,
};
pub use surface::Surface;
