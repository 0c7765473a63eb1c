//! Digital rain for glyphfall.
//!
//! [`RainAnimator`] keeps one row counter per glyph column and, each tick,
//! fades the previous frame, draws one random glyph per column and advances
//! the counters. [`CellRaster`] is a [`Surface`](glyphfall_core::Surface)
//! backed by a grid of terminal cells that renders through ratatui.

mod animator;
mod raster;

pub use animator::{RainAnimator, column_count};
pub use raster::CellRaster;
