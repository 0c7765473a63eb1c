//! The drawing-surface seam.

use crate::{FontSpec, Rgba};

/// A 2D raster the animator paints onto.
///
/// Coordinates are pixels with the origin at the top-left corner. Glyph
/// positions name the text baseline, as on an HTML canvas, so a glyph drawn
/// at `y` occupies the cell that ends at `y`.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Change the surface dimensions. Existing contents may be discarded.
    fn set_size(&mut self, width: u32, height: u32);

    /// Composite `color` (which may be translucent) over a rectangle.
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba);

    /// Draw a single glyph with its baseline-left corner at `(x, y)`.
    fn fill_glyph(&mut self, glyph: char, x: u32, y: u32, font: &FontSpec, color: Rgba);
}
