//! Terminal-cell raster surface.

use glyphfall_core::{FontSpec, Rgba, Surface};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Cells whose brightest channel is below this render as blank.
const VISIBILITY_FLOOR: f32 = 12.0;

/// One terminal cell of the raster.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    /// Linear RGB channels in `0.0..=255.0`.
    color: [f32; 3],
}

impl Cell {
    const BLANK: Self = Self {
        glyph: ' ',
        color: [0.0; 3],
    };

    fn blend(&mut self, src: Rgba) {
        let a = src.a;
        for (dst, src) in self.color.iter_mut().zip([src.r, src.g, src.b]) {
            *dst = *dst * (1.0 - a) + f32::from(src) * a;
        }
    }

    /// Whether the cell is bright enough to show its glyph.
    fn is_visible(&self) -> bool {
        self.glyph != ' ' && self.color.iter().copied().fold(0.0, f32::max) >= VISIBILITY_FLOOR
    }

    fn span(&self) -> Span<'static> {
        if !self.is_visible() {
            return Span::raw(" ");
        }
        let [r, g, b] = self.color.map(|c| c.round().clamp(0.0, 255.0) as u8);
        Span::styled(self.glyph.to_string(), Style::new().fg(Color::Rgb(r, g, b)))
    }
}

/// A [`Surface`] whose pixels are grouped into square terminal cells.
///
/// Each terminal cell stands for `cell_size` x `cell_size` virtual pixels
/// and holds one glyph and a floating-point color, so repeated translucent
/// fills fade old glyphs smoothly toward black.
#[derive(Debug, Clone)]
pub struct CellRaster {
    cell_size: u32,
    width: u32,
    height: u32,
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl CellRaster {
    /// Create an empty raster. Use [`Surface::set_size`] to allocate cells.
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size,
            width: 0,
            height: 0,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        }
    }

    /// Virtual pixel dimensions of a `cols` x `rows` terminal area.
    pub fn pixel_size(&self, cols: u16, rows: u16) -> (u32, u32) {
        (
            u32::from(cols).saturating_mul(self.cell_size),
            u32::from(rows).saturating_mul(self.cell_size),
        )
    }

    /// Render the raster as one line of spans per cell row.
    pub fn lines(&self) -> Vec<Line<'static>> {
        if self.cols == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.cols)
            .map(|row| Line::from(row.iter().map(Cell::span).collect::<Vec<_>>()))
            .collect()
    }

    /// Cell index range covered by `[start, start + len)` pixels, clipped to `limit` pixels.
    fn cell_span(&self, start: u32, len: u32, limit: u32) -> std::ops::Range<usize> {
        let end = start.saturating_add(len).min(limit);
        if start >= end {
            return 0..0;
        }
        (start / self.cell_size) as usize..end.div_ceil(self.cell_size) as usize
    }
}

impl Surface for CellRaster {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        (self.cols, self.rows) = match self.cell_size {
            0 => (0, 0),
            cell => (
                width.div_ceil(cell) as usize,
                height.div_ceil(cell) as usize,
            ),
        };
        self.cells = vec![Cell::BLANK; self.cols * self.rows];
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        if self.cell_size == 0 || color.a <= 0.0 {
            return;
        }
        let cols = self.cell_span(x, width, self.width);
        let rows = self.cell_span(y, height, self.height);
        for row in rows {
            let line = row * self.cols;
            for cell in &mut self.cells[line + cols.start..line + cols.end] {
                cell.blend(color);
            }
        }
    }

    fn fill_glyph(&mut self, glyph: char, x: u32, y: u32, _font: &FontSpec, color: Rgba) {
        // The baseline at `y` closes the cell row above it; nothing fits above row 0.
        if self.cell_size == 0 || y < self.cell_size {
            return;
        }
        let col = (x / self.cell_size) as usize;
        let row = (y / self.cell_size) as usize - 1;
        if col >= self.cols || row >= self.rows {
            return;
        }
        let cell = &mut self.cells[row * self.cols + col];
        cell.glyph = glyph;
        cell.blend(color);
    }
}

impl Widget for &CellRaster {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines()).render(area, buf);
    }
}
