//! Rain animation state.

use glyphfall_core::{RainSettings, Rgba, Surface};
use rand::Rng;
use tracing::{debug, trace};

/// Number of glyph columns that fit across `width` pixels.
pub fn column_count(width: u32, cell_size: u32) -> usize {
    if cell_size == 0 {
        return 0;
    }
    (width / cell_size) as usize
}

/// Falling-glyph animator.
///
/// Owns the surface it paints, its settings, its random source and the
/// per-column row counters. Column state is always exactly
/// `floor(surface width / cell size)` entries long.
#[derive(Debug)]
pub struct RainAnimator<S, R> {
    surface: S,
    settings: RainSettings,
    rng: R,
    /// Row counter per column; the glyph baseline sits at `row * cell_size`.
    columns: Vec<u32>,
}

impl<S: Surface, R: Rng> RainAnimator<S, R> {
    /// Create an animator sized to the surface's current dimensions.
    pub fn new(surface: S, settings: RainSettings, rng: R) -> Self {
        let mut animator = Self {
            surface,
            settings,
            rng,
            columns: Vec::new(),
        };
        let (width, height) = (animator.surface.width(), animator.surface.height());
        animator.initialize(width, height);
        animator
    }

    /// Size the surface and reset every column to row 1.
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.surface.set_size(width, height);
        self.columns = vec![1; column_count(width, self.settings.cell_size)];
        debug!(width, height, columns = self.columns.len(), "rain initialized");
    }

    /// Replace the column state for new surface dimensions.
    ///
    /// Prior tick history is discarded; the result matches a fresh
    /// [`initialize`](Self::initialize).
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!(
            from_width = self.surface.width(),
            from_height = self.surface.height(),
            width,
            height,
            "rain resized"
        );
        self.initialize(width, height);
    }

    /// Advance the animation by one step.
    pub fn tick(&mut self) {
        let width = self.surface.width();
        let height = self.surface.height();
        self.surface.fill_rect(0, 0, width, height, self.settings.overlay);

        let cell = self.settings.cell_size;
        let threshold = self.settings.reset_threshold();

        for (i, row) in self.columns.iter_mut().enumerate() {
            let glyph = self.settings.glyphs.choose(&mut self.rng);
            let x = (i as u32).saturating_mul(cell);
            let y = row.saturating_mul(cell);
            self.surface
                .fill_glyph(glyph, x, y, &self.settings.font, self.settings.glyph_color);

            // Past the bottom edge: restart from the top with a small chance.
            if u64::from(*row) * u64::from(cell) > u64::from(height)
                && self.rng.random::<f64>() > threshold
            {
                trace!(column = i, row = *row, "column restarted");
                *row = 0;
            }
            *row = row.saturating_add(1);
        }
    }

    /// Row counters, one per column.
    pub fn columns(&self) -> &[u32] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn settings(&self) -> &RainSettings {
        &self.settings
    }

    /// Change the glyph color; applies from the next tick.
    pub fn set_glyph_color(&mut self, color: Rgba) {
        self.settings.glyph_color = color;
    }
}
