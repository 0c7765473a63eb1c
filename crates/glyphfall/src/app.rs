//! The terminal application loop.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glyphfall_core::{ColorTheme, RainSettings, Schedule};
use glyphfall_rain::{CellRaster, RainAnimator};
use ratatui::{DefaultTerminal, Frame};
use rand::rngs::SmallRng;
use tracing::{debug, info};

/// How long to block on input while no tick is pending (paused).
const IDLE_POLL: Duration = Duration::from_millis(250);

/// The main application which holds the rain and its schedule.
#[derive(Debug)]
pub struct App {
    animator: RainAnimator<CellRaster, SmallRng>,
    /// Drives ticks; stopping it ends the application.
    schedule: Schedule,
    /// Current glyph color theme.
    theme: ColorTheme,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(settings: RainSettings, rng: SmallRng, theme: ColorTheme) -> Self {
        let raster = CellRaster::new(settings.cell_size);
        let schedule = Schedule::new(settings.interval);
        Self {
            animator: RainAnimator::new(raster, settings, rng),
            schedule,
            theme,
        }
    }

    /// Run the application's main loop until the schedule is stopped.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.start(size.width, size.height, Instant::now());

        while !self.schedule.is_stopped() {
            if self.schedule.fire(Instant::now()) {
                self.animator.tick();
            }
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }

        info!("rain stopped");
        Ok(())
    }

    /// Size the rain to the terminal and start ticking.
    fn start(&mut self, cols: u16, rows: u16, now: Instant) {
        self.resize(cols, rows);
        self.schedule.start(now);
        info!(
            columns = self.animator.column_count(),
            interval = ?self.schedule.period(),
            "rain started"
        );
    }

    /// Resize the rain to a terminal area of `cols` x `rows` cells.
    fn resize(&mut self, cols: u16, rows: u16) {
        let (width, height) = self.animator.surface().pixel_size(cols, rows);
        self.animator.resize(width, height);
    }

    /// Renders the rain.
    fn render(&self, frame: &mut Frame) {
        frame.render_widget(self.animator.surface(), frame.area());
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Blocks at most until the next tick is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self.schedule.timeout(Instant::now(), IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char(' ') | KeyCode::Char('p')) => self.toggle_pause(),
            _ => {}
        }
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.theme = self.theme.next();
        self.animator.set_glyph_color(self.theme.rgba());
        debug!(theme = self.theme.name(), "theme changed");
    }

    fn toggle_pause(&mut self) {
        self.schedule.toggle_pause(Instant::now());
        debug!(state = ?self.schedule.state(), "pause toggled");
    }

    /// Stop the schedule, which ends the main loop.
    fn quit(&mut self) {
        self.schedule.stop();
    }
}
