//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use glyphfall_config::Overrides;
use glyphfall_core::ColorTheme;

/// Digital rain for your terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "glyphfall", version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Random seed for a reproducible rain
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Milliseconds between animation ticks
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Glyph cell size in pixels
    #[arg(long, value_name = "PX")]
    pub cell_size: Option<u32>,

    /// Glyph color theme (green, cyan, white, magenta, yellow, red, blue)
    #[arg(short, long, value_name = "THEME", value_parser = parse_theme)]
    pub theme: Option<ColorTheme>,

    /// Write logs to this file (filter with GLYPHFALL_LOG)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Write the effective configuration to the default config path and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            cell_size: self.cell_size,
            interval_ms: self.interval_ms,
            theme: self.theme,
            seed: self.seed,
        }
    }
}

fn parse_theme(s: &str) -> Result<ColorTheme, String> {
    ColorTheme::from_name(s).ok_or_else(|| {
        let names: Vec<_> = ColorTheme::ALL.iter().map(|t| t.name()).collect();
        format!("unknown theme '{s}', expected one of: {}", names.join(", "))
    })
}
