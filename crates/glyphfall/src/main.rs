use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use glyphfall_config::Config;
use rand::{SeedableRng, rngs::SmallRng};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod cli;

use app::App;
use cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = Config::load(cli.config.as_deref(), &cli.overrides())?;
    if cli.write_config {
        let path = config.save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let settings = config.rain_settings()?;
    let rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    info!(seed = ?config.seed, theme = config.theme.name(), "starting glyphfall");

    let terminal = ratatui::init();
    let result = App::new(settings, rng, config.theme).run(terminal);
    ratatui::restore();
    result
}

/// Log to `path` if given. Stdout belongs to the terminal UI, so without a
/// log file no subscriber is installed.
fn init_logging(path: Option<&Path>) -> color_eyre::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_env("GLYPHFALL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
