//! Configuration for glyphfall.
//!
//! Settings come from, in increasing priority:
//! - built-in defaults
//! - a TOML file (`<config dir>/glyphfall/config.toml` or an explicit path)
//! - `GLYPHFALL_*` environment variables
//! - command-line overrides
//!
//! The merged [`Config`] is validated and converted into
//! [`RainSettings`] for the animator.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use glyphfall_core::{
    ColorTheme, DEFAULT_CELL_SIZE, DEFAULT_GLYPHS, DEFAULT_INTERVAL, DEFAULT_RESET_CHANCE,
    FontSpec, GlyphSet, RainSettings, Rgba,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const MAX_CELL_SIZE: u32 = 256;
const MIN_INTERVAL_MS: u64 = 10;
const MAX_INTERVAL_MS: u64 = 10_000;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("invalid value for '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        message: message.into(),
    }
}

/// Values that take priority over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub cell_size: Option<u32>,
    pub interval_ms: Option<u64>,
    pub theme: Option<ColorTheme>,
    pub seed: Option<u64>,
}

impl Overrides {
    /// Read `GLYPHFALL_THEME`, `GLYPHFALL_SEED` and `GLYPHFALL_INTERVAL_MS`
    /// through `lookup`. Unparseable values are logged and skipped.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut overrides = Self::default();

        if let Some(val) = lookup("GLYPHFALL_THEME") {
            match ColorTheme::from_name(&val) {
                Some(theme) => overrides.theme = Some(theme),
                None => warn!(value = %val, "ignoring unknown GLYPHFALL_THEME"),
            }
        }
        if let Some(val) = lookup("GLYPHFALL_SEED") {
            match val.trim().parse() {
                Ok(seed) => overrides.seed = Some(seed),
                Err(_) => warn!(value = %val, "ignoring invalid GLYPHFALL_SEED"),
            }
        }
        if let Some(val) = lookup("GLYPHFALL_INTERVAL_MS") {
            match val.trim().parse() {
                Ok(ms) => overrides.interval_ms = Some(ms),
                Err(_) => warn!(value = %val, "ignoring invalid GLYPHFALL_INTERVAL_MS"),
            }
        }

        overrides
    }
}

/// On-disk configuration. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Pixel size of one glyph cell.
    pub cell_size: u32,
    /// Milliseconds between animation ticks.
    pub interval_ms: u64,
    /// Per-tick restart chance for a column past the bottom edge.
    pub reset_chance: f64,
    /// Glyph pool, one glyph per character.
    pub glyphs: String,
    pub theme: ColorTheme,
    /// Hex glyph color; takes precedence over `theme` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph_color: Option<String>,
    /// Hex color of the fading overlay.
    pub overlay_color: String,
    pub overlay_alpha: f32,
    pub font_family: String,
    /// Fixed random seed for reproducible runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            interval_ms: u64::try_from(DEFAULT_INTERVAL.as_millis()).unwrap_or(u64::MAX),
            reset_chance: DEFAULT_RESET_CHANCE,
            glyphs: DEFAULT_GLYPHS.to_string(),
            theme: ColorTheme::default(),
            glyph_color: None,
            overlay_color: "#000000".to_string(),
            overlay_alpha: 0.05,
            font_family: FontSpec::default().family,
            seed: None,
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "glyphfall").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load with full precedence: overrides > environment > file > defaults.
    ///
    /// An explicit `path` must exist. The default path is optional; when it
    /// is missing the defaults are used.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok(), overrides)
    }

    /// Like [`Config::load`], reading the environment layer through `env`.
    pub fn load_with(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_file(&path)?,
                _ => {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            },
        };

        config.apply(&Overrides::from_vars(env));
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Load a config file without applying overrides or validating.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        let write_err = |source: io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, content).map_err(write_err)
    }

    /// Write the config to [`Config::default_path`], returning the path written.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Layer `overrides` on top of this config.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(cell_size) = overrides.cell_size {
            self.cell_size = cell_size;
        }
        if let Some(interval_ms) = overrides.interval_ms {
            self.interval_ms = interval_ms;
        }
        if let Some(theme) = overrides.theme {
            // An explicit theme replaces any custom glyph color.
            self.theme = theme;
            self.glyph_color = None;
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rain_settings().map(|_| ())
    }

    /// Validate and convert into animator settings.
    pub fn rain_settings(&self) -> Result<RainSettings, ConfigError> {
        if !(1..=MAX_CELL_SIZE).contains(&self.cell_size) {
            return Err(invalid(
                "cell_size",
                format!("must be between 1 and {MAX_CELL_SIZE}, got {}", self.cell_size),
            ));
        }
        if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&self.interval_ms) {
            return Err(invalid(
                "interval_ms",
                format!(
                    "must be between {MIN_INTERVAL_MS} and {MAX_INTERVAL_MS}, got {}",
                    self.interval_ms
                ),
            ));
        }
        if !(self.reset_chance > 0.0 && self.reset_chance < 1.0) {
            return Err(invalid(
                "reset_chance",
                format!("must be strictly between 0 and 1, got {}", self.reset_chance),
            ));
        }
        if !(0.0..=1.0).contains(&self.overlay_alpha) {
            return Err(invalid(
                "overlay_alpha",
                format!("must be between 0 and 1, got {}", self.overlay_alpha),
            ));
        }

        let glyphs = GlyphSet::parse(&self.glyphs).ok_or_else(|| {
            invalid("glyphs", "must be non-empty and free of control characters")
        })?;
        let glyph_color = match &self.glyph_color {
            Some(hex) => parse_color("glyph_color", hex)?,
            None => self.theme.rgba(),
        };
        let overlay = parse_color("overlay_color", &self.overlay_color)?.with_alpha(self.overlay_alpha);

        Ok(RainSettings {
            cell_size: self.cell_size,
            glyph_color,
            overlay,
            reset_chance: self.reset_chance,
            font: FontSpec::new(self.cell_size, self.font_family.clone()),
            glyphs,
            interval: Duration::from_millis(self.interval_ms),
        })
    }
}

/// Parse an opaque `#RGB` or `#RRGGBB` color. Alpha is configured separately,
/// so the eight-digit form is rejected.
fn parse_color(field: &'static str, hex: &str) -> Result<Rgba, ConfigError> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    Rgba::parse_hex(hex)
        .filter(|_| matches!(digits.len(), 3 | 6))
        .ok_or_else(|| {
            invalid(
                field,
                format!("invalid hex color '{hex}', expected #RGB or #RRGGBB"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_rain_defaults() {
        let settings = Config::default().rain_settings().unwrap();
        assert_eq!(settings, RainSettings::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("cell_size = 12\ntheme = \"cyan\"\n").unwrap();
        assert_eq!(config.cell_size, 12);
        assert_eq!(config.theme, ColorTheme::Cyan);
        assert_eq!(config.interval_ms, 80);
        assert_eq!(config.glyphs, DEFAULT_GLYPHS);

        let settings = config.rain_settings().unwrap();
        assert_eq!(settings.font, FontSpec::new(12, "arial"));
        assert_eq!(settings.glyph_color, ColorTheme::Cyan.rgba());
    }

    #[test]
    fn test_full_file() {
        let toml = r##"
            cell_size = 16
            interval_ms = 50
            reset_chance = 0.1
            glyphs = "01"
            glyph_color = "#FF8800"
            overlay_color = "#101010"
            overlay_alpha = 0.2
            font_family = "monospace"
            seed = 42
        "##;
        let config = Config::from_toml(toml).unwrap();
        let settings = config.rain_settings().unwrap();
        assert_eq!(settings.cell_size, 16);
        assert_eq!(settings.interval, Duration::from_millis(50));
        assert_eq!(settings.glyphs.to_string(), "01");
        assert_eq!(settings.glyph_color, Rgba::rgb(0xFF, 0x88, 0x00));
        assert_eq!(settings.overlay, Rgba::new(0x10, 0x10, 0x10, 0.2));
        assert_eq!(settings.font.to_string(), "16px monospace");
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_short_and_long_colors_accepted() {
        let config = Config {
            glyph_color: Some("#0F0".to_string()),
            overlay_color: "101010".to_string(),
            ..Config::default()
        };
        let settings = config.rain_settings().unwrap();
        assert_eq!(settings.glyph_color, Rgba::rgb(0, 255, 0));
        assert_eq!(settings.overlay, Rgba::new(0x10, 0x10, 0x10, 0.05));
    }

    #[test]
    fn test_misspelled_key_is_a_parse_error() {
        let err = Config::from_toml("cellsize = 12
").unwrap_err();
        assert!(err.to_string().contains("cellsize"));
    }

    #[test]
    fn test_unknown_theme_is_a_parse_error() {
        assert!(Config::from_toml("theme = \"mauve\"").is_err());
    }

    #[test]
    fn test_validation_errors() {
        let cases: [(&str, Config); 10] = [
            ("cell_size", Config { cell_size: 0, ..Config::default() }),
            ("interval_ms", Config { interval_ms: 1, ..Config::default() }),
            ("reset_chance", Config { reset_chance: 1.0, ..Config::default() }),
            ("reset_chance", Config { reset_chance: f64::NAN, ..Config::default() }),
            ("overlay_alpha", Config { overlay_alpha: 1.5, ..Config::default() }),
            ("glyphs", Config { glyphs: String::new(), ..Config::default() }),
            (
                "glyph_color",
                Config {
                    glyph_color: Some("green".to_string()),
                    ..Config::default()
                },
            ),
            (
                "glyph_color",
                Config {
                    glyph_color: Some("#00FF0000".to_string()),
                    ..Config::default()
                },
            ),
            (
                "glyph_color",
                Config {
                    glyph_color: Some("#00FF00FF".to_string()),
                    ..Config::default()
                },
            ),
            (
                "overlay_color",
                Config {
                    overlay_color: "#00000080".to_string(),
                    ..Config::default()
                },
            ),
        ];
        for (expected, config) in cases {
            match config.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected invalid {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = Config {
            glyph_color: Some("#123456".to_string()),
            ..Config::default()
        };
        config.apply(&Overrides {
            cell_size: Some(8),
            interval_ms: Some(40),
            theme: Some(ColorTheme::Red),
            seed: Some(7),
        });
        assert_eq!(config.cell_size, 8);
        assert_eq!(config.interval_ms, 40);
        assert_eq!(config.theme, ColorTheme::Red);
        assert_eq!(config.glyph_color, None);
        assert_eq!(config.seed, Some(7));

        config.apply(&Overrides::default());
        assert_eq!(config.cell_size, 8);
    }

    #[test]
    fn test_overrides_from_vars() {
        let overrides = Overrides::from_vars(|key| match key {
            "GLYPHFALL_THEME" => Some("Blue".to_string()),
            "GLYPHFALL_SEED" => Some(" 99 ".to_string()),
            "GLYPHFALL_INTERVAL_MS" => Some("fast".to_string()),
            _ => None,
        });
        assert_eq!(overrides.theme, Some(ColorTheme::Blue));
        assert_eq!(overrides.seed, Some(99));
        assert_eq!(overrides.interval_ms, None);
        assert_eq!(overrides.cell_size, None);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            cell_size: 20,
            seed: Some(3),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_explicit_path_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "cell_size = 30\n").unwrap();

        let overrides = Overrides {
            cell_size: Some(18),
            ..Overrides::default()
        };
        let config = Config::load_with(Some(&path), no_env, &overrides).unwrap();
        assert_eq!(config.cell_size, 18);
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_cli_beats_env_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = \"red\"\n").unwrap();
        let env = |key: &str| (key == "GLYPHFALL_THEME").then(|| "blue".to_string());

        let cli = Overrides {
            theme: Some(ColorTheme::Cyan),
            ..Overrides::default()
        };
        let config = Config::load_with(Some(&path), env, &cli).unwrap();
        assert_eq!(config.theme, ColorTheme::Cyan);

        let config = Config::load_with(Some(&path), env, &Overrides::default()).unwrap();
        assert_eq!(config.theme, ColorTheme::Blue);

        let config = Config::load_with(Some(&path), no_env, &Overrides::default()).unwrap();
        assert_eq!(config.theme, ColorTheme::Red);
    }

    #[test]
    fn test_env_seed_and_interval_layered_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "interval_ms = 200\nseed = 1\n").unwrap();
        let env = |key: &str| match key {
            "GLYPHFALL_INTERVAL_MS" => Some("40".to_string()),
            "GLYPHFALL_SEED" => Some("9".to_string()),
            _ => None,
        };
        let cli = Overrides {
            seed: Some(77),
            ..Overrides::default()
        };
        let config = Config::load_with(Some(&path), env, &cli).unwrap();
        assert_eq!(config.interval_ms, 40);
        assert_eq!(config.seed, Some(77));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Config::load(Some(&path), &Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_load_malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "cell_size = \"big\"\n").unwrap();
        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "reset_chance = 0.0\n").unwrap();
        let err = Config::load_with(Some(&path), no_env, &Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "reset_chance", .. }));
    }
}
