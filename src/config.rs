use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::color::{RgbColor, Theme};
use crate::display::DisplayMode;
use crate::geometry::{AngleUnit, TrigFunction};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("invalid size '{0}': expected COLSxROWS, e.g. 60x30")]
    InvalidSize(String),
    #[error("invalid canvas: {0}")]
    InvalidCanvas(String),
    #[error("invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),
}

/// Smallest grid spacing in pixels; anything finer is just noise on braille.
pub const MIN_GRID_STEP: f64 = 1.0;

/// Which set of functions the diagram shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// sin, cos and tan
    #[default]
    Classic,
    /// all six functions with the secant and cosecant constructions
    Extended,
}

impl Variant {
    pub fn functions(&self) -> &'static [TrigFunction] {
        match self {
            Variant::Classic => &[TrigFunction::Sin, TrigFunction::Cos, TrigFunction::Tan],
            Variant::Extended => &TrigFunction::ALL,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub canvas: CanvasConfig,
    pub colors: ColorConfig,
    pub snapshot: SnapshotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    pub variant: Variant,
    /// Unit the toggle starts in
    pub unit: AngleUnit,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Terminal,
            variant: Variant::Classic,
            unit: AngleUnit::Degrees,
        }
    }
}

/// Canvas geometry in pixels. The circle has radius `unit_scale`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    pub unit_scale: f64,
    pub grid_step: f64,
    pub show_grid: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            unit_scale: 200.0,
            grid_step: 50.0,
            show_grid: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    pub theme: Theme,
    pub sin: RgbColor,
    pub cos: RgbColor,
    pub tan: RgbColor,
    pub cot: RgbColor,
    pub sec: RgbColor,
    pub csc: RgbColor,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            sin: RgbColor::new(0xdc, 0x35, 0x45),
            cos: RgbColor::new(0x0d, 0x6e, 0xfd),
            tan: RgbColor::new(0x19, 0x87, 0x54),
            cot: RgbColor::new(0x0d, 0xca, 0xf0),
            sec: RgbColor::new(0xfd, 0x7e, 0x14),
            csc: RgbColor::new(0x6f, 0x42, 0xc1),
        }
    }
}

/// Character grid used by snapshot mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SnapshotConfig {
    pub cols: u16,
    pub rows: u16,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self { cols: 60, rows: 30 }
    }
}

impl SnapshotConfig {
    /// Parse size string like "60x30"
    pub fn parse_size(s: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidSize(s.to_string());
        let (cols, rows) = s.trim().split_once('x').ok_or_else(invalid)?;
        let cols: u16 = cols.trim().parse().map_err(|_| invalid())?;
        let rows: u16 = rows.trim().parse().map_err(|_| invalid())?;
        if cols == 0 || rows == 0 {
            return Err(invalid());
        }
        Ok(Self { cols, rows })
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/unitrig/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("unitrig").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists.
    /// Returns None if the file doesn't exist, logs a warning on parse errors.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("{:#}. Using defaults.", e);
                None
            }
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, Self::generate_config_template())?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r##"# unitrig configuration

[display]
# Display mode: "terminal" (interactive) or "snapshot" (print one frame)
mode = "terminal"
# Function set: "classic" (sin, cos, tan) or "extended" (all six)
variant = "classic"
# Unit the toggle starts in: "degrees" (1° snapping) or "radians" (π/24 snapping)
unit = "degrees"

[canvas]
# Logical canvas size in pixels; the terminal scales it to fit
width = 600.0
height = 600.0
# Pixels per model unit (the circle's radius)
unit_scale = 200.0
# Spacing of the background grid in pixels
grid_step = 50.0
show_grid = true

[colors]
# Neutral colors tuned for a "dark" or "light" terminal background
theme = "dark"
sin = "#dc3545"
cos = "#0d6efd"
tan = "#198754"
cot = "#0dcaf0"
sec = "#fd7e14"
csc = "#6f42c1"

[snapshot]
# Character grid for snapshot mode
cols = 60
rows = 30
"##
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) -> Result<(), ConfigError> {
        if let Some(mode) = args.mode {
            self.display.mode = mode;
        }
        if let Some(variant) = args.variant {
            self.display.variant = variant;
        }
        if let Some(unit) = args.unit {
            self.display.unit = unit;
        }
        if let Some(theme) = args.theme {
            self.colors.theme = theme;
        }
        if let Some(step) = args.grid_step {
            self.canvas.grid_step = step;
        }
        if args.no_grid {
            self.canvas.show_grid = false;
        }
        if let Some(ref size) = args.size {
            self.snapshot = SnapshotConfig::parse_size(size)?;
        }
        Ok(())
    }

    /// Reject canvas values the transform can't work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let canvas = &self.canvas;
        let positive = [
            ("width", canvas.width),
            ("height", canvas.height),
            ("unit_scale", canvas.unit_scale),
            ("grid_step", canvas.grid_step),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidCanvas(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if canvas.grid_step < MIN_GRID_STEP {
            return Err(ConfigError::InvalidCanvas(format!(
                "grid_step must be at least {} px, got {}",
                MIN_GRID_STEP, canvas.grid_step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn template_parses_to_defaults() {
        let parsed: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str(
            r##"
            [display]
            mode = "snapshot"
            variant = "extended"

            [canvas]
            width = 400.0
            height = 300.0
            unit_scale = 100.0
            grid_step = 25.0

            [colors]
            sin = "#ff0000"
            "##,
        )
        .unwrap();
        assert_eq!(parsed.display.mode, DisplayMode::Snapshot);
        assert_eq!(parsed.display.unit, AngleUnit::Degrees);
        assert!(parsed.canvas.show_grid);
        assert_eq!(parsed.colors.sin, RgbColor::new(255, 0, 0));
        assert_eq!(parsed.colors.cos, ColorConfig::default().cos);
        assert_eq!(parsed.snapshot, SnapshotConfig::default());
    }

    #[test]
    fn single_key_files_keep_every_other_default() {
        let parsed: Config = toml::from_str("[display]\nunit = \"radians\"").unwrap();
        assert_eq!(parsed.display.unit, AngleUnit::Radians);
        assert_eq!(parsed.display.mode, DisplayMode::Terminal);
        assert_eq!(parsed.canvas, CanvasConfig::default());

        let parsed: Config = toml::from_str("[colors]\ntheme = \"light\"").unwrap();
        assert_eq!(parsed.colors.theme, Theme::Light);
        assert_eq!(parsed.colors.sin, ColorConfig::default().sin);
        assert_eq!(parsed.display, DisplayConfig::default());

        let parsed: Config = toml::from_str("[canvas]\nshow_grid = false").unwrap();
        assert!(!parsed.canvas.show_grid);
        assert_eq!(parsed.canvas.grid_step, 50.0);

        assert_eq!(toml::from_str::<Config>("").unwrap(), Config::default());
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let result: Result<ColorConfig, _> = toml::from_str(r#"sin = "crimson""#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid color 'crimson'"), "{}", err);
    }

    #[test]
    fn parses_snapshot_size() {
        assert_eq!(
            SnapshotConfig::parse_size("80x40"),
            Ok(SnapshotConfig { cols: 80, rows: 40 })
        );
        assert_eq!(
            SnapshotConfig::parse_size("80"),
            Err(ConfigError::InvalidSize("80".to_string()))
        );
        assert!(SnapshotConfig::parse_size("0x10").is_err());
        assert!(SnapshotConfig::parse_size("axb").is_err());
    }

    #[test]
    fn cli_overrides_file_values() {
        let mut config = Config::default();
        config.display.variant = Variant::Extended;
        config.canvas.grid_step = 20.0;

        let args = crate::Args::parse_from([
            "unitrig", "--mode", "snapshot", "--unit", "radians", "--no-grid", "--size", "40x20",
        ]);
        config.merge_args(&args).unwrap();

        assert_eq!(config.display.mode, DisplayMode::Snapshot);
        assert_eq!(config.display.unit, AngleUnit::Radians);
        // untouched by the CLI
        assert_eq!(config.display.variant, Variant::Extended);
        assert_eq!(config.canvas.grid_step, 20.0);
        assert!(!config.canvas.show_grid);
        assert_eq!(config.snapshot, SnapshotConfig { cols: 40, rows: 20 });
    }

    #[test]
    fn rejects_degenerate_canvas() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.canvas.unit_scale = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCanvas(_))));
        config.canvas.unit_scale = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_sub_pixel_grid_step() {
        let mut config = Config::default();
        config.canvas.grid_step = 0.000001;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCanvas(_))));
        config.canvas.grid_step = MIN_GRID_STEP;
        assert!(config.validate().is_ok());

        // --no-grid doesn't exempt a bad step
        config.canvas.show_grid = false;
        config.canvas.grid_step = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn variants_pick_function_sets() {
        assert_eq!(Variant::Classic.functions().len(), 3);
        assert_eq!(Variant::Extended.functions(), &TrigFunction::ALL);
    }
}
