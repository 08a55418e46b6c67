use clap::ValueEnum;
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{ColorConfig, ConfigError};
use crate::geometry::{SegmentKind, TrigFunction};

/// An sRGB color, written as `#rrggbb` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse "#dc3545", "dc3545" or the short "#abc" form.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let rgb: Srgb<u8> = hex.trim().parse().ok()?;
        Some(Self::new(rgb.red, rgb.green, rgb.blue))
    }

    /// Flip HSL lightness, keeping hue and saturation. Turns the light-paper
    /// neutrals into their dark-terminal counterparts.
    pub fn invert_lightness(self) -> Self {
        let rgb: Srgb = Srgb::new(self.r, self.g, self.b).into_format();
        let mut hsl: Hsl = rgb.into_color();
        hsl.lightness = 1.0 - hsl.lightness;
        let out: Srgb = hsl.into_color();
        let out: Srgb<u8> = out.into_format();
        Self::new(out.red, out.green, out.blue)
    }
}

impl FromStr for RgbColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| ConfigError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<RgbColor> for ratatui::style::Color {
    fn from(c: RgbColor) -> Self {
        ratatui::style::Color::Rgb(c.r, c.g, c.b)
    }
}

impl Serialize for RgbColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Background the diagram is drawn against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Resolved colors for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTheme {
    pub grid: RgbColor,
    pub axes: RgbColor,
    pub circle: RgbColor,
    pub ink: RgbColor,
    pub muted: RgbColor,
    pub sin: RgbColor,
    pub cos: RgbColor,
    pub tan: RgbColor,
    pub cot: RgbColor,
    pub sec: RgbColor,
    pub csc: RgbColor,
}

const GRID: RgbColor = RgbColor::new(0xf0, 0xf0, 0xf0);
const AXES: RgbColor = RgbColor::new(0x33, 0x33, 0x33);
const CIRCLE: RgbColor = RgbColor::new(0xce, 0xd4, 0xda);
const INK: RgbColor = RgbColor::new(0x33, 0x33, 0x33);
const MUTED: RgbColor = RgbColor::new(0xad, 0xb5, 0xbd);

impl ColorTheme {
    pub fn from_config(config: &ColorConfig) -> Self {
        let neutral = |c: RgbColor| match config.theme {
            Theme::Light => c,
            Theme::Dark => c.invert_lightness(),
        };
        Self {
            grid: neutral(GRID),
            axes: neutral(AXES),
            circle: neutral(CIRCLE),
            ink: neutral(INK),
            muted: neutral(MUTED),
            sin: config.sin,
            cos: config.cos,
            tan: config.tan,
            cot: config.cot,
            sec: config.sec,
            csc: config.csc,
        }
    }

    pub fn function(&self, function: TrigFunction) -> RgbColor {
        match function {
            TrigFunction::Sin => self.sin,
            TrigFunction::Cos => self.cos,
            TrigFunction::Tan => self.tan,
            TrigFunction::Cot => self.cot,
            TrigFunction::Sec => self.sec,
            TrigFunction::Csc => self.csc,
        }
    }

    pub fn segment(&self, kind: SegmentKind) -> RgbColor {
        kind.function().map_or(self.ink, |f| self.function(f))
    }
}
