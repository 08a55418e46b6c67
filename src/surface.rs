//! Capabilities the renderer and the value panel draw through.
//!
//! [`DrawSurface`] is a small canvas-style 2D API: stroke and fill styling,
//! path construction, and text. [`OutputSink`] is the set of text labels the
//! panel writes into, plus the unit toggle it reads. Backends implement both;
//! the core never touches a terminal directly.

use std::collections::HashMap;

use crate::color::RgbColor;
use crate::geometry::{Point, TrigFunction};

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: RgbColor,
    pub width: f64,
    /// Alternating on/off lengths in canvas pixels. Empty means solid.
    pub dash: Vec<f64>,
}

impl Stroke {
    pub fn solid(color: RgbColor, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    pub fn dashed(color: RgbColor, width: f64, pattern: &[f64]) -> Self {
        Self {
            color,
            width,
            dash: pattern.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: RgbColor,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// A 2D drawing target addressed in canvas pixels.
pub trait DrawSurface {
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_stroke(&mut self, stroke: &Stroke);
    fn set_fill(&mut self, color: RgbColor);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Circular arc around (cx, cy), angles in radians, clockwise on screen.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);

    /// Stroke a single straight line with the current stroke style.
    fn stroke_line(&mut self, from: Point, to: Point) {
        self.begin_path();
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.stroke();
    }
}

/// Text outputs of the value panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    AngleDegrees,
    AngleRadians,
    Coords,
    Value(TrigFunction),
    Mode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    Active,
    Muted,
}

/// Where the panel writes its strings, and where the unit toggle is read.
pub trait OutputSink {
    fn write_text(&mut self, label: Label, text: &str);
    fn set_emphasis(&mut self, label: Label, emphasis: Emphasis);
    /// Checked means radians.
    fn toggle_checked(&self) -> bool;
}

/// Keeps label state in memory for a backend to lay out later.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    texts: HashMap<Label, String>,
    emphasis: HashMap<Label, Emphasis>,
    checked: bool,
}

impl MemorySink {
    pub fn with_toggle(checked: bool) -> Self {
        Self {
            checked,
            ..Self::default()
        }
    }

    pub fn text(&self, label: Label) -> Option<&str> {
        self.texts.get(&label).map(String::as_str)
    }

    pub fn emphasis(&self, label: Label) -> Emphasis {
        self.emphasis.get(&label).copied().unwrap_or_default()
    }

    /// Flip the toggle the way a user click would.
    pub fn flip_toggle(&mut self) {
        self.checked = !self.checked;
    }
}

impl OutputSink for MemorySink {
    fn write_text(&mut self, label: Label, text: &str) {
        self.texts.insert(label, text.to_string());
    }

    fn set_emphasis(&mut self, label: Label, emphasis: Emphasis) {
        self.emphasis.insert(label, emphasis);
    }

    fn toggle_checked(&self) -> bool {
        self.checked
    }
}


#[cfg(test)]
mod tests {
    use super::recording::{DrawCommand, RecordingSurface};
    use super::*;

    #[test]
    fn stroke_line_builds_a_two_point_path() {
        let mut surface = RecordingSurface::default();
        surface.set_stroke(&Stroke::solid(RgbColor::new(1, 2, 3), 2.0));
        surface.stroke_line(Point::new(0.0, 0.0), Point::new(10.0, 5.0));
        assert_eq!(
            surface.commands[1..],
            [
                DrawCommand::BeginPath,
                DrawCommand::MoveTo(0.0, 0.0),
                DrawCommand::LineTo(10.0, 5.0),
                DrawCommand::Stroke,
            ]
        );
        let paths = surface.stroked_paths();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].stroke.width, 2.0);
    }

    #[test]
    fn memory_sink_tracks_labels_and_toggle() {
        let mut sink = MemorySink::with_toggle(false);
        sink.write_text(Label::Value(TrigFunction::Sin), "0.500");
        sink.set_emphasis(Label::AngleDegrees, Emphasis::Active);
        assert_eq!(sink.text(Label::Value(TrigFunction::Sin)), Some("0.500"));
        assert_eq!(sink.text(Label::Coords), None);
        assert_eq!(sink.emphasis(Label::AngleDegrees), Emphasis::Active);
        assert_eq!(sink.emphasis(Label::AngleRadians), Emphasis::Normal);

        assert!(!sink.toggle_checked());
        sink.flip_toggle();
        assert!(sink.toggle_checked());
    }
}
