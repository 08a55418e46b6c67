//! Numeric readouts for the current angle.

use std::f64::consts::PI;

use crate::controller::UnitCircle;
use crate::geometry::angle::{self, AngleUnit};
use crate::geometry::{Point, TrigFunction};
use crate::surface::{Emphasis, Label, MemorySink, OutputSink};

/// Ratios beyond this magnitude are shown as an infinity glyph.
pub const INFINITY_THRESHOLD: f64 = 100.0;

/// Format with `digits` decimals, dropping the sign of a value that rounds to zero.
fn fixed(value: f64, digits: usize) -> String {
    let s = format!("{:.*}", digits, value);
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => s,
    }
}

/// Format a trig ratio to three decimals, or as "+∞" / "−∞" near an asymptote.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "undefined".to_string();
    }
    if value.abs() > INFINITY_THRESHOLD {
        return if value > 0.0 { "+∞" } else { "−∞" }.to_string();
    }
    fixed(value, 3)
}

pub fn format_degrees(radians: f64) -> String {
    format!("{}°", fixed(angle::display_degrees(radians), 1))
}

pub fn format_pi_multiple(radians: f64) -> String {
    format!("({}π)", fixed(angle::normalize(radians) / PI, 2))
}

pub fn format_coords(radians: f64) -> String {
    let p = Point::on_circle(radians);
    format!("({}, {})", fixed(p.x, 2), fixed(p.y, 2))
}

/// Write every readout for `state` into `sink`.
pub fn update(sink: &mut dyn OutputSink, state: &UnitCircle, functions: &[TrigFunction]) {
    let angle = state.angle();

    let (deg, rad) = match state.unit() {
        AngleUnit::Degrees => (Emphasis::Active, Emphasis::Muted),
        AngleUnit::Radians => (Emphasis::Muted, Emphasis::Active),
    };
    sink.set_emphasis(Label::AngleDegrees, deg);
    sink.set_emphasis(Label::AngleRadians, rad);

    sink.write_text(Label::AngleDegrees, &format_degrees(angle));
    sink.write_text(Label::AngleRadians, &format_pi_multiple(angle));
    sink.write_text(Label::Coords, &format_coords(angle));

    for function in functions {
        sink.write_text(Label::Value(*function), &format_value(function.evaluate(angle)));
    }
}

/// One panel line: caption on the left, value on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub caption: &'static str,
    pub label: Label,
    pub text: String,
    pub emphasis: Emphasis,
}

/// Panel contents in display order, for backends that lay out plain rows.
pub fn rows(sink: &MemorySink, functions: &[TrigFunction]) -> Vec<PanelRow> {
    let mut labels = vec![
        ("angle", Label::AngleDegrees),
        ("", Label::AngleRadians),
        ("(x, y)", Label::Coords),
    ];
    labels.extend(functions.iter().map(|f| (f.name(), Label::Value(*f))));
    labels.push(("unit", Label::Mode));

    labels
        .into_iter()
        .map(|(caption, label)| PanelRow {
            caption,
            label,
            text: sink.text(label).unwrap_or("").to_string(),
            emphasis: sink.emphasis(label),
        })
        .collect()
}
