use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Radian mode snaps to multiples of π/24 (7.5°).
pub const RADIAN_SNAP_STEP: f64 = PI / 24.0;

const RADIAN_STEPS_PER_TURN: f64 = 48.0;

/// Which unit the user is working in. Only affects snapping and which
/// readout is emphasized; the stored angle is always radians.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Map the toggle control's checked state to a unit.
    pub fn from_toggle(checked: bool) -> Self {
        if checked {
            AngleUnit::Radians
        } else {
            AngleUnit::Degrees
        }
    }

    /// Short mode label shown next to the toggle.
    pub fn label(&self) -> &'static str {
        match self {
            AngleUnit::Degrees => "DEG",
            AngleUnit::Radians => "RAD",
        }
    }

    /// Round `radians` to this unit's snap step and wrap into [0, 2π).
    ///
    /// Rounding happens in step space and the step index is wrapped before
    /// converting back, so a full turn lands on exactly 0.
    pub fn snap(&self, radians: f64) -> f64 {
        match self {
            AngleUnit::Degrees => {
                let step = radians.to_degrees().round().rem_euclid(360.0);
                normalize(step.to_radians())
            }
            AngleUnit::Radians => {
                let step = (radians / RADIAN_SNAP_STEP)
                    .round()
                    .rem_euclid(RADIAN_STEPS_PER_TURN);
                normalize(step * RADIAN_SNAP_STEP)
            }
        }
    }
}

/// Wrap any finite angle into [0, 2π).
pub fn normalize(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU, and keeps -0.0
    if wrapped >= TAU || wrapped == 0.0 {
        0.0
    } else {
        wrapped
    }
}

/// Degrees in [0, 360) for display.
pub fn display_degrees(radians: f64) -> f64 {
    let degrees = normalize(radians).to_degrees();
    if degrees >= 360.0 {
        0.0
    } else {
        degrees
    }
}

/// Angle of the vector (dx, dy) in [0, 2π), or `None` for the zero vector.
pub fn from_vector(dx: f64, dy: f64) -> Option<f64> {
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    Some(normalize(dy.atan2(dx)))
}
