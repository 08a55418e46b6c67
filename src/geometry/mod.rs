//! Unit circle math.
//!
//! Everything in here is a pure function of the current angle: snapping and
//! normalization, the model-to-screen transform, and the line segments that
//! make up the trig construction.

pub mod angle;
pub mod construction;
pub mod transform;

pub use angle::AngleUnit;
pub use construction::{Construction, Segment, SegmentKind};
pub use transform::{PointerInput, ScreenTransform, SurfaceBounds};

/// A 2D point. Model units or canvas pixels depending on where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point on the unit circle at `angle` radians.
    pub fn on_circle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: cos, y: sin }
    }
}

/// The six trig functions the panel can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrigFunction {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
}

impl TrigFunction {
    pub const ALL: [TrigFunction; 6] = [
        TrigFunction::Sin,
        TrigFunction::Cos,
        TrigFunction::Tan,
        TrigFunction::Cot,
        TrigFunction::Sec,
        TrigFunction::Csc,
    ];

    /// Evaluate at `angle` radians. Reciprocals divide through, so the
    /// result can be infinite or huge near an asymptote.
    pub fn evaluate(&self, angle: f64) -> f64 {
        match self {
            TrigFunction::Sin => angle.sin(),
            TrigFunction::Cos => angle.cos(),
            TrigFunction::Tan => angle.tan(),
            TrigFunction::Cot => 1.0 / angle.tan(),
            TrigFunction::Sec => 1.0 / angle.cos(),
            TrigFunction::Csc => 1.0 / angle.sin(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TrigFunction::Sin => "sin",
            TrigFunction::Cos => "cos",
            TrigFunction::Tan => "tan",
            TrigFunction::Cot => "cot",
            TrigFunction::Sec => "sec",
            TrigFunction::Csc => "csc",
        }
    }
}
