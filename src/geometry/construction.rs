//! Geometric construction of the trig values as line segments in model units.

use super::{Point, TrigFunction};

/// Below this magnitude a denominator counts as zero and the segments
/// that depend on it are not built.
pub const ASYMPTOTE_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Cosine,
    Sine,
    Tangent,
    Secant,
    Cotangent,
    Cosecant,
    Radius,
}

impl SegmentKind {
    /// The function whose value this segment's length shows, if any.
    pub fn function(&self) -> Option<TrigFunction> {
        match self {
            SegmentKind::Cosine => Some(TrigFunction::Cos),
            SegmentKind::Sine => Some(TrigFunction::Sin),
            SegmentKind::Tangent => Some(TrigFunction::Tan),
            SegmentKind::Secant => Some(TrigFunction::Sec),
            SegmentKind::Cotangent => Some(TrigFunction::Cot),
            SegmentKind::Cosecant => Some(TrigFunction::Csc),
            SegmentKind::Radius => None,
        }
    }

    /// Hypotenuses run from the origin; legs lie on a circle tangent or an axis.
    pub fn is_hypotenuse(&self) -> bool {
        matches!(self, SegmentKind::Secant | SegmentKind::Cosecant | SegmentKind::Radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub from: Point,
    pub to: Point,
}

impl Segment {
    fn new(kind: SegmentKind, from: Point, to: Point) -> Self {
        Self { kind, from, to }
    }
}

/// All segments for one angle, grouped by drawing layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Construction {
    /// The point on the circle.
    pub point: Point,
    /// Cotangent and cosecant.
    pub secondary: Vec<Segment>,
    /// Tangent and secant.
    pub primary: Vec<Segment>,
    /// Cosine then sine.
    pub triangle: Vec<Segment>,
    pub radius: Segment,
}

fn sign(v: f64) -> f64 {
    if v >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

impl Construction {
    /// Build the segments for `angle`, keeping only those whose function is enabled.
    pub fn new(angle: f64, functions: &[TrigFunction]) -> Self {
        let point = Point::on_circle(angle);
        let enabled = |kind: SegmentKind| kind.function().is_some_and(|f| functions.contains(&f));

        let mut secondary = Vec::new();
        if point.y.abs() >= ASYMPTOTE_EPSILON {
            let target_y = sign(point.y);
            let end = Point::new(TrigFunction::Cot.evaluate(angle) * target_y, target_y);
            if enabled(SegmentKind::Cotangent) {
                secondary.push(Segment::new(SegmentKind::Cotangent, Point::new(0.0, target_y), end));
            }
            if enabled(SegmentKind::Cosecant) {
                secondary.push(Segment::new(SegmentKind::Cosecant, Point::ORIGIN, end));
            }
        }

        let mut primary = Vec::new();
        if point.x.abs() >= ASYMPTOTE_EPSILON {
            let target_x = sign(point.x);
            let end = Point::new(target_x, TrigFunction::Tan.evaluate(angle) * target_x);
            if enabled(SegmentKind::Tangent) {
                primary.push(Segment::new(SegmentKind::Tangent, Point::new(target_x, 0.0), end));
            }
            if enabled(SegmentKind::Secant) {
                primary.push(Segment::new(SegmentKind::Secant, Point::ORIGIN, end));
            }
        }

        let foot = Point::new(point.x, 0.0);
        let triangle = [
            Segment::new(SegmentKind::Cosine, Point::ORIGIN, foot),
            Segment::new(SegmentKind::Sine, foot, point),
        ]
        .into_iter()
        .filter(|s| enabled(s.kind))
        .collect();

        Self {
            point,
            secondary,
            primary,
            triangle,
            radius: Segment::new(SegmentKind::Radius, Point::ORIGIN, point),
        }
    }

    /// Every segment, back to front.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.secondary
            .iter()
            .chain(&self.primary)
            .chain(&self.triangle)
            .chain(std::iter::once(&self.radius))
    }
}
