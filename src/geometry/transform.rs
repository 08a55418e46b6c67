use super::Point;

/// Fixed affine map from model units (circle radius 1) to canvas pixels.
/// Canvas y grows downward, model y grows upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    pub center: Point,
    pub scale: f64,
}

impl ScreenTransform {
    pub fn new(center: Point, scale: f64) -> Self {
        Self { center, scale }
    }

    /// Center the origin on a `width` x `height` canvas.
    pub fn for_canvas(width: f64, height: f64, scale: f64) -> Self {
        Self::new(Point::new(width / 2.0, height / 2.0), scale)
    }

    pub fn to_screen(&self, model: Point) -> Point {
        Point::new(
            self.center.x + model.x * self.scale,
            self.center.y - model.y * self.scale,
        )
    }

    /// Offset of a canvas pixel from the center, in pixels, with y pointing up.
    pub fn relative(&self, screen: Point) -> (f64, f64) {
        (screen.x - self.center.x, self.center.y - screen.y)
    }
}

/// Where the drawing surface sits in the host's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }

    /// Convert a host position into canvas pixels for a canvas of the given size.
    /// Bounds with no extent leave the offset unscaled.
    pub fn to_canvas(&self, x: f64, y: f64, canvas_width: f64, canvas_height: f64) -> Point {
        let sx = if self.width > 0.0 { canvas_width / self.width } else { 1.0 };
        let sy = if self.height > 0.0 { canvas_height / self.height } else { 1.0 };
        Point::new((x - self.left) * sx, (y - self.top) * sy)
    }
}

/// A pointer or touch position in host coordinates plus the surface it targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub x: f64,
    pub y: f64,
    pub bounds: SurfaceBounds,
}

impl PointerInput {
    pub fn new(x: f64, y: f64, bounds: SurfaceBounds) -> Self {
        Self { x, y, bounds }
    }
}
