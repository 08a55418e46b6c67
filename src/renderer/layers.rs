//! Individual scene layers.

use std::f64::consts::TAU;

use crate::color::ColorTheme;
use crate::config::CanvasConfig;
use crate::geometry::{Construction, Point, ScreenTransform, Segment};
use crate::surface::{DrawSurface, Stroke, TextAlign, TextBaseline, TextStyle};

const GRID_DASH: [f64; 2] = [2.0, 6.0];
const LEG_WIDTH: f64 = 4.0;
const HYPOTENUSE_WIDTH: f64 = 2.0;
const RADIUS_WIDTH: f64 = 3.0;
const MARKER_RADIUS: f64 = 6.0;
const LABEL_INSET: f64 = 12.0;

pub fn grid(surface: &mut dyn DrawSurface, canvas: &CanvasConfig, theme: &ColorTheme) {
    surface.set_stroke(&Stroke::dashed(theme.grid, 1.0, &GRID_DASH));

    // Lines are anchored on the center so the axes always sit on a grid line
    let (cx, cy) = (canvas.width / 2.0, canvas.height / 2.0);
    let step = canvas.grid_step;

    let first_x = cx - (cx / step).floor() * step;
    let mut x = first_x;
    while x <= canvas.width {
        surface.stroke_line(Point::new(x, 0.0), Point::new(x, canvas.height));
        x += step;
    }

    let first_y = cy - (cy / step).floor() * step;
    let mut y = first_y;
    while y <= canvas.height {
        surface.stroke_line(Point::new(0.0, y), Point::new(canvas.width, y));
        y += step;
    }
}

pub fn axes(
    surface: &mut dyn DrawSurface,
    canvas: &CanvasConfig,
    transform: &ScreenTransform,
    theme: &ColorTheme,
) {
    let center = transform.center;
    surface.set_stroke(&Stroke::solid(theme.axes, 2.0));
    surface.stroke_line(Point::new(0.0, center.y), Point::new(canvas.width, center.y));
    surface.stroke_line(Point::new(center.x, 0.0), Point::new(center.x, canvas.height));

    let style = |align, baseline| TextStyle {
        color: theme.axes,
        align,
        baseline,
    };
    surface.fill_text(
        "x",
        canvas.width - LABEL_INSET,
        center.y,
        &style(TextAlign::Right, TextBaseline::Bottom),
    );
    surface.fill_text(
        "y",
        center.x,
        LABEL_INSET,
        &style(TextAlign::Left, TextBaseline::Top),
    );

    // Unit ticks where the circle crosses the x axis
    let below = style(TextAlign::Center, TextBaseline::Top);
    let one = transform.to_screen(Point::new(1.0, 0.0));
    surface.fill_text("1", one.x, one.y + LABEL_INSET, &below);
    let minus_one = transform.to_screen(Point::new(-1.0, 0.0));
    surface.fill_text("-1", minus_one.x, minus_one.y + LABEL_INSET, &below);
}

pub fn reference_circle(surface: &mut dyn DrawSurface, transform: &ScreenTransform, theme: &ColorTheme) {
    surface.set_stroke(&Stroke::solid(theme.circle, 2.0));
    surface.begin_path();
    surface.arc(transform.center.x, transform.center.y, transform.scale, 0.0, TAU);
    surface.stroke();
}

pub fn segments(
    surface: &mut dyn DrawSurface,
    transform: &ScreenTransform,
    segments: &[Segment],
    theme: &ColorTheme,
) {
    for segment in segments {
        let width = if segment.kind.is_hypotenuse() {
            HYPOTENUSE_WIDTH
        } else {
            LEG_WIDTH
        };
        surface.set_stroke(&Stroke::solid(theme.segment(segment.kind), width));
        surface.stroke_line(transform.to_screen(segment.from), transform.to_screen(segment.to));
    }
}

pub fn radius_vector(
    surface: &mut dyn DrawSurface,
    transform: &ScreenTransform,
    construction: &Construction,
    theme: &ColorTheme,
) {
    let radius = &construction.radius;
    surface.set_stroke(&Stroke::solid(theme.ink, RADIUS_WIDTH));
    surface.stroke_line(transform.to_screen(radius.from), transform.to_screen(radius.to));

    let tip = transform.to_screen(construction.point);
    surface.set_fill(theme.ink);
    surface.begin_path();
    surface.arc(tip.x, tip.y, MARKER_RADIUS, 0.0, TAU);
    surface.fill();
}
