//! Scene renderer
//!
//! Redraws the whole diagram from the current angle onto any [`DrawSurface`].
//! Layers are painted back to front, so later layers cover earlier ones:
//! grid, axes, reference circle, cot/csc, tan/sec, the sin/cos triangle, and
//! finally the radius with its marker.

pub mod layers;

use crate::color::ColorTheme;
use crate::config::CanvasConfig;
use crate::controller::UnitCircle;
use crate::geometry::{Construction, ScreenTransform, TrigFunction};
use crate::surface::DrawSurface;

/// Parameters controlling how a frame is rendered.
pub struct SceneParams<'a> {
    pub canvas: &'a CanvasConfig,
    pub theme: &'a ColorTheme,
    pub functions: &'a [TrigFunction],
}

/// Main entry point: render a complete frame to the surface.
pub fn render_scene(
    surface: &mut dyn DrawSurface,
    state: &UnitCircle,
    transform: &ScreenTransform,
    params: &SceneParams,
) {
    let canvas = params.canvas;
    surface.clear(0.0, 0.0, canvas.width, canvas.height);

    if canvas.show_grid {
        layers::grid(surface, canvas, params.theme);
    }
    layers::axes(surface, canvas, transform, params.theme);
    layers::reference_circle(surface, transform, params.theme);

    let construction = Construction::new(state.angle(), params.functions);
    layers::segments(surface, transform, &construction.secondary, params.theme);
    layers::segments(surface, transform, &construction.primary, params.theme);
    layers::segments(surface, transform, &construction.triangle, params.theme);
    layers::radius_vector(surface, transform, &construction, params.theme);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::controller::{AngleController, InputEvent};
    use crate::geometry::{Point, PointerInput, SurfaceBounds};
    use crate::surface::recording::{DrawCommand, RecordingSurface};
    use crate::surface::MemorySink;

    fn render_at(model: Point, show_grid: bool) -> (RecordingSurface, ColorTheme) {
        let mut config = Config::default();
        config.canvas.show_grid = show_grid;
        let theme = ColorTheme::from_config(&config.colors);

        let mut controller = AngleController::new(&config.canvas);
        let mut sink = MemorySink::default();
        let p = controller.transform().to_screen(model);
        let bounds = SurfaceBounds::new(0.0, 0.0, 600.0, 600.0);
        controller.handle(InputEvent::PointerDown(PointerInput::new(p.x, p.y, bounds)), &mut sink);

        let mut surface = RecordingSurface::default();
        let params = SceneParams {
            canvas: &config.canvas,
            theme: &theme,
            functions: &TrigFunction::ALL,
        };
        render_scene(&mut surface, controller.state(), controller.transform(), &params);
        (surface, theme)
    }

    fn colors_in_order(surface: &RecordingSurface) -> Vec<crate::color::RgbColor> {
        let mut colors: Vec<_> = surface
            .stroked_paths()
            .into_iter()
            .map(|p| p.stroke.color)
            .collect();
        colors.dedup();
        colors
    }

    #[test]
    fn frame_starts_with_full_clear() {
        let (surface, _) = render_at(Point::new(1.0, 1.0), true);
        assert_eq!(
            surface.commands[0],
            DrawCommand::Clear { x: 0.0, y: 0.0, width: 600.0, height: 600.0 }
        );
    }

    #[test]
    fn layers_draw_back_to_front() {
        // 63°, inside the canvas, with every construction visible
        let (surface, theme) = render_at(Point::new(0.5, 1.0), true);
        assert_eq!(
            colors_in_order(&surface),
            vec![
                theme.grid,
                theme.axes,
                theme.circle,
                theme.cot,
                theme.csc,
                theme.tan,
                theme.sec,
                theme.cos,
                theme.sin,
                theme.ink,
            ]
        );
        // Marker is filled after everything is stroked
        assert_eq!(surface.commands.last(), Some(&DrawCommand::Fill));
    }

    #[test]
    fn tangent_and_secant_skipped_at_ninety_degrees() {
        let (surface, theme) = render_at(Point::new(0.0, 1.0), false);
        let colors = colors_in_order(&surface);
        assert!(!colors.contains(&theme.tan));
        assert!(!colors.contains(&theme.sec));
        assert!(colors.contains(&theme.cot));
    }

    #[test]
    fn cotangent_and_cosecant_skipped_at_zero() {
        let (surface, theme) = render_at(Point::new(1.0, 0.0), false);
        let colors = colors_in_order(&surface);
        assert!(!colors.contains(&theme.cot));
        assert!(!colors.contains(&theme.csc));
        assert!(colors.contains(&theme.tan));
    }

    #[test]
    fn segments_land_on_screen_coordinates() {
        let (surface, theme) = render_at(Point::new(1.0, 1.0), false);
        let paths = surface.stroked_paths();

        let tan = paths.iter().find(|p| p.stroke.color == theme.tan).unwrap();
        assert_eq!(tan.stroke.width, 4.0);
        let (x0, y0) = tan.points[0];
        let (x1, y1) = tan.points[1];
        assert!((x0 - 500.0).abs() < 1e-9 && (y0 - 300.0).abs() < 1e-9);
        assert!((x1 - 500.0).abs() < 1e-9 && (y1 - 100.0).abs() < 1e-9);

        let sec = paths.iter().find(|p| p.stroke.color == theme.sec).unwrap();
        assert_eq!(sec.stroke.width, 2.0);
        assert_eq!(sec.points[0], (300.0, 300.0));
    }

    #[test]
    fn grid_can_be_disabled() {
        let (surface, theme) = render_at(Point::new(1.0, 1.0), false);
        assert!(!colors_in_order(&surface).contains(&theme.grid));
    }

    #[test]
    fn axis_labels_are_drawn() {
        let (surface, _) = render_at(Point::new(1.0, 1.0), false);
        let texts = surface.texts();
        for label in ["x", "y", "1", "-1"] {
            assert!(texts.contains(&label), "missing {}", label);
        }
    }
}
