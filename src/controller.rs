//! Pointer-driven angle state.
//!
//! [`AngleController`] owns the [`UnitCircle`] state and runs the two-state
//! drag machine. Every handler runs to completion and reports whether the
//! caller should redraw.

use tracing::{debug, info};

use crate::config::CanvasConfig;
use crate::geometry::angle::{self, AngleUnit};
use crate::geometry::{PointerInput, ScreenTransform};
use crate::surface::{Label, OutputSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerInput),
    PointerMove(PointerInput),
    PointerUp,
    TouchStart(PointerInput),
    TouchMove(PointerInput),
    TouchEnd,
    /// The unit toggle changed; its new state is read from the output sink.
    ToggleChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Scene and panel need to be redrawn.
    pub redraw: bool,
    /// The host should suppress its own scroll/gesture handling for this event.
    pub prevent_default: bool,
}

/// Everything the diagram shows is derived from this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCircle {
    angle: f64,
    unit: AngleUnit,
    drag: DragState,
}

impl Default for UnitCircle {
    fn default() -> Self {
        Self {
            angle: 0.0,
            unit: AngleUnit::Degrees,
            drag: DragState::Idle,
        }
    }
}

impl UnitCircle {
    /// Current angle in radians, in [0, 2π).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }
}

pub struct AngleController {
    state: UnitCircle,
    transform: ScreenTransform,
    canvas_width: f64,
    canvas_height: f64,
}

impl AngleController {
    pub fn new(canvas: &CanvasConfig) -> Self {
        Self {
            state: UnitCircle::default(),
            transform: ScreenTransform::for_canvas(canvas.width, canvas.height, canvas.unit_scale),
            canvas_width: canvas.width,
            canvas_height: canvas.height,
        }
    }

    pub fn state(&self) -> &UnitCircle {
        &self.state
    }

    pub fn transform(&self) -> &ScreenTransform {
        &self.transform
    }

    pub fn handle(&mut self, event: InputEvent, sink: &mut dyn OutputSink) -> EventOutcome {
        match event {
            InputEvent::PointerDown(input) => self.press(input, false),
            InputEvent::TouchStart(input) => self.press(input, true),
            InputEvent::PointerMove(input) => self.drag_to(input, false),
            InputEvent::TouchMove(input) => self.drag_to(input, true),
            InputEvent::PointerUp | InputEvent::TouchEnd => {
                self.state.drag = DragState::Idle;
                EventOutcome::default()
            }
            InputEvent::ToggleChanged => self.sync_unit(sink),
        }
    }

    fn press(&mut self, input: PointerInput, touch: bool) -> EventOutcome {
        if !input.bounds.contains(input.x, input.y) {
            return EventOutcome::default();
        }
        self.state.drag = DragState::Dragging;
        EventOutcome {
            redraw: self.point_at(input),
            prevent_default: touch,
        }
    }

    fn drag_to(&mut self, input: PointerInput, touch: bool) -> EventOutcome {
        if self.state.drag != DragState::Dragging {
            return EventOutcome::default();
        }
        EventOutcome {
            redraw: self.point_at(input),
            prevent_default: touch,
        }
    }

    /// Aim the radius at a host position. Returns false when the position is
    /// exactly at the center, which leaves the angle as it was.
    pub fn point_at(&mut self, input: PointerInput) -> bool {
        let canvas = input
            .bounds
            .to_canvas(input.x, input.y, self.canvas_width, self.canvas_height);
        let (dx, dy) = self.transform.relative(canvas);

        let Some(raw) = angle::from_vector(dx, dy) else {
            debug!("Pointer at center, keeping angle {:.4}", self.state.angle);
            return false;
        };

        self.state.angle = self.state.unit.snap(raw);
        debug!(raw, snapped = self.state.angle, "Angle updated");
        true
    }

    fn sync_unit(&mut self, sink: &mut dyn OutputSink) -> EventOutcome {
        let unit = AngleUnit::from_toggle(sink.toggle_checked());
        if unit != self.state.unit {
            info!("Display unit switched to {:?}", unit);
        }
        self.state.unit = unit;
        sink.write_text(Label::Mode, unit.label());
        EventOutcome {
            redraw: true,
            prevent_default: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::geometry::{Point, SurfaceBounds};
    use crate::surface::MemorySink;

    fn controller() -> AngleController {
        AngleController::new(&Config::default().canvas)
    }

    fn bounds() -> SurfaceBounds {
        SurfaceBounds::new(0.0, 0.0, 600.0, 600.0)
    }

    fn at_model(c: &AngleController, x: f64, y: f64) -> PointerInput {
        let p = c.transform().to_screen(Point::new(x, y));
        PointerInput::new(p.x, p.y, bounds())
    }

    fn degrees(c: &AngleController) -> f64 {
        c.state().angle().to_degrees()
    }

    #[test]
    fn starts_idle_at_zero_degrees() {
        let c = controller();
        assert_eq!(c.state().angle(), 0.0);
        assert_eq!(c.state().unit(), AngleUnit::Degrees);
        assert_eq!(c.state().drag(), DragState::Idle);
    }

    #[test]
    fn pointer_down_sets_angle_and_starts_drag() {
        let mut c = controller();
        let mut sink = MemorySink::default();
        let input = at_model(&c, 0.0, 1.0);
        let outcome = c.handle(InputEvent::PointerDown(input), &mut sink);
        assert!(outcome.redraw);
        assert!(!outcome.prevent_default);
        assert_eq!(c.state().drag(), DragState::Dragging);
        assert!((degrees(&c) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn moves_only_count_while_dragging() {
        let mut c = controller();
        let mut sink = MemorySink::default();

        let outcome = c.handle(InputEvent::PointerMove(at_model(&c, -1.0, 0.0)), &mut sink);
        assert!(!outcome.redraw);
        assert_eq!(c.state().angle(), 0.0);

        c.handle(InputEvent::PointerDown(at_model(&c, 1.0, 1.0)), &mut sink);
        c.handle(InputEvent::PointerMove(at_model(&c, -1.0, 0.0)), &mut sink);
        assert!((degrees(&c) - 180.0).abs() < 1e-9);

        c.handle(InputEvent::PointerUp, &mut sink);
        assert_eq!(c.state().drag(), DragState::Idle);
        c.handle(InputEvent::PointerMove(at_model(&c, 0.0, -1.0)), &mut sink);
        assert!((degrees(&c) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn press_outside_surface_is_ignored() {
        let mut c = controller();
        let mut sink = MemorySink::default();
        let input = PointerInput::new(650.0, 100.0, bounds());
        let outcome = c.handle(InputEvent::PointerDown(input), &mut sink);
        assert_eq!(outcome, EventOutcome::default());
        assert_eq!(c.state().drag(), DragState::Idle);
    }

    #[test]
    fn drag_continues_outside_surface() {
        let mut c = controller();
        let mut sink = MemorySink::default();
        c.handle(InputEvent::PointerDown(at_model(&c, 1.0, 0.0)), &mut sink);
        // far below the canvas, straight down from the center
        let input = PointerInput::new(300.0, 900.0, bounds());
        assert!(c.handle(InputEvent::PointerMove(input), &mut sink).redraw);
        assert!((degrees(&c) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn center_press_keeps_previous_angle() {
        let mut c = controller();
        let mut sink = MemorySink::default();
        c.handle(InputEvent::PointerDown(at_model(&c, 0.0, 1.0)), &mut sink);
        let outcome = c.handle(InputEvent::PointerMove(at_model(&c, 0.0, 0.0)), &mut sink);
        assert!(!outcome.redraw);
        assert!((degrees(&c) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn touch_suppresses_host_gestures() {
        let mut c = controller();
        let mut sink = MemorySink::default();
        let start = c.handle(InputEvent::TouchStart(at_model(&c, 0.5, 0.5)), &mut sink);
        assert!(start.prevent_default);
        assert!((degrees(&c) - 45.0).abs() < 1e-9);

        let mv = c.handle(InputEvent::TouchMove(at_model(&c, -0.5, 0.5)), &mut sink);
        assert!(mv.prevent_default && mv.redraw);

        c.handle(InputEvent::TouchEnd, &mut sink);
        let idle = c.handle(InputEvent::TouchMove(at_model(&c, 0.5, 0.5)), &mut sink);
        assert!(!idle.prevent_default);
    }

    #[test]
    fn degrees_snap_to_whole_degrees() {
        let mut c = controller();
        let mut sink = MemorySink::default();
        let raw = 33.4_f64.to_radians();
        c.handle(InputEvent::PointerDown(at_model(&c, raw.cos(), raw.sin())), &mut sink);
        assert!((degrees(&c) - 33.0).abs() < 1e-9);
    }

    #[test]
    fn toggle_changes_unit_but_not_angle() {
        let mut c = controller();
        let mut sink = MemorySink::with_toggle(false);
        let raw = 33.4_f64.to_radians();
        c.handle(InputEvent::PointerDown(at_model(&c, raw.cos(), raw.sin())), &mut sink);
        c.handle(InputEvent::PointerUp, &mut sink);
        let before = c.state().angle();

        sink.flip_toggle();
        let outcome = c.handle(InputEvent::ToggleChanged, &mut sink);
        assert!(outcome.redraw);
        assert_eq!(c.state().unit(), AngleUnit::Radians);
        assert_eq!(c.state().angle(), before);
        assert_eq!(sink.text(Label::Mode), Some("RAD"));

        // Later input snaps to π/24
        c.handle(InputEvent::PointerDown(at_model(&c, raw.cos(), raw.sin())), &mut sink);
        assert!((degrees(&c) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn scaled_bounds_are_normalized() {
        let mut c = controller();
        let mut sink = MemorySink::default();
        // Canvas shown at 1/3 size with its top-left at (10, 20)
        let bounds = SurfaceBounds::new(10.0, 20.0, 200.0, 200.0);
        // model (0, 1) is canvas (300, 100) -> host (110, 53.33)
        let input = PointerInput::new(110.0, 20.0 + 100.0 / 3.0, bounds);
        c.handle(InputEvent::PointerDown(input), &mut sink);
        assert!((degrees(&c) - 90.0).abs() < 1e-9);
    }
}
