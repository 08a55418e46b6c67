//! Headless mode: aim the pointer at one angle and print the frame.

use anyhow::{ensure, Result};
use std::io::Write;
use tracing::info;

use super::braille::BrailleSurface;
use super::Session;
use crate::config::Config;
use crate::controller::InputEvent;
use crate::geometry::{Point, PointerInput, SurfaceBounds};
use crate::panel;

pub fn run(config: &Config, angle_degrees: f64, out: &mut impl Write) -> Result<()> {
    ensure!(
        angle_degrees.is_finite(),
        "angle must be a finite number of degrees, got {}",
        angle_degrees
    );

    let mut session = Session::new(config);
    let canvas = &config.canvas;

    // Stay inside the canvas even when the circle is larger than it
    let reach = (canvas.width.min(canvas.height) / 2.0 / canvas.unit_scale).min(1.0);
    let aim = Point::on_circle(angle_degrees.to_radians());
    let target = session
        .controller
        .transform()
        .to_screen(Point::new(aim.x * reach, aim.y * reach));
    let bounds = SurfaceBounds::new(0.0, 0.0, canvas.width, canvas.height);

    session.dispatch(InputEvent::PointerDown(PointerInput::new(target.x, target.y, bounds)));
    session.dispatch(InputEvent::PointerUp);
    info!(
        "Snapshot at {} ({}x{} cells)",
        session.panel.text(crate::surface::Label::AngleDegrees).unwrap_or("?"),
        config.snapshot.cols,
        config.snapshot.rows
    );

    let mut surface = BrailleSurface::new(
        config.snapshot.cols as usize,
        config.snapshot.rows as usize,
        canvas.width,
        canvas.height,
    );
    session.draw(&mut surface);

    for line in surface.to_lines() {
        writeln!(out, "{}", line.trim_end())?;
    }
    writeln!(out)?;
    for row in panel::rows(&session.panel, session.functions) {
        writeln!(out, "{:<8}{}", row.caption, row.text)?;
    }
    Ok(())
}
