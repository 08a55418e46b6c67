use anyhow::Result;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use std::io::{self, stdout, Write};
use tracing::{debug, info};

use super::braille::{self, BrailleSurface};
use super::Session;
use crate::config::Config;
use crate::controller::{DragState, InputEvent};
use crate::geometry::{PointerInput, SurfaceBounds};
use crate::panel::{self, PanelRow};
use crate::surface::{Emphasis, Label};

const PANEL_WIDTH: u16 = 28;

/// Where things ended up on the last frame, for mapping mouse input back.
#[derive(Debug, Clone, Copy)]
struct ScreenLayout {
    bounds: SurfaceBounds,
    toggle_row: Option<Rect>,
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self {
            bounds: SurfaceBounds::new(0.0, 0.0, 0.0, 0.0),
            toggle_row: None,
        }
    }
}

pub fn run(config: Config) -> Result<()> {
    enable_raw_mode()?;
    let result = setup_and_run(&config);
    let restored = restore_terminal(&mut stdout(), disable_raw_mode);
    result.and(restored.map_err(Into::into))
}

fn setup_and_run(config: &Config) -> Result<()> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    run_app(&mut terminal, config)
}

/// Leave raw mode, mouse capture and the alternate screen. Every step runs even
/// if an earlier one fails; the first error wins.
fn restore_terminal<W: Write>(
    out: &mut W,
    disable_raw: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let raw = disable_raw();
    let screen = execute!(out, DisableMouseCapture, LeaveAlternateScreen, cursor::Show);
    raw.and(screen)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: &Config) -> Result<()> {
    let mut session = Session::new(config);
    let mut layout = ScreenLayout::default();
    info!(
        "Terminal session started ({:?}, {:?})",
        config.display.variant,
        session.controller.state().unit()
    );

    loop {
        terminal.draw(|frame| {
            layout = draw_frame(frame, &session, config);
        })?;

        // Blocks until the next input; every handler runs to completion before the redraw
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key {
                KeyEvent {
                    code: KeyCode::Char('q') | KeyCode::Esc,
                    ..
                }
                | KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => {
                    break;
                }
                KeyEvent {
                    code: KeyCode::Char('u') | KeyCode::Char(' '),
                    ..
                } => {
                    session.flip_unit();
                }
                _ => {}
            },
            Event::Mouse(mouse) => handle_mouse(&mut session, &layout, mouse),
            _ => {}
        }
    }

    Ok(())
}

fn handle_mouse(session: &mut Session, layout: &ScreenLayout, mouse: MouseEvent) {
    let (x, y) = braille::cell_center(mouse.column, mouse.row);
    let input = PointerInput::new(x, y, layout.bounds);

    let event = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let on_toggle = layout
                .toggle_row
                .is_some_and(|r| r.contains(Position::new(mouse.column, mouse.row)));
            if on_toggle {
                session.flip_unit();
                return;
            }
            InputEvent::PointerDown(input)
        }
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            InputEvent::PointerMove(input)
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if session.controller.state().drag() == DragState::Dragging {
                debug!("Drag released");
            }
            InputEvent::PointerUp
        }
        _ => return,
    };

    let outcome = session.dispatch(event);
    if outcome.redraw {
        debug!(
            "Angle now {}",
            session.panel.text(Label::AngleDegrees).unwrap_or("?")
        );
    }
}

fn draw_frame(frame: &mut Frame, session: &Session, config: &Config) -> ScreenLayout {
    let area = frame.area();

    // Clear with transparent/reset background for terminal transparency support
    let block = Block::default().style(Style::default().bg(Color::Reset));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(PANEL_WIDTH)])
        .split(area);

    let canvas_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" unit circle ");
    let canvas_area = canvas_block.inner(chunks[0]);
    frame.render_widget(canvas_block, chunks[0]);

    let canvas = &config.canvas;
    let mut surface = BrailleSurface::new(
        canvas_area.width as usize,
        canvas_area.height as usize,
        canvas.width,
        canvas.height,
    );
    session.draw(&mut surface);
    frame.render_widget(&surface, canvas_area);
    let bounds = surface
        .viewport()
        .host_bounds(canvas_area, canvas.width, canvas.height);

    let toggle_row = render_panel(frame, chunks[1], session);

    ScreenLayout { bounds, toggle_row }
}

/// Draw the value panel and return the clickable toggle row.
fn render_panel(frame: &mut Frame, area: Rect, session: &Session) -> Option<Rect> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" values ");
    let inner = block.inner(area);

    let rows = panel::rows(&session.panel, session.functions);
    let mut toggle_index = None;
    let mut lines: Vec<Line> = Vec::with_capacity(rows.len() + 4);
    for row in &rows {
        if row.label == Label::Mode {
            toggle_index = Some(lines.len());
            lines.push(toggle_line(session));
        } else {
            lines.push(value_line(row, session));
        }
    }

    let hint = Style::default().fg(Color::DarkGray);
    lines.push(Line::default());
    lines.push(Line::styled(" drag  move the point", hint));
    lines.push(Line::styled(" u     switch unit", hint));
    lines.push(Line::styled(" q     quit", hint));

    frame.render_widget(Paragraph::new(lines).block(block), area);

    toggle_index
        .filter(|&i| (i as u16) < inner.height)
        .map(|i| Rect::new(inner.x, inner.y + i as u16, inner.width, 1))
}

fn value_line<'a>(row: &PanelRow, session: &Session) -> Line<'a> {
    let theme = &session.theme;
    let value_style = match (row.label, row.emphasis) {
        (Label::Value(function), _) => Style::default().fg(theme.function(function).into()),
        (_, Emphasis::Active) => Style::default()
            .fg(theme.ink.into())
            .add_modifier(Modifier::BOLD),
        (_, Emphasis::Muted) => Style::default().fg(theme.muted.into()),
        (_, Emphasis::Normal) => Style::default().fg(theme.ink.into()),
    };
    Line::from(vec![
        Span::styled(format!(" {:<8}", row.caption), Style::default().fg(Color::DarkGray)),
        Span::styled(row.text.clone(), value_style),
    ])
}

/// "[DEG] RAD" style switch with the active side highlighted.
fn toggle_line<'a>(session: &Session) -> Line<'a> {
    let active = session.controller.state().unit();
    let theme = &session.theme;
    let mut spans = vec![Span::styled(
        format!(" {:<8}", "unit"),
        Style::default().fg(Color::DarkGray),
    )];
    for unit in [crate::geometry::AngleUnit::Degrees, crate::geometry::AngleUnit::Radians] {
        let style = if unit == active {
            Style::default()
                .fg(theme.ink.into())
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.muted.into())
        };
        spans.push(Span::styled(format!(" {} ", unit.label()), style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    #[test]
    fn restore_leaves_alternate_screen_when_raw_mode_fails() {
        let mut out = Vec::new();
        let err = restore_terminal(&mut out, || Err(io::Error::other("raw mode"))).unwrap_err();
        assert_eq!(err.to_string(), "raw mode");

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"), "{:?}", written);
        assert!(written.contains("\x1b[?25h"), "{:?}", written);
    }

    #[test]
    fn restore_reports_success_when_every_step_succeeds() {
        let mut out = Vec::new();
        assert!(restore_terminal(&mut out, || Ok(())).is_ok());
        assert!(!out.is_empty());
    }

    fn draw(session: &Session, config: &Config) -> (Terminal<TestBackend>, ScreenLayout) {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut layout = ScreenLayout::default();
        terminal
            .draw(|frame| layout = draw_frame(frame, session, config))
            .unwrap();
        (terminal, layout)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn frame_shows_panel_values() {
        let config = Config::default();
        let session = Session::new(&config);
        let (terminal, layout) = draw(&session, &config);
        let text = buffer_text(&terminal);
        assert!(text.contains("0.0°"));
        assert!(text.contains("(1.00, 0.00)"));
        assert!(text.contains(" DEG "));
        assert!(layout.toggle_row.is_some());
        assert!(layout.bounds.width > 0.0);
    }

    #[test]
    fn clicking_above_center_points_up() {
        let config = Config::default();
        let mut session = Session::new(&config);
        let (_, layout) = draw(&session, &config);

        // Canvas block spans columns 0..52 and rows 0..24; its inner area is 50x22 at (1, 1)
        let b = layout.bounds;
        let center_col = ((b.left + b.width / 2.0) / 2.0) as u16;
        let top_row = ((b.top + 2.0) / 4.0) as u16;
        handle_mouse(&mut session, &layout, mouse(MouseEventKind::Down(MouseButton::Left), center_col, top_row));
        let deg = session.controller.state().angle().to_degrees();
        assert!((deg - 90.0).abs() < 3.0, "{}", deg);

        handle_mouse(&mut session, &layout, mouse(MouseEventKind::Up(MouseButton::Left), 0, 0));
        assert_eq!(session.controller.state().drag(), DragState::Idle);
    }

    #[test]
    fn clicking_the_toggle_switches_unit() {
        let config = Config::default();
        let mut session = Session::new(&config);
        let (_, layout) = draw(&session, &config);
        let row = layout.toggle_row.unwrap();
        handle_mouse(&mut session, &layout, mouse(MouseEventKind::Down(MouseButton::Left), row.x + 2, row.y));
        assert_eq!(session.panel.text(Label::Mode), Some("RAD"));
        assert_eq!(session.controller.state().drag(), DragState::Idle);
    }

    #[test]
    fn moves_without_press_do_nothing() {
        let config = Config::default();
        let mut session = Session::new(&config);
        let (_, layout) = draw(&session, &config);
        handle_mouse(&mut session, &layout, mouse(MouseEventKind::Moved, 5, 5));
        assert_eq!(session.controller.state().angle(), 0.0);
    }
}
