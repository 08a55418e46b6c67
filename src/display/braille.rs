//! Braille sub-cell drawing surface.
//!
//! Each terminal character cell maps to a 2x4 grid of braille dots. The
//! logical canvas is scaled uniformly onto that grid and centered. A cell
//! takes the color of the last dot painted into it, so later layers win.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::color::RgbColor;
use crate::geometry::SurfaceBounds;
use crate::surface::{DrawSurface, Stroke, TextAlign, TextBaseline, TextStyle};

/// Braille dot positions within a 2x4 cell:
/// (0,0)=0x01 (1,0)=0x08
/// (0,1)=0x02 (1,1)=0x10
/// (0,2)=0x04 (1,2)=0x20
/// (0,3)=0x40 (1,3)=0x80
pub const DOT_MAP: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40],
    [0x08, 0x10, 0x20, 0x80],
];

const DOTS_PER_CELL_X: usize = 2;
const DOTS_PER_CELL_Y: usize = 4;

/// Uniform scale and centering offset from canvas pixels to dots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Viewport {
    pub fn fit(grid_w: usize, grid_h: usize, canvas_w: f64, canvas_h: f64) -> Self {
        let scale = (grid_w as f64 / canvas_w).min(grid_h as f64 / canvas_h);
        Self {
            scale,
            offset_x: (grid_w as f64 - canvas_w * scale) / 2.0,
            offset_y: (grid_h as f64 - canvas_h * scale) / 2.0,
        }
    }

    #[inline]
    pub fn to_dot(&self, x: f64, y: f64) -> (f64, f64) {
        (self.offset_x + x * self.scale, self.offset_y + y * self.scale)
    }

    /// Bounds of the canvas in absolute terminal dot coordinates when the
    /// grid is drawn into `area`.
    pub fn host_bounds(&self, area: Rect, canvas_w: f64, canvas_h: f64) -> SurfaceBounds {
        SurfaceBounds::new(
            (area.x as usize * DOTS_PER_CELL_X) as f64 + self.offset_x,
            (area.y as usize * DOTS_PER_CELL_Y) as f64 + self.offset_y,
            canvas_w * self.scale,
            canvas_h * self.scale,
        )
    }
}

/// Center of a terminal cell in absolute dot coordinates.
pub fn cell_center(column: u16, row: u16) -> (f64, f64) {
    (
        (column as usize * DOTS_PER_CELL_X) as f64 + 1.0,
        (row as usize * DOTS_PER_CELL_Y) as f64 + 2.0,
    )
}

#[derive(Debug, Clone, PartialEq)]
struct TextCell {
    column: usize,
    row: usize,
    text: String,
    color: RgbColor,
}

/// Stroke style converted to dot units.
#[derive(Debug, Clone)]
struct DotStroke {
    color: RgbColor,
    dash: Vec<f64>,
    dash_total: f64,
}

pub struct BrailleSurface {
    grid: Vec<bool>,
    cell_colors: Vec<Option<RgbColor>>,
    labels: Vec<TextCell>,
    grid_w: usize,
    grid_h: usize,
    char_w: usize,
    char_h: usize,
    viewport: Viewport,
    stroke: DotStroke,
    fill: RgbColor,
    /// Subpaths in dot coordinates
    path: Vec<Vec<(f64, f64)>>,
}

impl BrailleSurface {
    /// Create a surface of `char_w` x `char_h` cells showing a canvas of the given pixel size.
    pub fn new(char_w: usize, char_h: usize, canvas_w: f64, canvas_h: f64) -> Self {
        let grid_w = char_w * DOTS_PER_CELL_X;
        let grid_h = char_h * DOTS_PER_CELL_Y;
        Self {
            grid: vec![false; grid_w * grid_h],
            cell_colors: vec![None; char_w * char_h],
            labels: Vec::new(),
            grid_w,
            grid_h,
            char_w,
            char_h,
            viewport: Viewport::fit(grid_w, grid_h, canvas_w, canvas_h),
            stroke: DotStroke {
                color: RgbColor::new(255, 255, 255),
                dash: Vec::new(),
                dash_total: 0.0,
            },
            fill: RgbColor::new(255, 255, 255),
            path: Vec::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Set a single dot (bounds-checked) and claim its cell's color.
    #[inline]
    fn plot(&mut self, gx: isize, gy: isize, color: RgbColor) {
        if gx < 0 || gy < 0 || gx >= self.grid_w as isize || gy >= self.grid_h as isize {
            return;
        }
        let (gx, gy) = (gx as usize, gy as usize);
        self.grid[gy * self.grid_w + gx] = true;
        self.cell_colors[(gy / DOTS_PER_CELL_Y) * self.char_w + gx / DOTS_PER_CELL_X] = Some(color);
    }

    pub fn is_set(&self, gx: usize, gy: usize) -> bool {
        gx < self.grid_w && gy < self.grid_h && self.grid[gy * self.grid_w + gx]
    }

    fn cell_bits(&self, cx: usize, cy: usize) -> u8 {
        let mut braille = 0u8;
        for (dx, col) in DOT_MAP.iter().enumerate() {
            for (dy, &bit) in col.iter().enumerate() {
                if self.is_set(cx * DOTS_PER_CELL_X + dx, cy * DOTS_PER_CELL_Y + dy) {
                    braille |= bit;
                }
            }
        }
        braille
    }

    fn cell_char(&self, cx: usize, cy: usize) -> Option<char> {
        match self.cell_bits(cx, cy) {
            0 => None,
            bits => char::from_u32(0x2800 + bits as u32),
        }
    }

    pub fn cell_color(&self, cx: usize, cy: usize) -> Option<RgbColor> {
        if cx < self.char_w && cy < self.char_h {
            self.cell_colors[cy * self.char_w + cx]
        } else {
            None
        }
    }

    /// Plain-text rendering, one string per cell row. Text labels overlay dots.
    pub fn to_lines(&self) -> Vec<String> {
        let mut rows: Vec<Vec<char>> = (0..self.char_h)
            .map(|cy| {
                (0..self.char_w)
                    .map(|cx| self.cell_char(cx, cy).unwrap_or(' '))
                    .collect()
            })
            .collect();
        for label in &self.labels {
            for (i, ch) in label.text.chars().enumerate() {
                if let Some(slot) = rows[label.row].get_mut(label.column + i) {
                    *slot = ch;
                }
            }
        }
        rows.into_iter().map(|r| r.into_iter().collect()).collect()
    }

    /// Draw a clipped line in dot space. `travelled` is the dash distance
    /// already covered on this path; the new total is returned.
    fn line(&mut self, from: (f64, f64), to: (f64, f64), travelled: f64) -> f64 {
        let length = ((to.0 - from.0).powi(2) + (to.1 - from.1).powi(2)).sqrt();
        let Some((t0, t1)) = clip(from, to, self.grid_w as f64, self.grid_h as f64) else {
            return travelled + length;
        };
        let at = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
        let start = at(t0);
        let end = at(t1);

        let stroke = self.stroke.clone();
        let mut distance = travelled + length * t0;
        bresenham(start, end, |gx, gy, step| {
            distance += step;
            if dash_visible(&stroke.dash, stroke.dash_total, distance) {
                self.plot(gx, gy, stroke.color);
            }
        });
        travelled + length
    }

    fn current_point(&self) -> Option<(f64, f64)> {
        self.path.last().and_then(|p| p.last()).copied()
    }
}

impl DrawSurface for BrailleSurface {
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x0, y0) = self.viewport.to_dot(x, y);
        let (x1, y1) = self.viewport.to_dot(x + width, y + height);
        let covers_all = x0 <= 0.0 && y0 <= 0.0 && x1 >= self.grid_w as f64 && y1 >= self.grid_h as f64;
        if covers_all {
            self.grid.fill(false);
            self.cell_colors.fill(None);
            self.labels.clear();
            return;
        }

        let gx0 = x0.floor().max(0.0) as usize;
        let gy0 = y0.floor().max(0.0) as usize;
        let gx1 = (x1.ceil().max(0.0) as usize).min(self.grid_w);
        let gy1 = (y1.ceil().max(0.0) as usize).min(self.grid_h);
        for gy in gy0..gy1 {
            self.grid[gy * self.grid_w + gx0.min(gx1)..gy * self.grid_w + gx1].fill(false);
        }
        for cy in 0..self.char_h {
            for cx in 0..self.char_w {
                if self.cell_bits(cx, cy) == 0 {
                    self.cell_colors[cy * self.char_w + cx] = None;
                }
            }
        }
        self.labels.retain(|l| {
            let gx = l.column * DOTS_PER_CELL_X;
            let gy = l.row * DOTS_PER_CELL_Y;
            !(gx >= gx0 && gx < gx1 && gy >= gy0 && gy < gy1)
        });
    }

    fn set_stroke(&mut self, stroke: &Stroke) {
        let mut dash: Vec<f64> = stroke.dash.iter().map(|d| d * self.viewport.scale).collect();
        if dash.len() % 2 == 1 {
            dash.extend_from_within(..);
        }
        let dash_total = dash.iter().sum();
        // Braille dots are one dot wide whatever the stroke width
        self.stroke = DotStroke {
            color: stroke.color,
            dash,
            dash_total,
        };
    }

    fn set_fill(&mut self, color: RgbColor) {
        self.fill = color;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.viewport.to_dot(x, y);
        self.path.push(vec![p]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.viewport.to_dot(x, y);
        match self.path.last_mut() {
            Some(sub) => sub.push(p),
            None => self.path.push(vec![p]),
        }
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        let sweep = end - start;
        let dot_radius = radius * self.viewport.scale;
        let steps = ((dot_radius * sweep.abs()).ceil() as usize).clamp(12, 720);
        for i in 0..=steps {
            let a = start + sweep * i as f64 / steps as f64;
            let (x, y) = (cx + radius * a.cos(), cy + radius * a.sin());
            if i == 0 && self.current_point().is_none() {
                self.move_to(x, y);
            } else {
                self.line_to(x, y);
            }
        }
    }

    fn stroke(&mut self) {
        let path = std::mem::take(&mut self.path);
        for sub in &path {
            if let [only] = sub.as_slice() {
                self.plot(only.0.floor() as isize, only.1.floor() as isize, self.stroke.color);
                continue;
            }
            let mut travelled = 0.0;
            for pair in sub.windows(2) {
                travelled = self.line(pair[0], pair[1], travelled);
            }
        }
        self.path = path;
    }

    fn fill(&mut self) {
        let polygons = self.path.clone();
        let points = polygons.iter().flatten();
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        if min_x > max_x {
            return;
        }

        let gx0 = min_x.floor().max(0.0) as isize;
        let gy0 = min_y.floor().max(0.0) as isize;
        let gx1 = max_x.ceil().min(self.grid_w as f64) as isize;
        let gy1 = max_y.ceil().min(self.grid_h as f64) as isize;
        let color = self.fill;
        let mut filled = false;
        for gy in gy0..gy1 {
            for gx in gx0..gx1 {
                let center = (gx as f64 + 0.5, gy as f64 + 0.5);
                if inside(&polygons, center) {
                    self.plot(gx, gy, color);
                    filled = true;
                }
            }
        }

        // Shapes smaller than a dot still leave a mark
        if !filled {
            let cx = (min_x + max_x) / 2.0;
            let cy = (min_y + max_y) / 2.0;
            self.plot(cx.floor() as isize, cy.floor() as isize, color);
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        if self.char_w == 0 || self.char_h == 0 {
            return;
        }
        let (dx, dy) = self.viewport.to_dot(x, y);
        let len = text.chars().count() as f64;
        let col = dx / DOTS_PER_CELL_X as f64;
        let col = match style.align {
            TextAlign::Left => col,
            TextAlign::Center => col - len / 2.0,
            TextAlign::Right => col - len,
        };
        let cell_y = DOTS_PER_CELL_Y as f64;
        let row = match style.baseline {
            TextBaseline::Top => (dy / cell_y).floor(),
            TextBaseline::Middle => ((dy - cell_y / 2.0) / cell_y).round(),
            TextBaseline::Bottom => (dy / cell_y).ceil() - 1.0,
        };

        let max_col = self.char_w.saturating_sub(text.chars().count());
        let column = (col.round().max(0.0) as usize).min(max_col);
        let row = (row.max(0.0) as usize).min(self.char_h - 1);
        self.labels.push(TextCell {
            column,
            row,
            text: text.to_string(),
            color: style.color,
        });
    }
}

impl Widget for &BrailleSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.char_h.min(area.height as usize);
        let cols = self.char_w.min(area.width as usize);
        for cy in 0..rows {
            for cx in 0..cols {
                let (Some(ch), Some(color)) = (self.cell_char(cx, cy), self.cell_color(cx, cy)) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + cx as u16, area.y + cy as u16)) {
                    cell.set_char(ch);
                    cell.set_fg(color.into());
                }
            }
        }

        for label in self.labels.iter().filter(|l| l.row < rows) {
            for (i, ch) in label.text.chars().enumerate() {
                let cx = label.column + i;
                if cx >= cols {
                    break;
                }
                if let Some(cell) = buf.cell_mut((area.x + cx as u16, area.y + label.row as u16)) {
                    cell.set_char(ch);
                    cell.set_fg(label.color.into());
                }
            }
        }
    }
}

fn dash_visible(pattern: &[f64], total: f64, distance: f64) -> bool {
    if pattern.is_empty() || total <= 0.0 {
        return true;
    }
    let mut d = distance.rem_euclid(total);
    for (i, len) in pattern.iter().enumerate() {
        if d < *len {
            return i % 2 == 0;
        }
        d -= len;
    }
    true
}

/// Liang-Barsky clip of the segment against [0, w) x [0, h).
/// Returns the visible parameter range.
fn clip(from: (f64, f64), to: (f64, f64), w: f64, h: f64) -> Option<(f64, f64)> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    let checks = [
        (-dx, from.0),
        (dx, w - 1e-9 - from.0),
        (-dy, from.1),
        (dy, h - 1e-9 - from.1),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    (t0 <= t1).then_some((t0, t1))
}

/// Bresenham's line over dot cells. `visit` gets each cell and the distance
/// stepped to reach it.
fn bresenham(from: (f64, f64), to: (f64, f64), mut visit: impl FnMut(isize, isize, f64)) {
    let mut x0 = from.0.floor() as isize;
    let mut y0 = from.1.floor() as isize;
    let x1 = to.0.floor() as isize;
    let y1 = to.1.floor() as isize;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx: isize = if x0 < x1 { 1 } else { -1 };
    let sy: isize = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut step = 0.0;

    loop {
        visit(x0, y0, step);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        let mut moved_x = false;
        let mut moved_y = false;
        if e2 >= dy {
            err += dy;
            x0 += sx;
            moved_x = true;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
            moved_y = true;
        }
        step = if moved_x && moved_y { std::f64::consts::SQRT_2 } else { 1.0 };
    }
}

/// Even-odd point-in-polygon over all subpaths.
fn inside(polygons: &[Vec<(f64, f64)>], p: (f64, f64)) -> bool {
    let mut hit = false;
    for poly in polygons.iter().filter(|poly| poly.len() >= 3) {
        let mut j = poly.len() - 1;
        for i in 0..poly.len() {
            let (xi, yi) = poly[i];
            let (xj, yj) = poly[j];
            if (yi > p.1) != (yj > p.1) && p.0 < (xj - xi) * (p.1 - yi) / (yj - yi) + xi {
                hit = !hit;
            }
            j = i;
        }
    }
    hit
}
