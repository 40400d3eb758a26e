/// Character-cell drawing surface for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::collections::HashMap;
use std::io::Write;
use wire3d_core::{DrawSurface, Rgba, ScreenPoint};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Rgba,
}

/// A grid of terminal cells standing in for a square canvas.
///
/// The square logical surface is fitted into the largest centered viewport
/// that keeps it square on screen.
pub struct CellSurface {
    width: usize,
    height: usize,
    logical_size: f64,
    origin: (usize, usize),
    view: (usize, usize),
    cells: Vec<Option<Cell>>,
    background: Rgba,
    foreground: Rgba,
    palette: HashMap<String, Rgba>,
}

impl CellSurface {
    pub fn new(width: usize, height: usize, logical_size: f64) -> Self {
        let view_cols = width.min(height * CELL_ASPECT);
        let view_rows = view_cols / CELL_ASPECT;
        Self {
            width,
            height,
            logical_size,
            origin: ((width - view_cols) / 2, (height - view_rows) / 2),
            view: (view_cols, view_rows),
            cells: vec![None; width * height],
            background: Rgba::WHITE,
            foreground: Rgba::BLACK,
            palette: HashMap::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Glyph at a cell, blank when nothing was drawn there.
    pub fn glyph_at(&self, col: usize, row: usize) -> char {
        self.cell(col, row).map_or(' ', |c| c.glyph)
    }

    pub fn color_at(&self, col: usize, row: usize) -> Option<Rgba> {
        self.cell(col, row).map(|c| c.color)
    }

    fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col]
        } else {
            None
        }
    }

    /// Map a logical surface point to fractional cell-center coordinates.
    fn to_cell_space(&self, p: ScreenPoint) -> (f64, f64) {
        let col = self.origin.0 as f64 + p.x * self.view.0 as f64 / self.logical_size - 0.5;
        let row = self.origin.1 as f64 + p.y * self.view.1 as f64 / self.logical_size - 0.5;
        (col, row)
    }

    fn resolve_color(&mut self, label: &str) -> Rgba {
        if let Some(color) = self.palette.get(label) {
            return *color;
        }
        let color = Rgba::parse(label).unwrap_or_else(|err| {
            tracing::warn!(%err, "unknown line color, using default");
            self.foreground
        });
        self.palette.insert(label.to_string(), color);
        color
    }

    fn plot(&mut self, col: i64, row: i64, cell: Cell) {
        if col >= 0 && row >= 0 && (col as usize) < self.width && (row as usize) < self.height {
            let idx = row as usize * self.width + col as usize;
            self.cells[idx] = Some(cell);
        }
    }

    /// The grid as plain text, one line per row with trailing blanks removed.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            let line: String = (0..self.width).map(|col| self.glyph_at(col, row)).collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(term_color(self.background)))?;
        let mut current = None;
        for row in 0..self.height {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.width {
                let (glyph, color) = match self.cell(col, row) {
                    Some(cell) => (cell.glyph, cell.color),
                    None => (' ', self.foreground),
                };
                if current != Some(color) {
                    writer.queue(SetForegroundColor(term_color(color)))?;
                    current = Some(color);
                }
                writer.queue(Print(glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for CellSurface {
    fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: &str) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let color = self.resolve_color(color);
        let glyph = slope_glyph(to.x - from.x, to.y - from.y);

        let a = self.to_cell_space(from);
        let b = self.to_cell_space(to);
        let max = ((self.width - 1) as f64, (self.height - 1) as f64);
        let Some((a, b)) = clip_segment(a, b, max) else {
            return;
        };

        let cell = Cell { glyph, color };
        for (col, row) in bresenham(
            (a.0.round() as i64, a.1.round() as i64),
            (b.0.round() as i64, b.1.round() as i64),
        ) {
            self.plot(col, row, cell);
        }
    }
}

fn term_color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Pick a glyph for a segment from its direction on the square surface.
fn slope_glyph(dx: f64, dy: f64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay <= ax * 0.4 {
        '-'
    } else if ax <= ay * 0.4 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        // Screen y grows downward
        '\\'
    } else {
        '/'
    }
}

/// Liang–Barsky clip of a segment to `[0, max.0] x [0, max.1]`.
fn clip_segment(
    p0: (f64, f64),
    p1: (f64, f64),
    max: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    if !(p0.0.is_finite() && p0.1.is_finite() && p1.0.is_finite() && p1.1.is_finite()) {
        return None;
    }

    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, p0.0),
        (dx, max.0 - p0.0),
        (-dy, p0.1),
        (dy, max.1 - p0.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (p0.0 + t0 * dx, p0.1 + t0 * dy),
        (p0.0 + t1 * dx, p0.1 + t1 * dy),
    ))
}

/// Integer cells along a segment, both ends included.
fn bresenham(from: (i64, i64), to: (i64, i64)) -> Vec<(i64, i64)> {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut points = Vec::with_capacity((dx - dy) as usize + 1);
    loop {
        points.push((x, y));
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> CellSurface {
        CellSurface::new(80, 40, 600.0)
    }

    #[test]
    fn test_viewport_is_square_and_centered() {
        let wide = CellSurface::new(100, 30, 600.0);
        assert_eq!(wide.view, (60, 30));
        assert_eq!(wide.origin, (20, 0));

        let tall = CellSurface::new(80, 60, 600.0);
        assert_eq!(tall.view, (80, 40));
        assert_eq!(tall.origin, (0, 10));
    }

    #[test]
    fn test_horizontal_line_spans_grid() {
        let mut s = surface();
        s.draw_line(ScreenPoint::new(0.0, 300.0), ScreenPoint::new(600.0, 300.0), "red");
        for col in 0..80 {
            assert_eq!(s.glyph_at(col, 20), '-');
            assert_eq!(s.color_at(col, 20), Some(Rgba::rgb(255, 0, 0)));
        }
        assert_eq!(s.glyph_at(0, 19), ' ');
    }

    #[test]
    fn test_vertical_and_diagonal_glyphs() {
        let mut s = surface();
        s.draw_line(ScreenPoint::new(300.0, 0.0), ScreenPoint::new(300.0, 600.0), "black");
        assert!((0..40).all(|row| s.glyph_at(40, row) == '|'));

        assert_eq!(slope_glyph(10.0, 10.0), '\\');
        assert_eq!(slope_glyph(-10.0, -10.0), '\\');
        assert_eq!(slope_glyph(10.0, -10.0), '/');
        assert_eq!(slope_glyph(10.0, 1.0), '-');
        assert_eq!(slope_glyph(0.5, -10.0), '|');
    }

    #[test]
    fn test_offscreen_line_is_clipped_away() {
        let mut s = surface();
        s.draw_line(ScreenPoint::new(-500.0, -50.0), ScreenPoint::new(1e9, -40.0), "black");
        assert!(s.to_text().trim().is_empty());
    }

    #[test]
    fn test_far_endpoint_is_clipped_not_walked() {
        let mut s = surface();
        s.draw_line(ScreenPoint::new(300.0, 300.0), ScreenPoint::new(1e12, 300.0), "black");
        assert_eq!(s.glyph_at(79, 20), '-');
        assert_eq!(s.glyph_at(39, 20), ' ');
    }

    #[test]
    fn test_clear_erases_cells() {
        let mut s = surface();
        s.draw_line(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(600.0, 600.0), "black");
        assert!(!s.to_text().trim().is_empty());
        s.clear();
        assert!(s.to_text().trim().is_empty());
        assert_eq!(s.to_text().lines().count(), 40);
    }

    #[test]
    fn test_unknown_color_falls_back() {
        let mut s = surface();
        s.draw_line(ScreenPoint::new(0.0, 300.0), ScreenPoint::new(600.0, 300.0), "chartreuse-ish");
        assert_eq!(s.color_at(10, 20), Some(Rgba::BLACK));
    }

    #[test]
    fn test_clip_segment() {
        let (a, b) = clip_segment((-10.0, 5.0), (20.0, 5.0), (9.0, 9.0)).unwrap();
        assert!(a.0.abs() < 1e-9 && (a.1 - 5.0).abs() < 1e-9);
        assert!((b.0 - 9.0).abs() < 1e-9 && (b.1 - 5.0).abs() < 1e-9);
        assert!(clip_segment((-10.0, -1.0), (20.0, -1.0), (9.0, 9.0)).is_none());
        assert!(clip_segment((f64::NAN, 0.0), (1.0, 1.0), (9.0, 9.0)).is_none());
    }

    #[test]
    fn test_bresenham_endpoints() {
        let pts = bresenham((0, 0), (3, 1));
        assert_eq!(pts.first(), Some(&(0, 0)));
        assert_eq!(pts.last(), Some(&(3, 1)));
        assert_eq!(pts.len(), 4);
        assert_eq!(bresenham((2, 2), (2, 2)), vec![(2, 2)]);
    }

    #[test]
    fn test_draw_emits_output() {
        let mut s = CellSurface::new(4, 2, 600.0);
        s.draw_line(ScreenPoint::new(0.0, 150.0), ScreenPoint::new(600.0, 150.0), "black");
        let mut out = Vec::new();
        s.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("----"));
    }
}
