/// Cell rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use mvpviz_core::{clip_segment, ClipRect, Color, DrawSurface, Point2};
use std::io::Write;

/// Glyph for a plotted pixel, by color
fn glyph(color: Color) -> char {
    match color {
        Color::VeryDarkGrey => '.',
        Color::DarkYellow => '+',
        Color::Yellow => 'o',
        Color::Blue => '%',
        Color::Black => ' ',
        _ => '#',
    }
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Black => TermColor::Black,
        Color::White => TermColor::White,
        Color::Grey => TermColor::Grey,
        Color::VeryDarkGrey => TermColor::DarkGrey,
        Color::Red => TermColor::Red,
        Color::Blue => TermColor::Blue,
        Color::Yellow => TermColor::Yellow,
        Color::DarkYellow => TermColor::DarkYellow,
    }
}

/// Drawing surface over a logical pixel grid, downsampled to terminal cells.
///
/// Every logical pixel maps to the cell covering it; the last draw into a
/// cell wins.
pub struct TerminalCanvas {
    logical_width: u32,
    logical_height: u32,
    columns: usize,
    rows: usize,
    cells: Vec<Option<(char, Color)>>,
}

impl TerminalCanvas {
    pub fn new(logical_width: u32, logical_height: u32, columns: usize, rows: usize) -> Self {
        Self {
            logical_width: logical_width.max(1),
            logical_height: logical_height.max(1),
            columns,
            rows,
            cells: vec![None; columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Change the cell grid; the logical size stays the same.
    pub fn resize(&mut self, columns: usize, rows: usize) {
        self.columns = columns;
        self.rows = rows;
        self.cells = vec![None; columns * rows];
    }

    /// Glyph and color in a cell, if anything was drawn there
    pub fn cell(&self, column: usize, row: usize) -> Option<(char, Color)> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells[row * self.columns + column]
    }

    /// Text of one cell row, blanks for empty cells
    pub fn row_text(&self, row: usize) -> String {
        (0..self.columns)
            .map(|column| self.cell(column, row).map_or(' ', |(c, _)| c))
            .collect()
    }

    fn bounds(&self) -> ClipRect {
        ClipRect::new(
            0.0,
            0.0,
            self.logical_width as f32 - 1.0,
            self.logical_height as f32 - 1.0,
        )
    }

    fn cell_of(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x >= self.logical_width as i64 || y >= self.logical_height as i64 {
            return None;
        }
        let column = x as usize * self.columns / self.logical_width as usize;
        let row = y as usize * self.rows / self.logical_height as usize;
        Some((column, row))
    }

    fn put_cell(&mut self, column: usize, row: usize, c: char, color: Color) {
        if column < self.columns && row < self.rows {
            self.cells[row * self.columns + column] = Some((c, color));
        }
    }

    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if let Some((column, row)) = self.cell_of(x, y) {
            self.put_cell(column, row, glyph(color), color);
        }
    }

    /// Bresenham between two in-bounds pixels
    fn bresenham(&mut self, from: (i64, i64), to: (i64, i64), color: Color) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, color);
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
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for column in 0..self.columns {
                match self.cells[row * self.columns + column] {
                    Some((c, color)) => {
                        if current != Some(color) {
                            writer.queue(SetForegroundColor(term_color(color)))?;
                            current = Some(color);
                        }
                        writer.queue(Print(c))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for TerminalCanvas {
    fn clear(&mut self, _color: Color) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    fn draw_line(&mut self, from: Point2, to: Point2, color: Color) {
        // keeps the walk bounded for far off-canvas endpoints
        if let Some(segment) = clip_segment(from, to, &self.bounds()) {
            let a = segment.start.round();
            let b = segment.end.round();
            self.bresenham((a.x as i64, a.y as i64), (b.x as i64, b.y as i64), color);
        }
    }

    fn draw_rect(&mut self, origin: Point2, size: Point2, color: Color) {
        let (x0, y0) = (origin.x, origin.y);
        let (x1, y1) = (origin.x + size.x, origin.y + size.y);
        self.draw_line(Point2::new(x0, y0), Point2::new(x1, y0), color);
        self.draw_line(Point2::new(x1, y0), Point2::new(x1, y1), color);
        self.draw_line(Point2::new(x1, y1), Point2::new(x0, y1), color);
        self.draw_line(Point2::new(x0, y1), Point2::new(x0, y0), color);
    }

    fn draw_circle(&mut self, center: Point2, radius: f32, color: Color) {
        if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite()) {
            return;
        }
        let (cx, cy) = (center.x.round() as i64, center.y.round() as i64);
        let r = radius.round().max(0.0) as i64;

        // midpoint circle, one octant mirrored eight ways
        let (mut x, mut y) = (r, 0i64);
        let mut err = 1 - r;
        while x >= y {
            for (px, py) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                self.plot(cx + px, cy + py, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    fn draw_text(&mut self, origin: Point2, text: &str, color: Color) {
        if !(origin.x.is_finite() && origin.y.is_finite()) {
            return;
        }
        let Some((column, first_row)) = self.cell_of(origin.x as i64, origin.y as i64) else {
            return;
        };
        for (offset, line) in text.lines().enumerate() {
            for (i, c) in line.chars().enumerate() {
                self.put_cell(column + i, first_row + offset, c, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> TerminalCanvas {
        // one cell per 4x4 logical pixels
        TerminalCanvas::new(40, 20, 10, 5)
    }

    #[test]
    fn test_line_downsampled_to_cells() {
        let mut canvas = canvas();
        canvas.draw_line(Point2::new(0.0, 9.0), Point2::new(39.0, 9.0), Color::White);
        assert_eq!(canvas.row_text(2), "##########");
        assert_eq!(canvas.row_text(1), "          ");
        assert_eq!(canvas.cell(3, 2), Some(('#', Color::White)));
    }

    #[test]
    fn test_far_off_canvas_line_is_bounded() {
        let mut canvas = canvas();
        canvas.draw_line(
            Point2::new(-1.0e9, 2.0),
            Point2::new(1.0e9, 2.0),
            Color::VeryDarkGrey,
        );
        assert_eq!(canvas.row_text(0), "..........");

        canvas.draw_line(Point2::new(-50.0, -50.0), Point2::new(-10.0, -1.0), Color::Red);
        canvas.draw_line(Point2::new(f32::NAN, 0.0), Point2::new(5.0, 5.0), Color::Red);
        assert!((0..5).all(|row| !canvas.row_text(row).contains('#')));
    }

    #[test]
    fn test_rect_outline() {
        let mut canvas = canvas();
        canvas.draw_rect(Point2::new(0.0, 0.0), Point2::new(39.0, 19.0), Color::White);
        assert_eq!(canvas.row_text(0), "##########");
        assert_eq!(canvas.row_text(2), "#        #");
        assert_eq!(canvas.row_text(4), "##########");
    }

    #[test]
    fn test_circle_and_clear() {
        let mut canvas = canvas();
        canvas.draw_circle(Point2::new(20.0, 10.0), 6.0, Color::Yellow);
        assert_eq!(canvas.cell(6, 2), Some(('o', Color::Yellow)));
        assert_eq!(canvas.cell(3, 2), Some(('o', Color::Yellow)));
        assert_eq!(canvas.cell(5, 2), None);

        canvas.clear(Color::Black);
        assert!((0..5).all(|row| canvas.row_text(row).trim().is_empty()));
    }

    #[test]
    fn test_text_on_cell_rows() {
        let mut canvas = canvas();
        canvas.draw_text(Point2::new(8.0, 4.0), "ab\ncd", Color::Grey);
        assert_eq!(canvas.row_text(1), "  ab      ");
        assert_eq!(canvas.row_text(2), "  cd      ");

        // clipped at the right edge
        canvas.draw_text(Point2::new(36.0, 16.0), "xyz", Color::Grey);
        assert_eq!(canvas.row_text(4), "         x");
    }

    #[test]
    fn test_draw_writes_cells() {
        let mut canvas = canvas();
        canvas.draw_text(Point2::new(0.0, 0.0), "MVP", Color::White);
        let mut out = Vec::new();
        canvas.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("MVP"));
    }

    #[test]
    fn test_resize() {
        let mut canvas = canvas();
        canvas.resize(20, 10);
        assert_eq!((canvas.columns(), canvas.rows()), (20, 10));
        canvas.draw_line(Point2::new(0.0, 0.0), Point2::new(39.0, 0.0), Color::White);
        assert_eq!(canvas.row_text(0).trim_end().len(), 20);
    }
}
