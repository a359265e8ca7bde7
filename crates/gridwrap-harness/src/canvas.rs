#![forbid(unsafe_code)]

//! Character rasterization of placements.
//!
//! One canvas character covers `scale` layout units on each axis. Rectangle
//! edges are rounded to the nearest character boundary, so adjacent cells
//! share an edge rather than overlap.

use gridwrap_layout::{Placement, Rect};

/// Character used for line and grid fillers.
pub const FILLER: char = '.';

/// Character for uncovered canvas positions.
pub const BLANK: char = ' ';

/// A fixed-size grid of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    chars: Vec<char>,
}

impl Canvas {
    /// Create a blank canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            chars: vec![BLANK; width * height],
        }
    }

    /// Width in characters.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in characters.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Character at `(x, y)`, if in bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.chars[y * self.width + x])
    }

    /// Fill the character span `[x0, x1) x [y0, y1)`, clipped to the canvas.
    pub fn fill(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                self.chars[y * self.width + x] = ch;
            }
        }
    }

    /// Rows joined with `\n`.
    pub fn to_text(&self) -> String {
        self.chars
            .chunks(self.width.max(1))
            .take(self.height)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Convert a unit coordinate to a character boundary.
fn to_char(value: f64, scale: f64) -> usize {
    let scaled = (value / scale).round();
    if scaled > 0.0 { scaled as usize } else { 0 }
}

fn char_span(rect: &Rect, scale: f64) -> (usize, usize, usize, usize) {
    (
        to_char(rect.x, scale),
        to_char(rect.y, scale),
        to_char(rect.right(), scale),
        to_char(rect.bottom(), scale),
    )
}

/// Rasterize a placement.
///
/// Cell `i` is drawn with `labels[i % labels.len()]` (`#` when `labels` is
/// empty); fillers are drawn with [`FILLER`]. The canvas spans from the
/// coordinate origin to the placement's bottom-right corner. A `scale` that
/// is not strictly positive counts as `1`.
pub fn placement_to_canvas(placement: &Placement, labels: &[char], scale: f64) -> Canvas {
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let (_, _, width, height) = char_span(&placement.bounds, scale);
    let mut canvas = Canvas::new(width, height);

    let fillers = placement
        .line_fillers
        .iter()
        .map(|(_, rect)| rect)
        .chain(placement.grid_filler.iter());
    for rect in fillers {
        let (x0, y0, x1, y1) = char_span(rect, scale);
        canvas.fill(x0, y0, x1, y1, FILLER);
    }

    for cell in &placement.cells {
        let label = if labels.is_empty() {
            '#'
        } else {
            labels[cell.index % labels.len()]
        };
        let (x0, y0, x1, y1) = char_span(&cell.rect, scale);
        canvas.fill(x0, y0, x1, y1, label);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwrap_layout::{Grid, Point, Size};

    #[test]
    fn canvas_fill_clips() {
        let mut canvas = Canvas::new(3, 2);
        canvas.fill(1, 0, 10, 10, 'x');
        assert_eq!(canvas.to_text(), " xx\n xx");
        assert_eq!(canvas.get(0, 0), Some(' '));
        assert_eq!(canvas.get(3, 0), None);
    }

    #[test]
    fn row_major_placement_rasterizes() {
        let plan = Grid::row_major(Size::new(2.0, 1.0)).layout(Size::new(6.0, 4.0), 0..5);
        let canvas = placement_to_canvas(&plan.place(Point::ORIGIN), &['a', 'b', 'c', 'd', 'e'], 1.0);
        assert_eq!(canvas.to_text(), "aabbcc\nddee..\n......\n......");
    }

    #[test]
    fn column_major_placement_rasterizes() {
        let plan = Grid::column_major(Size::new(1.0, 1.0)).layout(Size::new(3.0, 2.0), 0..3);
        let canvas = placement_to_canvas(&plan.place(Point::ORIGIN), &['x', 'y', 'z'], 1.0);
        assert_eq!(canvas.to_text(), "xz.\ny..");
    }

    #[test]
    fn scale_shrinks_canvas() {
        let plan = Grid::row_major(Size::new(100.0, 100.0)).layout(Size::new(300.0, 100.0), 0..3);
        let canvas = placement_to_canvas(&plan.place(Point::ORIGIN), &[], 50.0);
        assert_eq!(canvas.width(), 6);
        assert_eq!(canvas.height(), 2);
        assert_eq!(canvas.to_text(), "######\n######");
    }

    #[test]
    fn empty_placement_gives_empty_canvas() {
        let plan = Grid::row_major(Size::UNIT).layout(Size::new(5.0, 5.0), Vec::<u8>::new());
        let canvas = placement_to_canvas(&plan.place(Point::ORIGIN), &['a'], 1.0);
        assert_eq!(canvas.to_text(), "");
    }
}
