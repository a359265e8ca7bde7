#![forbid(unsafe_code)]

//! Absolute placement of a line plan.
//!
//! [`GridLayout`] is a logical plan. Callers that want coordinates can ask
//! for a [`Placement`], which stacks cells along the base axis and lines
//! along the cross axis with zero spacing, and turns the trailing-fill flags
//! into filler rectangles.

use crate::{Axis, GridLayout, Point, Rect, Size};

/// A cell's rectangle, tagged with its position in the plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCell {
    /// Index of the item in the original sequence.
    pub index: usize,
    /// Line the item landed in.
    pub line: usize,
    /// Absolute rectangle.
    pub rect: Rect,
}

/// Absolute rectangles for every cell and filler of a plan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Placement {
    /// Cells in original item order.
    pub cells: Vec<PlacedCell>,
    /// `(line, rect)` for each short line's trailing filler.
    pub line_fillers: Vec<(usize, Rect)>,
    /// Filler after the last line, when the grid needs one.
    pub grid_filler: Option<Rect>,
    /// Smallest rectangle covering all cells and fillers.
    pub bounds: Rect,
}

impl Placement {
    /// Every rectangle: cells, then line fillers, then the grid filler.
    pub fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.cells
            .iter()
            .map(|cell| cell.rect)
            .chain(self.line_fillers.iter().map(|(_, rect)| *rect))
            .chain(self.grid_filler)
    }

    /// The cell containing `point`, if any.
    pub fn hit_test(&self, point: Point) -> Option<&PlacedCell> {
        self.cells.iter().find(|cell| cell.rect.contains(point))
    }
}

impl<T> GridLayout<T> {
    /// Convert the plan into absolute rectangles starting at `origin`.
    pub fn place(&self, origin: Point) -> Placement {
        let metrics = self.metrics();
        let axis = metrics.axis;
        if self.is_empty() {
            return Placement {
                bounds: Rect::from_origin_size(origin, Size::ZERO),
                ..Placement::default()
            };
        }

        let cell_base = axis.base(metrics.cell_size);
        let cell_cross = axis.cross(metrics.cell_size);
        let container_base = axis.base(metrics.container);
        let container_cross = axis.cross(metrics.container);
        // Full lines may overshoot the container when cells sit at minimum size.
        let line_extent = container_base.max(cell_base * metrics.items_per_line as f64);

        let mut cells = Vec::with_capacity(metrics.item_count);
        let mut line_fillers = Vec::new();
        let mut index = 0;

        for (line_index, line) in self.lines().iter().enumerate() {
            let cross = cell_cross * line_index as f64;
            for slot in 0..line.len() {
                cells.push(PlacedCell {
                    index,
                    line: line_index,
                    rect: rect_at(axis, origin, cell_base * slot as f64, cross, cell_base, cell_cross),
                });
                index += 1;
            }
            if line.needs_trailing_fill() {
                let start = cell_base * line.len() as f64;
                line_fillers.push((
                    line_index,
                    rect_at(axis, origin, start, cross, line_extent - start, cell_cross),
                ));
            }
        }

        let lines_extent = cell_cross * self.line_count() as f64;
        let grid_filler = self.needs_trailing_fill().then(|| {
            rect_at(
                axis,
                origin,
                0.0,
                lines_extent,
                line_extent,
                container_cross - lines_extent,
            )
        });
        let covered_cross = if grid_filler.is_some() {
            container_cross
        } else {
            lines_extent
        };

        Placement {
            cells,
            line_fillers,
            grid_filler,
            bounds: rect_at(axis, origin, 0.0, 0.0, line_extent, covered_cross),
        }
    }
}

/// Build a rectangle from base/cross offsets and extents.
fn rect_at(axis: Axis, origin: Point, base: f64, cross: f64, base_len: f64, cross_len: f64) -> Rect {
    Rect::from_origin_size(origin.offset(axis.map(base, cross)), axis.map(base_len, cross_len))
}
