#![forbid(unsafe_code)]

//! Wrapping grid solver.
//!
//! The solver works in base/cross terms and only converts to width/height
//! through [`Axis::map`]:
//!
//! ```text
//! max_per_line   = max(1, floor(base_extent / min_base))
//! target_lines   = max(1, floor(cross_extent / min_cross))
//! items_per_line = min(max_per_line, item_count)
//! line_count     = ceil(item_count / items_per_line)      (0 when empty)
//! cell_base      = max(min_base, base_extent / items_per_line)
//! cell_cross     = min_cross
//! ```
//!
//! A line shorter than `items_per_line` needs a trailing filler along the
//! base axis. A grid with fewer lines than `target_lines` needs a trailing
//! filler along the cross axis.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Axis, Size};

/// Wrapping grid configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    min_cell_size: Size,
    axis: Axis,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Size::UNIT)
    }
}

impl Grid {
    /// Create a row-major grid with the given minimum cell size.
    pub const fn new(min_cell_size: Size) -> Self {
        Self {
            min_cell_size,
            axis: Axis::RowMajor,
        }
    }

    /// Create a row-major grid.
    pub const fn row_major(min_cell_size: Size) -> Self {
        Self::new(min_cell_size)
    }

    /// Create a column-major grid.
    pub const fn column_major(min_cell_size: Size) -> Self {
        Self::new(min_cell_size).axis(Axis::ColumnMajor)
    }

    /// Set the base axis.
    #[must_use]
    pub const fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Set the minimum cell size.
    #[must_use]
    pub const fn min_cell_size(mut self, min_cell_size: Size) -> Self {
        self.min_cell_size = min_cell_size;
        self
    }

    /// The configured base axis.
    pub const fn base_axis(&self) -> Axis {
        self.axis
    }

    /// The minimum cell size as configured (before flooring).
    pub const fn configured_min_cell_size(&self) -> Size {
        self.min_cell_size
    }

    /// The minimum cell size the solver actually uses.
    ///
    /// Components that are zero, negative, or not finite are floored to `1`.
    pub fn effective_min_cell_size(&self) -> Size {
        self.min_cell_size.positive_or_unit()
    }

    /// Compute line capacity, line count, and cell size without touching items.
    pub fn metrics(&self, container: Size, item_count: usize) -> GridMetrics {
        let axis = self.axis;
        let min = self.effective_min_cell_size();
        let container = container.non_negative();

        if min != self.min_cell_size {
            gridwrap_core::debug!(
                requested_width = self.min_cell_size.width,
                requested_height = self.min_cell_size.height,
                "degenerate minimum cell size floored to 1"
            );
        }

        let min_base = axis.base(min);
        let min_cross = axis.cross(min);
        let base_extent = axis.base(container);
        let cross_extent = axis.cross(container);

        let max_per_line = fit_count(base_extent, min_base);
        let target_lines = fit_count(cross_extent, min_cross);
        let items_per_line = max_per_line.min(item_count);
        let line_count = if items_per_line == 0 {
            0
        } else {
            item_count.div_ceil(items_per_line)
        };

        let cell_base = if items_per_line == 0 {
            min_base
        } else {
            (base_extent / items_per_line as f64).max(min_base)
        };

        GridMetrics {
            axis,
            container,
            item_count,
            max_per_line,
            target_lines,
            items_per_line,
            line_count,
            cell_size: axis.map(cell_base, min_cross),
            needs_trailing_fill: line_count > 0 && line_count < target_lines,
        }
    }

    /// Lay out `items` into lines for the given container.
    ///
    /// Items keep their order; each lands in exactly one line.
    pub fn layout<T, I>(&self, container: Size, items: I) -> GridLayout<T>
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        let metrics = self.metrics(container, items.len());

        let span = gridwrap_core::debug_span!(
            "grid_layout",
            axis = metrics.axis.as_str(),
            container_width = metrics.container.width,
            container_height = metrics.container.height,
            item_count = metrics.item_count
        );
        let _guard = span.enter();

        GridLayout::from_metrics(metrics, items)
    }
}

/// Number of `min`-sized slots that fit in `extent`, never less than one.
#[inline]
fn fit_count(extent: f64, min: f64) -> usize {
    let slots = (extent / min).floor();
    if slots >= 1.0 {
        // Saturating float-to-int conversion.
        slots as usize
    } else {
        1
    }
}

/// Solved dimensions of a grid for one container size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridMetrics {
    /// Base axis the metrics were solved for.
    pub axis: Axis,
    /// Container size after sanitizing.
    pub container: Size,
    /// Number of items laid out.
    pub item_count: usize,
    /// Cells that fit along the base axis at minimum size (at least 1).
    pub max_per_line: usize,
    /// Lines that fit along the cross axis at minimum size (at least 1).
    pub target_lines: usize,
    /// Cells per full line: `min(max_per_line, item_count)`.
    pub items_per_line: usize,
    /// Number of lines.
    pub line_count: usize,
    /// Size assigned to every cell.
    pub cell_size: Size,
    /// Whether fewer lines are used than fit, leaving cross-axis room.
    pub needs_trailing_fill: bool,
}

impl GridMetrics {
    /// Number of items in line `index` (0 when out of range).
    pub fn line_len(&self, index: usize) -> usize {
        if index >= self.line_count {
            return 0;
        }
        if index + 1 == self.line_count {
            self.item_count - self.items_per_line * index
        } else {
            self.items_per_line
        }
    }

    /// Extent covered by the cells: full lines along the base axis, all lines
    /// along the cross axis.
    pub fn content_size(&self) -> Size {
        let axis = self.axis;
        axis.map(
            axis.base(self.cell_size) * self.items_per_line as f64,
            axis.cross(self.cell_size) * self.line_count as f64,
        )
    }

    /// Whether any item was laid out.
    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}

/// One item with its assigned size.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell<T> {
    /// The caller's item.
    pub item: T,
    /// Width and height the renderer must fill.
    pub size: Size,
}

/// A run of cells along the base axis.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine<T> {
    cells: Vec<GridCell<T>>,
    trailing_fill: bool,
}

impl<T> GridLine<T> {
    /// Cells in flow order.
    pub fn cells(&self) -> &[GridCell<T>] {
        &self.cells
    }

    /// Number of cells in the line.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the line has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the line is short and needs a filler after its last cell.
    pub fn needs_trailing_fill(&self) -> bool {
        self.trailing_fill
    }

    /// Items in flow order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.cells.iter().map(|cell| &cell.item)
    }
}

/// The full line plan for one container size.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout<T> {
    lines: Vec<GridLine<T>>,
    metrics: GridMetrics,
}

impl<T> GridLayout<T> {
    pub(crate) fn from_metrics(metrics: GridMetrics, items: Vec<T>) -> Self {
        let mut lines = Vec::with_capacity(metrics.line_count);
        let mut items = items.into_iter();

        for index in 0..metrics.line_count {
            let cells: Vec<GridCell<T>> = items
                .by_ref()
                .take(metrics.line_len(index))
                .map(|item| GridCell {
                    item,
                    size: metrics.cell_size,
                })
                .collect();
            let trailing_fill = cells.len() < metrics.items_per_line;
            lines.push(GridLine {
                cells,
                trailing_fill,
            });
        }

        gridwrap_core::trace!(
            max_per_line = metrics.max_per_line,
            target_lines = metrics.target_lines,
            items_per_line = metrics.items_per_line,
            line_count = metrics.line_count,
            cell_width = metrics.cell_size.width,
            cell_height = metrics.cell_size.height,
            needs_trailing_fill = metrics.needs_trailing_fill,
            "grid solved"
        );

        Self { lines, metrics }
    }

    /// Lines in stacking order.
    pub fn lines(&self) -> &[GridLine<T>] {
        &self.lines
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The solved metrics.
    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    /// Base axis of the plan.
    pub fn axis(&self) -> Axis {
        self.metrics.axis
    }

    /// Sanitized container size the plan was solved for.
    pub fn container(&self) -> Size {
        self.metrics.container
    }

    /// Whether the grid uses fewer lines than fit and needs a cross-axis filler.
    pub fn needs_trailing_fill(&self) -> bool {
        self.metrics.needs_trailing_fill
    }

    /// Whether the plan holds no items.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of cells.
    pub fn item_count(&self) -> usize {
        self.metrics.item_count
    }

    /// All cells in original item order.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell<T>> {
        self.lines.iter().flat_map(|line| line.cells.iter())
    }

    /// All items in original order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.cells().map(|cell| &cell.item)
    }

    /// Consume the plan and return the items in original order.
    pub fn into_items(self) -> Vec<T> {
        self.lines
            .into_iter()
            .flat_map(|line| line.cells.into_iter().map(|cell| cell.item))
            .collect()
    }

    /// Replace every item, keeping the arrangement.
    pub fn map<U, F>(self, mut f: F) -> GridLayout<U>
    where
        F: FnMut(T) -> U,
    {
        let lines = self
            .lines
            .into_iter()
            .map(|line| GridLine {
                cells: line
                    .cells
                    .into_iter()
                    .map(|cell| GridCell {
                        item: f(cell.item),
                        size: cell.size,
                    })
                    .collect(),
                trailing_fill: line.trailing_fill,
            })
            .collect();
        GridLayout {
            lines,
            metrics: self.metrics,
        }
    }
}
