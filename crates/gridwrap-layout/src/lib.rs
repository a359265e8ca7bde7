#![forbid(unsafe_code)]

//! Adaptive wrapping grid layout.
//!
//! This crate arranges an ordered collection of opaque items into lines of
//! equally sized cells:
//!
//! - [`Grid`] - builder holding the minimum cell size and base [`Axis`]
//! - [`GridMetrics`] - per-line capacity, line count, and cell size for a container
//! - [`GridLayout`] - the lines of cells, with trailing-fill flags
//! - [`cache`] - memoization of metrics keyed by input
//! - [`placement`] - conversion of a plan into absolute rectangles
//!
//! # Example
//!
//! ```
//! use gridwrap_layout::{Axis, Grid, Size};
//!
//! let grid = Grid::new(Size::new(100.0, 100.0)).axis(Axis::RowMajor);
//! let plan = grid.layout(Size::new(350.0, 220.0), 0..7);
//!
//! assert_eq!(plan.line_count(), 3);
//! assert_eq!(plan.metrics().items_per_line, 3);
//! assert!(plan.lines()[2].needs_trailing_fill());
//! assert!(!plan.needs_trailing_fill());
//! ```
//!
//! The engine is a pure function of its inputs. Degenerate sizes are floored
//! rather than rejected: a minimum cell extent at or below zero counts as `1`,
//! and a line always holds at least one item.

pub mod cache;
pub mod grid;
pub mod placement;

pub use cache::{LayoutCache, LayoutCacheKey, LayoutCacheStats};
pub use grid::{Grid, GridCell, GridLayout, GridLine, GridMetrics};
pub use gridwrap_core::geometry::{Point, Rect, Size};
pub use placement::{PlacedCell, Placement};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which dimension cells flow along before wrapping.
///
/// The flow direction is the *base* axis; lines stack along the *cross* axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    /// Cells flow left to right; lines stack top to bottom.
    #[default]
    RowMajor,
    /// Cells flow top to bottom; lines stack left to right.
    ColumnMajor,
}

impl Axis {
    /// Extent of `size` along the base axis.
    #[inline]
    pub const fn base(self, size: Size) -> f64 {
        match self {
            Self::RowMajor => size.width,
            Self::ColumnMajor => size.height,
        }
    }

    /// Extent of `size` along the cross axis.
    #[inline]
    pub const fn cross(self, size: Size) -> f64 {
        self.flip().base(size)
    }

    /// Map base/cross extents back to a width/height pair.
    #[inline]
    pub const fn map(self, base: f64, cross: f64) -> Size {
        match self {
            Self::RowMajor => Size::new(base, cross),
            Self::ColumnMajor => Size::new(cross, base),
        }
    }

    /// The other orientation.
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Self::RowMajor => Self::ColumnMajor,
            Self::ColumnMajor => Self::RowMajor,
        }
    }

    /// Stable lowercase name, used in logs and snapshots.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RowMajor => "row_major",
            Self::ColumnMajor => "column_major",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lay out `items` in a wrapping grid.
///
/// Shorthand for `Grid::new(min_cell_size).axis(axis).layout(container, items)`.
pub fn layout<T, I>(min_cell_size: Size, container: Size, axis: Axis, items: I) -> GridLayout<T>
where
    I: IntoIterator<Item = T>,
{
    Grid::new(min_cell_size).axis(axis).layout(container, items)
}
