#![forbid(unsafe_code)]

//! gridwrap public facade crate.
//!
//! Re-exports the grid engine and geometry types behind one dependency, with
//! a prelude for day-to-day usage.
//!
//! ```
//! use gridwrap::prelude::*;
//!
//! let plan = Grid::column_major(Size::new(100.0, 100.0))
//!     .layout(Size::new(400.0, 200.0), ["a", "b", "c"]);
//!
//! assert_eq!(plan.line_count(), 2);
//! assert!(plan.needs_trailing_fill());
//! ```

// --- Geometry re-exports ---------------------------------------------------

pub use gridwrap_core::geometry::{Point, Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use gridwrap_layout::{
    Axis, Grid, GridCell, GridLayout, GridLine, GridMetrics, LayoutCache, LayoutCacheKey,
    LayoutCacheStats, PlacedCell, Placement, layout,
};

// --- Logging ---------------------------------------------------------------

#[cfg(feature = "tracing-json")]
pub use gridwrap_core::logging::init_json_subscriber;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{Axis, Grid, GridLayout, GridMetrics, LayoutCache, Placement, Point, Rect, Size};

    pub use crate::{core, layout};
}

pub use gridwrap_core as core;
pub use gridwrap_layout as layout;
