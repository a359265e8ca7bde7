#![forbid(unsafe_code)]

//! Snapshot and golden testing for gridwrap plans.
//!
//! - **Plan snapshots**: renders a [`GridLayout`] as text and compares it
//!   against stored `.snap` files.
//! - **Canvas snapshots**: rasterizes a [`Placement`](gridwrap_layout::Placement)
//!   into characters, see [`canvas`].
//! - **Golden resize sweeps**: checksums of plans across container sizes,
//!   see [`golden`].
//!
//! # Quick Start
//!
//! ```ignore
//! use gridwrap_harness::assert_snapshot;
//! use gridwrap_layout::{Grid, Size};
//!
//! #[test]
//! fn nine_cells() {
//!     let plan = Grid::row_major(Size::new(100.0, 100.0)).layout(Size::new(350.0, 220.0), 0..9);
//!     assert_snapshot!("nine_cells", &plan);
//! }
//! ```
//!
//! # Updating Snapshots
//!
//! Run tests with `BLESS=1` to create or update snapshot files:
//!
//! ```sh
//! BLESS=1 cargo test -p gridwrap-harness
//! ```
//!
//! Snapshot files are stored under `tests/snapshots/` relative to the
//! crate's `CARGO_MANIFEST_DIR`.

pub mod canvas;
pub mod golden;

use std::fmt::{self, Display, Write as FmtWrite};
use std::path::{Path, PathBuf};

use gridwrap_layout::GridLayout;

// Re-export types useful for harness users.
pub use canvas::{Canvas, placement_to_canvas};
pub use gridwrap_layout::{Axis, Grid, Point, Rect, Size};

// ============================================================================
// Errors
// ============================================================================

/// Harness error type.
#[derive(Debug)]
pub enum Error {
    /// Reading or writing snapshot/golden files failed.
    Io(std::io::Error),
    /// Encoding a JSONL log record failed.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "harness i/o: {err}"),
            Self::Json(err) => write!(f, "harness json: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Standard result type for harness APIs.
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Plan → Text Conversion
// ============================================================================

/// Render a plan as text.
///
/// ```text
/// grid axis=row_major container=350.00x220.00 cell=116.67x100.00
/// metrics max_per_line=3 target_lines=2 items_per_line=3 line_count=3
/// line 0: 0 1 2
/// line 1: 3 4 5
/// line 2: 6 +fill
/// ```
///
/// A final `+grid-fill` line appears when the grid needs a cross-axis filler.
pub fn plan_to_text<T: Display>(plan: &GridLayout<T>) -> String {
    let m = plan.metrics();
    let mut out = String::new();

    write!(
        out,
        "grid axis={} container={:.2}x{:.2} cell={:.2}x{:.2}",
        m.axis, m.container.width, m.container.height, m.cell_size.width, m.cell_size.height,
    )
    .unwrap();
    write!(
        out,
        "\nmetrics max_per_line={} target_lines={} items_per_line={} line_count={}",
        m.max_per_line, m.target_lines, m.items_per_line, m.line_count,
    )
    .unwrap();

    for (index, line) in plan.lines().iter().enumerate() {
        write!(out, "\nline {index}:").unwrap();
        for item in line.items() {
            write!(out, " {item}").unwrap();
        }
        if line.needs_trailing_fill() {
            out.push_str(" +fill");
        }
    }

    if plan.needs_trailing_fill() {
        out.push_str("\n+grid-fill");
    }

    out
}

// ============================================================================
// Match Modes & Normalization
// ============================================================================

/// Comparison mode for snapshot testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Byte-exact string comparison.
    Exact,
    /// Trim trailing whitespace on each line before comparing.
    TrimTrailing,
    /// Collapse all whitespace runs to single spaces and trim each line.
    Fuzzy,
}

/// Normalize text according to the requested match mode.
fn normalize(text: &str, mode: MatchMode) -> String {
    match mode {
        MatchMode::Exact => text.to_string(),
        MatchMode::TrimTrailing => text
            .lines()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n"),
        MatchMode::Fuzzy => text
            .lines()
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

// ============================================================================
// Diff
// ============================================================================

/// Compute a simple line-by-line diff between two text strings.
///
/// Lines prefixed with ` ` match, `-` appear only in `expected`, `+` only in
/// `actual`. Returns an empty string when the inputs are identical.
pub fn diff_text(expected: &str, actual: &str) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();

    let max_lines = expected_lines.len().max(actual_lines.len());
    let mut out = String::new();
    let mut has_diff = false;

    for i in 0..max_lines {
        match (expected_lines.get(i).copied(), actual_lines.get(i).copied()) {
            (Some(e), Some(a)) if e == a => {
                writeln!(out, " {e}").unwrap();
            }
            (Some(e), Some(a)) => {
                writeln!(out, "-{e}").unwrap();
                writeln!(out, "+{a}").unwrap();
                has_diff = true;
            }
            (Some(e), None) => {
                writeln!(out, "-{e}").unwrap();
                has_diff = true;
            }
            (None, Some(a)) => {
                writeln!(out, "+{a}").unwrap();
                has_diff = true;
            }
            (None, None) => {}
        }
    }

    if has_diff { out } else { String::new() }
}

// ============================================================================
// Snapshot Assertion
// ============================================================================

/// Resolve the snapshot file path.
fn snapshot_path(base_dir: &Path, name: &str) -> PathBuf {
    base_dir
        .join("tests")
        .join("snapshots")
        .join(format!("{name}.snap"))
}

/// Check if the `BLESS` environment variable is set.
pub fn is_bless() -> bool {
    std::env::var("BLESS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Assert that `actual` matches the stored snapshot `name`.
///
/// # Panics
///
/// * If the snapshot file does not exist and `BLESS=1` is **not** set.
/// * If the text does not match the stored snapshot.
pub fn assert_text_snapshot(name: &str, actual: &str, base_dir: &str, mode: MatchMode) {
    let path = snapshot_path(Path::new(base_dir), name);

    if is_bless() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create snapshot directory");
        }
        std::fs::write(&path, actual).expect("failed to write snapshot");
        return;
    }

    match std::fs::read_to_string(&path) {
        Ok(expected) => {
            let norm_expected = normalize(&expected, mode);
            let norm_actual = normalize(actual, mode);

            if norm_expected != norm_actual {
                let diff = diff_text(&norm_expected, &norm_actual);
                panic!(
                    "\n\
                     === Snapshot mismatch: '{name}' ===\n\
                     File: {}\n\
                     Mode: {mode:?}\n\
                     Set BLESS=1 to update.\n\n\
                     Diff (- expected, + actual):\n{diff}",
                    path.display()
                );
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            panic!(
                "\n\
                 === No snapshot found: '{name}' ===\n\
                 Expected at: {}\n\
                 Run with BLESS=1 to create it.\n\n\
                 Actual output:\n{actual}",
                path.display(),
            );
        }
        Err(e) => {
            panic!("Failed to read snapshot '{}': {e}", path.display());
        }
    }
}

/// Assert that a plan's text rendering matches a stored snapshot.
pub fn assert_plan_snapshot<T: Display>(
    name: &str,
    plan: &GridLayout<T>,
    base_dir: &str,
    mode: MatchMode,
) {
    assert_text_snapshot(name, &plan_to_text(plan), base_dir, mode);
}

// ============================================================================
// Convenience Macros
// ============================================================================

/// Assert that a plan matches a stored snapshot.
///
/// Uses `CARGO_MANIFEST_DIR` to locate the snapshot directory automatically.
///
/// ```ignore
/// // Default mode: TrimTrailing
/// assert_snapshot!("nine_cells", &plan);
///
/// // Explicit mode
/// assert_snapshot!("nine_cells_exact", &plan, MatchMode::Exact);
/// ```
#[macro_export]
macro_rules! assert_snapshot {
    ($name:expr, $plan:expr) => {
        $crate::assert_plan_snapshot(
            $name,
            $plan,
            env!("CARGO_MANIFEST_DIR"),
            $crate::MatchMode::TrimTrailing,
        )
    };
    ($name:expr, $plan:expr, $mode:expr) => {
        $crate::assert_plan_snapshot($name, $plan, env!("CARGO_MANIFEST_DIR"), $mode)
    };
}

/// Assert that arbitrary text matches a stored snapshot.
#[macro_export]
macro_rules! assert_text_snapshot {
    ($name:expr, $text:expr) => {
        $crate::assert_text_snapshot(
            $name,
            $text,
            env!("CARGO_MANIFEST_DIR"),
            $crate::MatchMode::TrimTrailing,
        )
    };
}
