//! Property-based invariant tests for the wrapping grid solver.
//!
//! 1. Concatenating lines reproduces the input sequence.
//! 2. `items_per_line == min(max(1, floor(base / min_base)), item_count)`.
//! 3. Line count is `ceil(item_count / items_per_line)`.
//! 4. Every cell is at least the minimum along the base axis and exactly the
//!    minimum along the cross axis.
//! 5. Only the last line may be short, and only short lines need fill.
//! 6. Grid fill is set iff `0 < line_count < target_lines`.
//! 7. Layout is idempotent, and the cache agrees with the solver.
//! 8. Placement tiles its bounds without overlaps.
//! 9. Degenerate inputs never panic.

use gridwrap_layout::{Axis, Grid, LayoutCache, Point, Size};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const EPS: f64 = 1e-6;

fn axis_strategy() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::RowMajor), Just(Axis::ColumnMajor)]
}

fn min_size_strategy() -> impl Strategy<Value = Size> {
    (1.0f64..200.0, 1.0f64..200.0).prop_map(|(w, h)| Size::new(w, h))
}

fn container_strategy() -> impl Strategy<Value = Size> {
    (0.0f64..2_000.0, 0.0f64..2_000.0).prop_map(|(w, h)| Size::new(w, h))
}

fn any_extent() -> impl Strategy<Value = f64> {
    prop_oneof![
        -500.0f64..2_000.0,
        Just(0.0),
        Just(-0.0),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

fn expected_items_per_line(min: Size, container: Size, axis: Axis, count: usize) -> usize {
    let slots = (axis.base(container) / axis.base(min)).floor() as usize;
    slots.max(1).min(count)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Order preservation and counts
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lines_concatenate_to_input(
        min in min_size_strategy(),
        container in container_strategy(),
        axis in axis_strategy(),
        count in 0usize..200,
    ) {
        let plan = Grid::new(min).axis(axis).layout(container, 0..count);
        let flattened: Vec<usize> = plan
            .lines()
            .iter()
            .flat_map(|line| line.items().copied())
            .collect();
        prop_assert_eq!(flattened, (0..count).collect::<Vec<_>>());
    }

    #[test]
    fn items_per_line_formula(
        min in min_size_strategy(),
        container in container_strategy(),
        axis in axis_strategy(),
        count in 0usize..200,
    ) {
        let m = Grid::new(min).axis(axis).metrics(container, count);
        prop_assert_eq!(m.items_per_line, expected_items_per_line(min, container, axis, count));
        prop_assert!(m.max_per_line >= 1);
        prop_assert!(m.target_lines >= 1);
    }

    #[test]
    fn line_count_is_ceiling(
        min in min_size_strategy(),
        container in container_strategy(),
        axis in axis_strategy(),
        count in 0usize..200,
    ) {
        let plan = Grid::new(min).axis(axis).layout(container, 0..count);
        let per_line = plan.metrics().items_per_line;
        let expected = if count == 0 { 0 } else { count.div_ceil(per_line) };
        prop_assert_eq!(plan.line_count(), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-6. Cell sizes and fill flags
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cell_sizes_respect_minimum(
        min in min_size_strategy(),
        container in container_strategy(),
        axis in axis_strategy(),
        count in 1usize..100,
    ) {
        let plan = Grid::new(min).axis(axis).layout(container, 0..count);
        for cell in plan.cells() {
            prop_assert!(axis.base(cell.size) >= axis.base(min));
            prop_assert_eq!(axis.cross(cell.size), axis.cross(min));
        }
    }

    #[test]
    fn only_last_line_is_short(
        min in min_size_strategy(),
        container in container_strategy(),
        axis in axis_strategy(),
        count in 1usize..200,
    ) {
        let plan = Grid::new(min).axis(axis).layout(container, 0..count);
        let per_line = plan.metrics().items_per_line;
        let last = plan.line_count() - 1;
        for (index, line) in plan.lines().iter().enumerate() {
            prop_assert!(!line.is_empty());
            if index < last {
                prop_assert_eq!(line.len(), per_line);
            }
            prop_assert_eq!(line.needs_trailing_fill(), line.len() < per_line);
        }
    }

    #[test]
    fn grid_fill_iff_fewer_lines_than_fit(
        min in min_size_strategy(),
        container in container_strategy(),
        axis in axis_strategy(),
        count in 0usize..200,
    ) {
        let plan = Grid::new(min).axis(axis).layout(container, 0..count);
        let m = plan.metrics();
        prop_assert_eq!(
            plan.needs_trailing_fill(),
            m.line_count > 0 && m.line_count < m.target_lines
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Purity and caching
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_idempotent(
        min in min_size_strategy(),
        container in container_strategy(),
        axis in axis_strategy(),
        count in 0usize..100,
    ) {
        let grid = Grid::new(min).axis(axis);
        prop_assert_eq!(grid.layout(container, 0..count), grid.layout(container, 0..count));
    }

    #[test]
    fn cache_agrees_with_solver(
        min in min_size_strategy(),
        containers in prop::collection::vec(container_strategy(), 1..20),
        axis in axis_strategy(),
        count in 0usize..50,
    ) {
        let grid = Grid::new(min).axis(axis);
        let mut cache = LayoutCache::new(4);
        for container in containers.iter().chain(containers.iter()) {
            prop_assert_eq!(cache.metrics(&grid, *container, count), grid.metrics(*container, count));
        }
    }

    #[test]
    fn swapping_axis_and_container_mirrors_metrics(
        min in min_size_strategy(),
        container in container_strategy(),
        count in 0usize..100,
    ) {
        let row = Grid::row_major(min).metrics(container, count);
        let col = Grid::column_major(Size::new(min.height, min.width))
            .metrics(Size::new(container.height, container.width), count);
        prop_assert_eq!(row.items_per_line, col.items_per_line);
        prop_assert_eq!(row.line_count, col.line_count);
        prop_assert_eq!(row.target_lines, col.target_lines);
        prop_assert_eq!(row.cell_size.width, col.cell_size.height);
        prop_assert_eq!(row.cell_size.height, col.cell_size.width);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Placement tiling
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn placement_tiles_bounds(
        min in min_size_strategy(),
        container in container_strategy(),
        axis in axis_strategy(),
        count in 0usize..60,
    ) {
        let plan = Grid::new(min).axis(axis).layout(container, 0..count);
        let placement = plan.place(Point::ORIGIN);
        let rects: Vec<_> = placement.rects().collect();

        let total: f64 = rects.iter().map(|r| r.area()).sum();
        let bounds_area = placement.bounds.area();
        prop_assert!((total - bounds_area).abs() <= EPS * bounds_area.max(1.0));

        for (i, a) in rects.iter().enumerate() {
            prop_assert!(placement.bounds.contains_rect(a, EPS * 10.0));
            for b in &rects[i + 1..] {
                let overlap = a.intersection(b).area();
                prop_assert!(overlap <= EPS * a.area().max(1.0), "{:?} overlaps {:?}", a, b);
            }
        }
        prop_assert_eq!(placement.cells.len(), count);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Degenerate inputs
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn degenerate_inputs_never_panic(
        min_w in any_extent(),
        min_h in any_extent(),
        cw in any_extent(),
        ch in any_extent(),
        axis in axis_strategy(),
        count in 0usize..50,
    ) {
        let plan = Grid::new(Size::new(min_w, min_h))
            .axis(axis)
            .layout(Size::new(cw, ch), 0..count);
        prop_assert_eq!(plan.item_count(), count);
        prop_assert!(plan.metrics().max_per_line >= 1);
        for cell in plan.cells() {
            prop_assert!(cell.size.width.is_finite() && cell.size.width > 0.0);
            prop_assert!(cell.size.height.is_finite() && cell.size.height > 0.0);
        }
        let _ = plan.place(Point::ORIGIN);
    }

    #[test]
    fn zero_container_gives_one_item_per_line(
        min in min_size_strategy(),
        axis in axis_strategy(),
        count in 1usize..50,
    ) {
        let plan = Grid::new(min).axis(axis).layout(Size::ZERO, 0..count);
        prop_assert_eq!(plan.metrics().max_per_line, 1);
        prop_assert_eq!(plan.line_count(), count);
    }
}
