#![forbid(unsafe_code)]

//! Layout result caching.
//!
//! Solving a grid is cheap, but hosts tend to re-run layout on every frame
//! even when nothing changed. [`LayoutCache`] memoizes [`GridMetrics`] keyed
//! by the sanitized inputs, so a hit returns exactly what
//! [`Grid::metrics`] would.
//!
//! The cache is bounded; when it fills up it is cleared wholesale.

use rustc_hash::FxHashMap;

use crate::{Axis, Grid, GridLayout, GridMetrics, Size};

/// Default number of entries before the cache resets.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Hashable identity of one layout input.
///
/// Floats are stored by bit pattern after sanitizing, so inputs that
/// normalize to the same values (`-0.0` and `0.0`, any NaN container
/// extent and `0.0`) share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutCacheKey {
    min_width: u64,
    min_height: u64,
    container_width: u64,
    container_height: u64,
    axis: Axis,
    item_count: usize,
}

impl LayoutCacheKey {
    /// Build the key for `grid` laid out in `container` with `item_count` items.
    pub fn new(grid: &Grid, container: Size, item_count: usize) -> Self {
        let min = grid.effective_min_cell_size();
        let container = container.non_negative();
        Self {
            min_width: min.width.to_bits(),
            min_height: min.height.to_bits(),
            container_width: container.width.to_bits(),
            container_height: container.height.to_bits(),
            axis: grid.base_axis(),
            item_count,
        }
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutCacheStats {
    /// Entries currently stored.
    pub entries: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to solve.
    pub misses: u64,
}

impl LayoutCacheStats {
    /// Fraction of lookups that hit, `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Bounded memo of solved grid metrics.
#[derive(Debug, Clone)]
pub struct LayoutCache {
    entries: FxHashMap<LayoutCacheKey, GridMetrics>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl LayoutCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Metrics for `grid` in `container`, solving only on a miss.
    pub fn metrics(&mut self, grid: &Grid, container: Size, item_count: usize) -> GridMetrics {
        let key = LayoutCacheKey::new(grid, container, item_count);
        if let Some(metrics) = self.entries.get(&key) {
            self.hits += 1;
            return *metrics;
        }

        self.misses += 1;
        let metrics = grid.metrics(container, item_count);
        if self.entries.len() >= self.capacity {
            gridwrap_core::debug!(capacity = self.capacity, "layout cache full, clearing");
            self.entries.clear();
        }
        self.entries.insert(key, metrics);
        metrics
    }

    /// Lay out `items` using cached metrics.
    pub fn layout<T, I>(&mut self, grid: &Grid, container: Size, items: I) -> GridLayout<T>
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        let metrics = self.metrics(grid, container, items.len());
        GridLayout::from_metrics(metrics, items)
    }

    /// Current counters.
    pub fn stats(&self) -> LayoutCacheStats {
        LayoutCacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// Drop all entries and reset counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
