#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All extents are `f64` logical units. The layout engine never produces
//! negative or non-finite values; the sanitizing constructors here are where
//! caller-supplied sizes are brought into that domain.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Unit size, the floor applied to degenerate minimum cell sizes.
    pub const UNIT: Self = Self::new(1.0, 1.0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Create a square size.
    #[inline]
    pub const fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    /// Clamp each component into `[0, inf)`.
    ///
    /// Negative, NaN, and infinite components become `0.0`.
    #[must_use]
    pub fn non_negative(self) -> Self {
        Self::new(non_negative(self.width), non_negative(self.height))
    }

    /// Replace components that are not strictly positive and finite with `1.0`.
    #[must_use]
    pub fn positive_or_unit(self) -> Self {
        Self::new(positive_or_unit(self.width), positive_or_unit(self.height))
    }

    /// Check whether either component is zero (or below).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Area in square units.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.width.min(other.width), self.height.min(other.height))
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

#[inline]
fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[inline]
fn positive_or_unit(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

/// A point in container coordinates (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by a size.
    #[must_use]
    pub fn offset(self, by: Size) -> Self {
        Self::new(self.x + by.width, self.y + by.height)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    /// Width in units.
    pub width: f64,
    /// Height in units.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area in square units.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Check whether `other` lies entirely within this rectangle.
    ///
    /// `tolerance` absorbs accumulated floating-point error at the edges.
    pub fn contains_rect(&self, other: &Rect, tolerance: f64) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.right() <= self.right() + tolerance
            && other.bottom() <= self.bottom() + tolerance
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns an empty rectangle when the two do not overlap.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Rect::new(x, y, right - x, bottom - y)
        } else {
            Rect::default()
        }
    }

    /// Check whether two rectangles share any area.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.intersection(other).is_empty()
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_clamps_bad_components() {
        assert_eq!(Size::new(-5.0, 3.0).non_negative(), Size::new(0.0, 3.0));
        assert_eq!(Size::new(f64::NAN, f64::INFINITY).non_negative(), Size::ZERO);
        assert_eq!(Size::new(12.5, 0.0).non_negative(), Size::new(12.5, 0.0));
    }

    #[test]
    fn positive_or_unit_floors_degenerate_components() {
        assert_eq!(Size::new(0.0, -1.0).positive_or_unit(), Size::UNIT);
        assert_eq!(Size::new(f64::NAN, 40.0).positive_or_unit(), Size::new(1.0, 40.0));
        assert_eq!(Size::new(0.5, 2.0).positive_or_unit(), Size::new(0.5, 2.0));
    }

    #[test]
    fn size_min_max() {
        let a = Size::new(10.0, 40.0);
        let b = Size::new(20.0, 30.0);
        assert_eq!(a.max(b), Size::new(20.0, 40.0));
        assert_eq!(a.min(b), Size::new(10.0, 30.0));
    }

    #[test]
    fn size_from_tuple() {
        let s: Size = (3.0, 4.0).into();
        assert_eq!(s, Size::new(3.0, 4.0));
        assert_eq!(s.area(), 12.0);
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.area(), 1200.0);
        assert_eq!(r.origin(), Point::new(10.0, 20.0));
        assert_eq!(r.size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn rect_contains_point_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.99, 9.99)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, 10.0)));
    }

    #[test]
    fn rect_contains_rect_with_tolerance() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(50.0, 50.0, 50.000_000_001, 50.0);
        assert!(!outer.contains_rect(&inner, 0.0));
        assert!(outer.contains_rect(&inner, 1e-6));
    }

    #[test]
    fn rect_intersection_and_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersection(&b), Rect::new(5.0, 5.0, 5.0, 5.0));
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 15.0, 15.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn adjacent_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn point_offset() {
        assert_eq!(
            Point::new(1.0, 2.0).offset(Size::new(3.0, 4.0)),
            Point::new(4.0, 6.0)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn size_serializes_as_object() {
        let json = serde_json::to_string(&Size::new(1.5, 2.0)).unwrap();
        assert_eq!(json, r#"{"width":1.5,"height":2.0}"#);
    }
}
