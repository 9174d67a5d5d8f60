#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Pointer input arrives as fractional host units ([`Point`], [`Offset`]);
//! rendering happens on a cell grid ([`Rect`]). One host unit renders as one
//! cell, and [`Offset::to_cells`] is the single place where that rounding
//! happens.

use std::ops::{Add, AddAssign, Sub};

/// An absolute pointer position in host units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A 2D translation in host units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    /// The zero translation.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new offset.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Round to whole cells.
    ///
    /// Non-finite components map to 0; out-of-range values saturate.
    #[must_use]
    pub fn to_cells(self) -> (i32, i32) {
        (round_to_cell(self.x), round_to_cell(self.y))
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Offset {
    fn add_assign(&mut self, rhs: Offset) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub for Point {
    type Output = Offset;

    /// Displacement from `rhs` to `self`.
    fn sub(self, rhs: Point) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

fn round_to_cell(value: f32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let value = f64::from(value).round();
    if value >= f64::from(i32::MAX) {
        return i32::MAX;
    }
    if value <= f64::from(i32::MIN) {
        return i32::MIN;
    }
    value as i32
}

/// A rectangle for layout bounds, clipping, and hit testing.
///
/// Uses cell coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a cell is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if a signed cell coordinate is inside the rectangle.
    #[inline]
    pub fn contains_signed(&self, x: i32, y: i32) -> bool {
        x >= i32::from(self.x)
            && x < i32::from(self.right())
            && y >= i32::from(self.y)
            && y < i32::from(self.bottom())
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns an empty rectangle if the rectangles don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Shrink by `margin` cells on every side.
    pub fn inner(&self, margin: u16) -> Rect {
        let twice = margin.saturating_mul(2);
        Rect {
            x: self.x.saturating_add(margin),
            y: self.y.saturating_add(margin),
            width: self.width.saturating_sub(twice),
            height: self.height.saturating_sub(twice),
        }
    }

    /// The visible part of a rectangle placed at a signed origin, clipped to `clip`.
    ///
    /// Used for content that has been translated partly (or fully) outside
    /// the drawable area.
    pub fn clip_signed(x: i32, y: i32, width: u16, height: u16, clip: Rect) -> Option<Rect> {
        let left = x.max(i32::from(clip.x));
        let top = y.max(i32::from(clip.y));
        let right = x.saturating_add(i32::from(width)).min(i32::from(clip.right()));
        let bottom = y.saturating_add(i32::from(height)).min(i32::from(clip.bottom()));
        if left >= right || top >= bottom {
            return None;
        }
        // All four values are within clip, which is u16-bounded.
        Some(Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_difference_is_offset() {
        let d = Point::new(12.5, 3.0) - Point::new(10.0, 5.0);
        assert_eq!(d, Offset::new(2.5, -2.0));
    }

    #[test]
    fn offset_rounds_to_cells() {
        assert_eq!(Offset::new(2.4, -2.6).to_cells(), (2, -3));
        assert_eq!(Offset::new(f32::NAN, f32::INFINITY).to_cells(), (0, 0));
        assert_eq!(Offset::new(1e12, -1e12).to_cells(), (i32::MAX, i32::MIN));
    }

    #[test]
    fn intersection_disjoint_is_empty() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(10, 10, 2, 2);
        assert!(a.intersection_opt(&b).is_none());
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn inner_saturates() {
        assert_eq!(Rect::new(2, 2, 10, 6).inner(1), Rect::new(3, 3, 8, 4));
        assert!(Rect::new(0, 0, 1, 1).inner(1).is_empty());
    }

    #[test]
    fn clip_signed_partial_left() {
        let clip = Rect::from_size(20, 10);
        assert_eq!(
            Rect::clip_signed(-3, 2, 10, 2, clip),
            Some(Rect::new(0, 2, 7, 2))
        );
    }

    #[test]
    fn clip_signed_fully_outside() {
        let clip = Rect::from_size(20, 10);
        assert_eq!(Rect::clip_signed(-30, 2, 10, 2, clip), None);
        assert_eq!(Rect::clip_signed(5, 10, 10, 2, clip), None);
    }

    #[test]
    fn clip_signed_at_extreme_origins() {
        let clip = Rect::from_size(20, 10);
        assert_eq!(Rect::clip_signed(i32::MAX, i32::MAX, u16::MAX, u16::MAX, clip), None);
        assert_eq!(Rect::clip_signed(i32::MIN, 0, u16::MAX, 4, clip), None);
    }

    #[test]
    fn contains_signed_handles_negative() {
        let r = Rect::new(1, 1, 3, 3);
        assert!(!r.contains_signed(-1, 2));
        assert!(r.contains_signed(3, 3));
        assert!(!r.contains_signed(4, 3));
    }
}
