#![forbid(unsafe_code)]

//! Geometric primitives.

/// A vertical extent: the only geometry a vertically virtualized list needs.
///
/// Coordinates are in pixels, relative to whatever origin the producer chose
/// (the list container for item rectangles and viewport rectangles alike).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    /// Top edge (inclusive).
    pub top: f64,
    /// Height, never negative.
    pub height: f64,
}

impl Rectangle {
    /// Zero-sized rectangle at the origin.
    pub const EMPTY: Self = Self {
        top: 0.0,
        height: 0.0,
    };

    /// Create a new rectangle.
    ///
    /// Negative or non-finite heights are clamped to zero.
    #[inline]
    pub fn new(top: f64, height: f64) -> Self {
        let height = if height.is_finite() && height > 0.0 {
            height
        } else {
            0.0
        };
        Self { top, height }
    }

    /// Create a rectangle spanning `top..bottom`.
    #[inline]
    pub fn from_edges(top: f64, bottom: f64) -> Self {
        Self::new(top, bottom - top)
    }

    /// Top edge (inclusive).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.top
    }

    /// Height.
    #[inline]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Check if the rectangle has zero height.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height <= 0.0
    }

    /// Return a copy moved vertically by `dy`.
    #[inline]
    #[must_use]
    pub fn translate_by(&self, dy: f64) -> Self {
        Self {
            top: self.top + dy,
            height: self.height,
        }
    }

    /// Check whether the two extents overlap.
    ///
    /// Edges are half-open, so rectangles that merely touch do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.top < other.bottom() && other.top < self.bottom()
    }

    /// Check if a vertical position lies inside the rectangle.
    #[inline]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle::from_edges(self.top.min(other.top), self.bottom().max(other.bottom()))
    }

    /// Grow the rectangle by `amount` above and below.
    #[must_use]
    pub fn expand(&self, amount: f64) -> Rectangle {
        Rectangle::from_edges(self.top - amount, self.bottom() + amount)
    }
}
