#![forbid(unsafe_code)]

//! Choosing the contiguous index range to render.
//!
//! Two policies exist:
//!
//! - [`default_slice`] is used before any viewport position is trusted (first
//!   mount, or a list mutation the reconciler could not follow). It renders
//!   from the top until the accumulated height reaches one viewport.
//! - [`select`] is used on scroll, resize and after measurements. It renders
//!   every item intersecting the *render window*: the viewport grown by
//!   `offscreen_ratio * viewport.height` above and below ([`render_window`]).
//!
//! Both always return valid [`SliceBounds`] for the list they were given.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use vscroll_core::geometry::Rectangle;
use vscroll_core::identity::Item;

use crate::collect::RectangleTable;

/// Half-open index range `[start, end)` into the current list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SliceBounds {
    pub start: usize,
    pub end: usize,
}

impl SliceBounds {
    /// Empty bounds at the origin.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Create bounds; `end` is raised to `start` if it lies before it.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Clamp both ends into `0..=len`.
    #[must_use]
    pub fn clamp_to(self, len: usize) -> Self {
        let start = self.start.min(len);
        Self::new(start, self.end.min(len))
    }

    /// Number of indices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether no index is covered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `index` is inside the bounds.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// As a `Range`.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the bounds are valid for a list of `len` items.
    #[inline]
    pub fn is_valid_for(&self, len: usize) -> bool {
        self.start <= self.end && self.end <= len
    }
}

impl From<Range<usize>> for SliceBounds {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

fn rect_of<T>(rects: &RectangleTable, item: &Item<T>) -> Rectangle {
    rects.get(&item.id).unwrap_or(Rectangle::EMPTY)
}

/// Initial slice: from index 0 until the stacked height reaches one viewport.
///
/// The end index is the first item whose top, measured from the first item's
/// top, is at or beyond `viewport_height`; the whole list if none is.
pub fn default_slice<T>(
    list: &[Item<T>],
    rects: &RectangleTable,
    viewport_height: f64,
) -> SliceBounds {
    let Some(first) = list.first() else {
        return SliceBounds::EMPTY;
    };
    let start_offset = rect_of(rects, first).top;
    let end = list
        .iter()
        .position(|item| rect_of(rects, item).top - start_offset >= viewport_height)
        .unwrap_or(list.len());
    SliceBounds::new(0, end)
}

/// The viewport grown by `offscreen_ratio` viewport heights on both sides.
pub fn render_window(viewport: Rectangle, offscreen_ratio: f64) -> Rectangle {
    viewport.expand(viewport.height * offscreen_ratio.max(0.0))
}

/// Minimal contiguous range covering every item that intersects `window`.
///
/// `start` is the first item whose bottom lies below `window.top` (the last
/// item when the window sits past all content); `end` is the first item at or
/// after `start` whose top reaches `window.bottom` (the list length if none).
pub fn select<T>(list: &[Item<T>], rects: &RectangleTable, window: Rectangle) -> SliceBounds {
    if list.is_empty() {
        return SliceBounds::EMPTY;
    }
    let start = list
        .iter()
        .position(|item| rect_of(rects, item).bottom() > window.top)
        .unwrap_or(list.len() - 1);
    let window_bottom = window.bottom();
    let end = list[start..]
        .iter()
        .position(|item| rect_of(rects, item).top >= window_bottom)
        .map_or(list.len(), |offset| start + offset);
    SliceBounds::new(start, end)
}
