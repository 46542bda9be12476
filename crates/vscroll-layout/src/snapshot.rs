#![forbid(unsafe_code)]

//! Immutable positioning snapshots and the one-generation history.

use std::fmt;
use std::sync::Arc;

use vscroll_core::geometry::Rectangle;
use vscroll_core::identity::{Item, ItemId, OrderedList};

use crate::collect::RectangleTable;
use crate::slice::SliceBounds;

/// Everything a consumer needs to know about one render cycle.
///
/// The rectangle table is shared, not copied; building a snapshot is O(1).
pub struct PositionSnapshot<T> {
    viewport: Rectangle,
    list: OrderedList<T>,
    rects: Arc<RectangleTable>,
    bounds: SliceBounds,
}

impl<T> Clone for PositionSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            viewport: self.viewport,
            list: self.list.clone(),
            rects: Arc::clone(&self.rects),
            bounds: self.bounds,
        }
    }
}

impl<T> fmt::Debug for PositionSnapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionSnapshot")
            .field("viewport", &self.viewport)
            .field("list_generation", &self.list.generation())
            .field("list_len", &self.list.len())
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl<T> PositionSnapshot<T> {
    /// Build a snapshot. `bounds` is clamped to the list length.
    pub fn new(
        viewport: Rectangle,
        list: OrderedList<T>,
        rects: Arc<RectangleTable>,
        bounds: SliceBounds,
    ) -> Self {
        let bounds = bounds.clamp_to(list.len());
        Self {
            viewport,
            list,
            rects,
            bounds,
        }
    }

    /// Viewport rectangle relative to the list container.
    #[inline]
    pub fn viewport_rect(&self) -> Rectangle {
        self.viewport
    }

    /// Full rectangle table.
    #[inline]
    pub fn rectangles(&self) -> &RectangleTable {
        &self.rects
    }

    /// Shared handle to the rectangle table.
    #[inline]
    pub fn shared_rectangles(&self) -> Arc<RectangleTable> {
        Arc::clone(&self.rects)
    }

    /// Rectangle of the item with `id`.
    #[inline]
    pub fn item_rect(&self, id: &ItemId) -> Option<Rectangle> {
        self.rects.get(id)
    }

    /// Extent of the whole list.
    #[inline]
    pub fn list_rect(&self) -> Rectangle {
        self.rects.list_rect()
    }

    /// The complete list.
    #[inline]
    pub fn list(&self) -> &OrderedList<T> {
        &self.list
    }

    /// The rendered sub-list.
    #[inline]
    pub fn slice(&self) -> &[Item<T>] {
        &self.list[self.bounds.range()]
    }

    /// Rendered bounds.
    #[inline]
    pub fn bounds(&self) -> SliceBounds {
        self.bounds
    }

    /// Whether the item with `id` was rendered in this cycle.
    pub fn is_rendered(&self, id: &ItemId) -> bool {
        self.rects
            .index_of(id)
            .is_some_and(|index| self.bounds.contains(index))
    }

    /// Same layout observed from a different viewport.
    #[must_use]
    pub fn with_viewport(&self, viewport: Rectangle) -> Self {
        Self {
            viewport,
            ..self.clone()
        }
    }
}

/// Two-slot buffer holding the previous and the current snapshot.
///
/// Never retains more than one generation back.
pub struct SnapshotHistory<T> {
    previous: Option<PositionSnapshot<T>>,
    current: Option<PositionSnapshot<T>>,
}

impl<T> Default for SnapshotHistory<T> {
    fn default() -> Self {
        Self {
            previous: None,
            current: None,
        }
    }
}

impl<T> fmt::Debug for SnapshotHistory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotHistory")
            .field("previous", &self.previous)
            .field("current", &self.current)
            .finish()
    }
}

impl<T> SnapshotHistory<T> {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a render cycle: the committed snapshot, observed from the live
    /// `viewport`, becomes `previous`; the older generation is dropped.
    pub fn begin_cycle(&mut self, viewport: Rectangle) {
        self.previous = self
            .current
            .take()
            .map(|snapshot| snapshot.with_viewport(viewport));
    }

    /// Install the snapshot produced by the cycle.
    pub fn commit(&mut self, snapshot: PositionSnapshot<T>) {
        self.current = Some(snapshot);
    }

    /// Snapshot from before the running (or last) cycle.
    #[inline]
    pub fn previous(&self) -> Option<&PositionSnapshot<T>> {
        self.previous.as_ref()
    }

    /// Most recently committed snapshot.
    #[inline]
    pub fn current(&self) -> Option<&PositionSnapshot<T>> {
        self.current.as_ref()
    }

    /// Drop both slots.
    pub fn clear(&mut self) {
        self.previous = None;
        self.current = None;
    }
}
