#![forbid(unsafe_code)]

//! Stacking measured heights into rectangles.
//!
//! [`collect`] walks the list in order and lays each item directly below its
//! predecessor. The resulting [`RectangleTable`] satisfies, for list order
//! `i_0..i_n`:
//!
//! ```text
//! rect(i_0).top     == 0
//! rect(i_k+1).top   == rect(i_k).bottom
//! ```
//!
//! so it can be queried both by identity and by list position.

use rustc_hash::FxHashMap;
use vscroll_core::geometry::Rectangle;
use vscroll_core::identity::{Item, ItemId};

use crate::heights::HeightTable;

/// Identity → stacked rectangle, in list order.
#[derive(Debug, Clone, Default)]
pub struct RectangleTable {
    rects: Vec<Rectangle>,
    index: FxHashMap<ItemId, usize>,
}

impl RectangleTable {
    /// Rectangle of the item with `id`.
    #[inline]
    pub fn get(&self, id: &ItemId) -> Option<Rectangle> {
        self.index.get(id).map(|&i| self.rects[i])
    }

    /// List position of the item with `id`.
    #[inline]
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Rectangle at list position `index`.
    #[inline]
    pub fn at(&self, index: usize) -> Option<Rectangle> {
        self.rects.get(index).copied()
    }

    /// Number of rectangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Whether the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Rectangles in list order.
    #[inline]
    pub fn as_slice(&self) -> &[Rectangle] {
        &self.rects
    }

    /// Combined height of every item.
    pub fn total_height(&self) -> f64 {
        self.list_rect().height
    }

    /// Extent of the whole list, from the first top to the last bottom.
    pub fn list_rect(&self) -> Rectangle {
        match (self.rects.first(), self.rects.last()) {
            (Some(first), Some(last)) => Rectangle::from_edges(first.top, last.bottom()),
            _ => Rectangle::EMPTY,
        }
    }
}

/// Stack `list` into rectangles using `heights`, falling back to
/// `assumed_height` for unmeasured items.
pub fn collect<T>(list: &[Item<T>], heights: &HeightTable, assumed_height: f64) -> RectangleTable {
    let mut rects = Vec::with_capacity(list.len());
    let mut index = FxHashMap::default();
    index.reserve(list.len());
    let mut top = 0.0;
    for (i, item) in list.iter().enumerate() {
        let rect = Rectangle::new(top, heights.height_or(&item.id, assumed_height));
        top = rect.bottom();
        rects.push(rect);
        index.insert(item.id.clone(), i);
    }
    RectangleTable { rects, index }
}
