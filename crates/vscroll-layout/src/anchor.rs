#![forbid(unsafe_code)]

//! Anchor-based scroll correction.
//!
//! After measurements or a list mutation, the same scroll offset can point at
//! different content: an item above the viewport grew by 80px and everything
//! visible slid down by 80px. To keep the page visually still, pick an item
//! that was rendered before and after the change (the *anchor*) and compute
//! the scroll delta that puts it back where it was relative to the viewport.
//!
//! # Anchor preference
//!
//! Among items rendered in both snapshots, in new-list order:
//!
//! 1. an item whose previous rectangle intersected the previous viewport
//!    beats one that did not;
//! 2. otherwise the item whose previous top is closest to the previous
//!    viewport top wins;
//! 3. remaining ties keep the earliest candidate.
//!
//! # Correction
//!
//! ```text
//! offset     = prev_rect.top - prev_viewport.top
//! correction = (next_rect.top - next_viewport.top) - offset
//! ```
//!
//! Scrolling by `correction` restores `offset` exactly.

use vscroll_core::identity::ItemId;

use crate::snapshot::PositionSnapshot;

/// A chosen anchor and the scroll delta that keeps it still.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorCorrection {
    /// Identity of the anchor item.
    pub anchor: ItemId,
    /// Anchor top minus viewport top, before the change.
    pub offset_in_viewport: f64,
    /// Scroll delta to apply.
    pub delta: f64,
}

/// Pick the anchor item for the transition `prev → next`.
pub fn find_anchor<T>(prev: &PositionSnapshot<T>, next: &PositionSnapshot<T>) -> Option<ItemId> {
    let viewport = prev.viewport_rect();
    let mut best: Option<(&ItemId, bool, f64)> = None;

    // Rendered in `next` implies inside next's slice; scan only that.
    for item in next.slice() {
        if !prev.is_rendered(&item.id) {
            continue;
        }
        let Some(rect) = prev.item_rect(&item.id) else {
            continue;
        };
        let visible = rect.intersects(&viewport);
        let distance = (viewport.top - rect.top).abs();
        let better = match best {
            None => true,
            Some((_, best_visible, best_distance)) => {
                (visible && !best_visible) || (visible == best_visible && distance < best_distance)
            }
        };
        if better {
            best = Some((&item.id, visible, distance));
        }
    }

    best.map(|(id, _, _)| id.clone())
}

/// Choose an anchor and compute its correction.
///
/// Returns `None` when no item is rendered in both snapshots.
pub fn resolve_anchor<T>(
    prev: &PositionSnapshot<T>,
    next: &PositionSnapshot<T>,
) -> Option<AnchorCorrection> {
    let anchor = find_anchor(prev, next)?;
    let prev_rect = prev.item_rect(&anchor)?;
    let next_rect = next.item_rect(&anchor)?;
    let offset_in_viewport = prev_rect.top - prev.viewport_rect().top;
    let delta = (next_rect.top - next.viewport_rect().top) - offset_in_viewport;

    #[cfg(feature = "tracing")]
    vscroll_core::trace!(
        message = "vscroll.anchor",
        anchor = %anchor,
        offset_in_viewport,
        delta,
    );

    Some(AnchorCorrection {
        anchor,
        offset_in_viewport,
        delta,
    })
}

/// Scroll delta (pixels) keeping the anchor still; `0` without an anchor.
pub fn correction<T>(prev: &PositionSnapshot<T>, next: &PositionSnapshot<T>) -> f64 {
    resolve_anchor(prev, next).map_or(0.0, |c| c.delta)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::collect::collect;
    use crate::heights::HeightTable;
    use crate::slice::SliceBounds;
    use vscroll_core::diagnostics::IgnoreDiagnostics;
    use vscroll_core::geometry::Rectangle;
    use vscroll_core::identity::OrderedList;

    fn ids(range: std::ops::Range<i64>) -> OrderedList<i64> {
        OrderedList::ingest(range, |i: &i64| ItemId::from(*i), &mut IgnoreDiagnostics)
    }

    fn snap(
        list: &OrderedList<i64>,
        heights: &HeightTable,
        bounds: SliceBounds,
        viewport: Rectangle,
    ) -> PositionSnapshot<i64> {
        let rects = Arc::new(collect(list, heights, 100.0));
        PositionSnapshot::new(viewport, list.clone(), rects, bounds)
    }

    #[test]
    fn no_common_rendered_items_means_no_correction() {
        let list = ids(0..10);
        let heights = HeightTable::new();
        let prev = snap(&list, &heights, SliceBounds::new(0, 3), Rectangle::new(0.0, 300.0));
        let next = snap(&list, &heights, SliceBounds::new(5, 8), Rectangle::new(500.0, 300.0));
        assert_eq!(find_anchor(&prev, &next), None);
        assert_eq!(correction(&prev, &next), 0.0);
    }

    #[test]
    fn growth_above_viewport_is_compensated() {
        let list = ids(0..10);
        let mut heights = HeightTable::new();
        let viewport = Rectangle::new(450.0, 300.0);
        let prev = snap(&list, &heights, SliceBounds::new(2, 9), viewport);

        heights.record([(ItemId::Int(2), 180.0)], 100.0, &mut IgnoreDiagnostics);
        let next = snap(&list, &heights, SliceBounds::new(2, 9), viewport);

        // Item 4 (top 400) intersects the viewport and is closest to its top.
        assert_eq!(find_anchor(&prev, &next), Some(ItemId::Int(4)));
        assert_eq!(correction(&prev, &next), 80.0);
    }

    #[test]
    fn visible_candidate_beats_closer_invisible_one() {
        let list = ids(0..10);
        let heights = HeightTable::new();
        // 395..399 intersects item 3 (top 300, distance 95); item 4 (top 400)
        // is only 5 away but lies outside the viewport.
        let viewport = Rectangle::new(395.0, 4.0);
        let prev = snap(&list, &heights, SliceBounds::new(2, 6), viewport);
        let next = snap(&list, &heights, SliceBounds::new(2, 6), viewport);
        assert_eq!(find_anchor(&prev, &next), Some(ItemId::Int(3)));
    }

    #[test]
    fn ties_keep_the_earliest_candidate() {
        let list = ids(0..4);
        let heights = HeightTable::new();
        // Viewport top at 150 sits 50 from item 1 (100) and item 2 (200);
        // both intersect 150..250.
        let viewport = Rectangle::new(150.0, 100.0);
        let prev = snap(&list, &heights, SliceBounds::new(0, 4), viewport);
        let next = snap(&list, &heights, SliceBounds::new(0, 4), viewport);
        assert_eq!(find_anchor(&prev, &next), Some(ItemId::Int(1)));
    }

    #[test]
    fn prepend_is_compensated_by_identity() {
        let before = ids(10..20);
        let after = ids(7..20);
        let heights = HeightTable::new();
        let viewport = Rectangle::new(200.0, 200.0);
        let prev = snap(&before, &heights, SliceBounds::new(1, 5), viewport);
        let next = snap(&after, &heights, SliceBounds::new(4, 8), viewport);
        let resolved = resolve_anchor(&prev, &next).expect("anchor");
        assert_eq!(resolved.anchor, ItemId::Int(12));
        assert_eq!(resolved.offset_in_viewport, 0.0);
        assert_eq!(resolved.delta, 300.0);
    }

    #[test]
    fn correction_round_trip_restores_offset() {
        let list = ids(0..20);
        let mut heights = HeightTable::new();
        let viewport = Rectangle::new(730.0, 250.0);
        let prev = snap(&list, &heights, SliceBounds::new(3, 14), viewport);
        heights.record(
            [(ItemId::Int(3), 37.0), (ItemId::Int(5), 260.0)],
            100.0,
            &mut IgnoreDiagnostics,
        );
        let next = snap(&list, &heights, SliceBounds::new(3, 14), viewport);
        let c = resolve_anchor(&prev, &next).expect("anchor");
        let corrected = next.with_viewport(viewport.translate_by(c.delta));
        let after = corrected.item_rect(&c.anchor).expect("rect").top
            - corrected.viewport_rect().top;
        assert_eq!(after, c.offset_in_viewport);
    }
}
