#![forbid(unsafe_code)]

//! The renderer contract: what to mount, and what got measured.

use vscroll_core::identity::{Item, ItemId};

/// Padding that stands in for unrendered items.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlankSpace {
    /// Height of everything before the slice.
    pub above: f64,
    /// Height of everything after the slice.
    pub below: f64,
}

/// One render request.
#[derive(Debug)]
pub struct RenderPlan<'a, T> {
    /// Items to mount, in order.
    pub items: &'a [Item<T>],
    /// List index of `items[0]`.
    pub start_index: usize,
    /// Padding before and after the mounted items.
    pub blank_space: BlankSpace,
}

impl<T> RenderPlan<'_, T> {
    /// `(list index, item)` pairs.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &Item<T>)> {
        self.items
            .iter()
            .enumerate()
            .map(|(offset, item)| (self.start_index + offset, item))
    }
}

/// Heights reported by the renderer for the items it mounted.
#[derive(Debug, Clone, Default)]
pub struct MeasurementReport {
    entries: Vec<(ItemId, f64)>,
}

impl MeasurementReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the measured height of `id`.
    pub fn report(&mut self, id: ItemId, height: f64) {
        self.entries.push((id, height));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ItemId, f64)> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Move every entry out, leaving the buffer allocated.
    pub fn drain(&mut self) -> impl Iterator<Item = (ItemId, f64)> + '_ {
        self.entries.drain(..)
    }
}

/// Mounts the planned items and measures them.
///
/// Only mounted items are reported; unmounted items keep their last known
/// height.
pub trait ItemRenderer<T> {
    fn render(&mut self, plan: &RenderPlan<'_, T>, report: &mut MeasurementReport);
}

impl<T, F> ItemRenderer<T> for F
where
    F: FnMut(&RenderPlan<'_, T>, &mut MeasurementReport),
{
    fn render(&mut self, plan: &RenderPlan<'_, T>, report: &mut MeasurementReport) {
        self(plan, report);
    }
}
