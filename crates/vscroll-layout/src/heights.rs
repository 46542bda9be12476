#![forbid(unsafe_code)]

//! Measured item heights.
//!
//! The renderer reports heights only for items it currently has mounted.
//! [`HeightTable`] remembers the last report for every identity it has ever
//! seen, so an item scrolled out of the slice keeps its measured height.
//! Entries are never removed; stale identities are simply never queried.

use rustc_hash::FxHashMap;
use vscroll_core::diagnostics::{Diagnostic, DiagnosticSink};
use vscroll_core::identity::ItemId;

/// Summary of one batch of height reports.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeightChange {
    /// Sum of `new - previous` over all reports, where `previous` is the
    /// stored height or the assumed height for first measurements.
    pub delta: f64,
    /// Number of reports whose effective height differs from before.
    pub changed: usize,
    /// Number of reports rejected as invalid.
    pub rejected: usize,
}

impl HeightChange {
    /// Whether any item's effective height moved.
    #[inline]
    pub fn is_changed(&self) -> bool {
        self.changed > 0
    }
}

/// Identity → last measured height.
#[derive(Debug, Clone, Default)]
pub struct HeightTable {
    heights: FxHashMap<ItemId, f64>,
    version: u64,
}

impl HeightTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored height for `id`, if it was ever measured.
    #[inline]
    pub fn get(&self, id: &ItemId) -> Option<f64> {
        self.heights.get(id).copied()
    }

    /// Stored height for `id`, or `assumed` when unmeasured.
    #[inline]
    pub fn height_or(&self, id: &ItemId, assumed: f64) -> f64 {
        self.get(id).unwrap_or(assumed)
    }

    /// Number of measured identities.
    #[inline]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Whether nothing was measured yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Version token; bumps whenever a stored value changes.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Record a batch of measurements.
    ///
    /// Negative and non-finite heights are rejected with a
    /// [`Diagnostic::InvalidMeasurement`].
    pub fn record<I, S>(&mut self, reports: I, assumed: f64, sink: &mut S) -> HeightChange
    where
        I: IntoIterator<Item = (ItemId, f64)>,
        S: DiagnosticSink + ?Sized,
    {
        let mut change = HeightChange::default();
        let mut dirty = false;
        for (id, height) in reports {
            if !height.is_finite() || height < 0.0 {
                change.rejected += 1;
                sink.report(Diagnostic::InvalidMeasurement { id, height });
                continue;
            }
            let stored = self.heights.get(&id).copied();
            let previous = stored.unwrap_or(assumed);
            if height != previous {
                change.delta += height - previous;
                change.changed += 1;
            }
            if stored != Some(height) {
                self.heights.insert(id, height);
                dirty = true;
            }
        }
        if dirty {
            self.version = self.version.wrapping_add(1);
        }
        change
    }
}
