#![forbid(unsafe_code)]

//! Carrying the rendered slice across a list mutation.
//!
//! When rows are inserted, removed or replaced while the viewport stays put,
//! the index range that was rendered no longer points at the same rows.
//! [`reconcile`] follows the rendered rows by identity instead: if every row
//! of the old slice still exists in the new list, in the same order, with no
//! foreign row between them, the slice moves to their new positions.
//! Anything else is [`Reconciliation::Unresolvable`] and the caller falls back
//! to the default slice.

use vscroll_core::identity::Item;

use crate::slice::SliceBounds;

/// Outcome of [`reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The previously rendered rows map to these bounds in the new list.
    Resolved(SliceBounds),
    /// No stable identity mapping exists.
    Unresolvable,
}

impl Reconciliation {
    /// The resolved bounds, if any.
    #[inline]
    pub fn bounds(self) -> Option<SliceBounds> {
        match self {
            Self::Resolved(bounds) => Some(bounds),
            Self::Unresolvable => None,
        }
    }
}

/// Map `prev[prev_bounds]` into `next` by identity.
pub fn reconcile<T, U>(
    prev: &[Item<T>],
    next: &[Item<U>],
    prev_bounds: SliceBounds,
) -> Reconciliation {
    if prev_bounds.is_empty() || !prev_bounds.is_valid_for(prev.len()) {
        return Reconciliation::Unresolvable;
    }
    let rendered = &prev[prev_bounds.range()];
    let first_id = &rendered[0].id;
    let Some(new_start) = next.iter().position(|item| &item.id == first_id) else {
        return Reconciliation::Unresolvable;
    };
    let new_end = new_start + rendered.len();
    if new_end > next.len() {
        return Reconciliation::Unresolvable;
    }
    let contiguous = rendered
        .iter()
        .zip(&next[new_start..new_end])
        .all(|(old, new)| old.id == new.id);
    if !contiguous {
        #[cfg(feature = "tracing")]
        vscroll_core::trace!(
            message = "vscroll.reconcile.broken_run",
            prev_start = prev_bounds.start,
            prev_end = prev_bounds.end,
        );
        return Reconciliation::Unresolvable;
    }
    Reconciliation::Resolved(SliceBounds::new(new_start, new_end))
}
