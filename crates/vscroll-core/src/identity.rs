#![forbid(unsafe_code)]

//! Item identity and identity-checked ordered lists.
//!
//! Every row in a virtualized list carries an [`ItemId`] that stays stable
//! across list mutations representing "the same logical row". The engine keys
//! heights, rectangles and anchors by identity, so identities must be unique
//! within a list. [`OrderedList::ingest`] enforces that at the boundary.
//!
//! # Generations
//!
//! An [`OrderedList`] is immutable and reference counted. Each list built by
//! a constructor receives a fresh process-unique *generation*; clones share
//! it. Caches downstream compare generations instead of list contents, which
//! is the "recompute when the reference changes" policy.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// Stable identity of a list item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemId {
    /// Numeric identity.
    Int(i64),
    /// String identity.
    Str(Arc<str>),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ItemId {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for ItemId {
    fn from(value: usize) -> Self {
        match i64::try_from(value) {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Str(Arc::from(value.to_string())),
        }
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<Arc<str>> for ItemId {
    fn from(value: Arc<str>) -> Self {
        Self::Str(value)
    }
}

/// A list row: identity plus opaque payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<T> {
    pub id: ItemId,
    pub data: T,
}

impl<T> Item<T> {
    /// Create an item.
    pub fn new(id: impl Into<ItemId>, data: T) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Immutable, identity-unique, reference-counted item sequence.
///
/// Dereferences to `[Item<T>]`. Cloning is O(1) and preserves the
/// [generation](Self::generation).
pub struct OrderedList<T> {
    items: Arc<[Item<T>]>,
    generation: u64,
}

impl<T> Clone for OrderedList<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            generation: self.generation,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedList")
            .field("generation", &self.generation)
            .field("items", &&*self.items)
            .finish()
    }
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::from_unique(Vec::new())
    }
}

impl<T> OrderedList<T> {
    /// Build a list from raw payloads, deriving identities with `identity`.
    ///
    /// Duplicate identities are reported to `sink` and the later occurrence
    /// is dropped; items after it are still ingested.
    pub fn ingest<I, F, S>(raw: I, mut identity: F, sink: &mut S) -> Self
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> ItemId,
        S: DiagnosticSink + ?Sized,
    {
        let raw = raw.into_iter();
        let mut seen = std::collections::HashSet::with_capacity(raw.size_hint().0);
        let mut items = Vec::with_capacity(raw.size_hint().0);
        for (index, data) in raw.enumerate() {
            let id = identity(&data);
            if seen.contains(&id) {
                sink.report(Diagnostic::DuplicateIdentity { id, index });
                continue;
            }
            seen.insert(id.clone());
            items.push(Item { id, data });
        }
        Self::from_unique(items)
    }

    /// Build a list from pre-identified items, dropping later duplicates.
    pub fn from_items<S>(items: impl IntoIterator<Item = Item<T>>, sink: &mut S) -> Self
    where
        S: DiagnosticSink + ?Sized,
    {
        let mut seen = std::collections::HashSet::new();
        let mut kept = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            if seen.contains(&item.id) {
                sink.report(Diagnostic::DuplicateIdentity { id: item.id, index });
                continue;
            }
            seen.insert(item.id.clone());
            kept.push(item);
        }
        Self::from_unique(kept)
    }

    fn from_unique(items: Vec<Item<T>>) -> Self {
        Self {
            items: Arc::from(items),
            generation: next_generation(),
        }
    }

    /// Generation token; equal generations imply identical contents.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Check whether two handles refer to the same list.
    #[inline]
    pub fn same_list(&self, other: &Self) -> bool {
        self.generation == other.generation
    }

    /// Borrow the items.
    #[inline]
    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    /// Position of `id` in the list (linear scan).
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }
}

impl<T> Deref for OrderedList<T> {
    type Target = [Item<T>];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}
