#![forbid(unsafe_code)]

//! Single-slot memoization keyed by dependency identity.
//!
//! Derived state (the rectangle table, most importantly) is recomputed only
//! when the *identity* of an input changes: a list generation, a heights
//! version, the bits of a configured number. Keys are compared with `==`
//! on those tokens, never by walking the inputs.
//!
//! ```
//! use vscroll_layout::memo::Memo;
//!
//! let mut memo: Memo<(u64, u64), usize> = Memo::new();
//! let mut computed = 0;
//! let a = *memo.get_or_compute((1, 1), || { computed += 1; 10 });
//! let b = *memo.get_or_compute((1, 1), || { computed += 1; 20 });
//! assert_eq!((a, b, computed), (10, 10, 1));
//! ```

/// Cache holding the value for the most recent key.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    /// Create an empty memo.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing it on a key change.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        let fresh = matches!(&self.slot, Some((cached, _)) if *cached == key);
        if fresh {
            self.hits = self.hits.saturating_add(1);
        } else {
            self.misses = self.misses.saturating_add(1);
            self.slot = None;
        }
        let (_, value) = self.slot.get_or_insert_with(|| (key, compute()));
        value
    }

    /// Cached value if `key` matches the stored key.
    pub fn peek(&self, key: &K) -> Option<&V> {
        match &self.slot {
            Some((cached, value)) if cached == key => Some(value),
            _ => None,
        }
    }

    /// Drop the cached value.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    /// Lookups served from cache.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that recomputed.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
