#![forbid(unsafe_code)]

//! At-most-once-per-frame coalescing for deferred work.
//!
//! Scroll and resize notifications can arrive many times between two
//! animation frames, but recomputing the rendered slice more than once per
//! frame is wasted work. [`FrameCoalescer`] records that work is wanted and
//! tells the caller when it must ask the host for a frame: only on the
//! transition from idle to pending. Requests arriving while a frame is
//! already pending are absorbed, never queued.
//!
//! # Usage
//!
//! ```
//! use vscroll_core::frame_coalescer::FrameCoalescer;
//!
//! let mut update = FrameCoalescer::new();
//! assert!(update.request()); // ask the host for a frame
//! assert!(!update.request()); // already pending: absorbed
//! assert!(!update.request());
//!
//! // On the frame tick:
//! assert!(update.take()); // run the work exactly once
//! assert!(!update.take());
//! ```

/// Tracks whether a frame-deferred callback is pending.
///
/// Not thread-safe; owned by the single event-processing thread.
#[derive(Debug, Clone, Default)]
pub struct FrameCoalescer {
    pending: bool,
    requests: u64,
    absorbed: u64,
    runs: u64,
}

impl FrameCoalescer {
    /// Create an idle coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the work run on the next frame.
    ///
    /// Returns `true` when the caller must schedule a frame (idle → pending),
    /// `false` when the request was absorbed by an already pending frame.
    pub fn request(&mut self) -> bool {
        self.requests = self.requests.saturating_add(1);
        if self.pending {
            self.absorbed = self.absorbed.saturating_add(1);
            return false;
        }
        self.pending = true;
        true
    }

    /// Consume the pending request on a frame tick.
    ///
    /// Returns `true` if the work should run now.
    pub fn take(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.runs = self.runs.saturating_add(1);
        true
    }

    /// Drop any pending request without running it.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    /// Whether a request is waiting for a frame.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total number of `request` calls.
    #[inline]
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Requests absorbed by an already pending frame.
    #[inline]
    pub fn absorbed(&self) -> u64 {
        self.absorbed
    }

    /// Number of times the work actually ran.
    #[inline]
    pub fn runs(&self) -> u64 {
        self.runs
    }
}
