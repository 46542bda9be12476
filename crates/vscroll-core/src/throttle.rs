#![forbid(unsafe_code)]

//! Leading + trailing edge throttle for scroll notifications.
//!
//! Browsers and compositors deliver scroll notifications at input rate. The
//! windowing engine only needs to re-evaluate its slice a few times per
//! second while the user is scrolling, plus once after scrolling stops so
//! the final position is never missed. [`ScrollThrottle`] implements exactly
//! that:
//!
//! - the first event after a quiet period passes immediately (leading edge);
//! - events inside the interval are folded into one pending trailing call;
//! - the trailing call fires once the interval since the last pass elapses.
//!
//! Time is passed in explicitly so behavior is deterministic under test.

use web_time::{Duration, Instant};

/// Default interval between passing scroll notifications.
pub const DEFAULT_SCROLL_THROTTLE: Duration = Duration::from_millis(100);

/// Throttle state machine. See the [module docs](self).
#[derive(Debug, Clone)]
pub struct ScrollThrottle {
    interval: Duration,
    last_pass: Option<Instant>,
    trailing_pending: bool,
}

impl Default for ScrollThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THROTTLE)
    }
}

impl ScrollThrottle {
    /// Create a throttle with the given interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_pass: None,
            trailing_pending: false,
        }
    }

    /// Configured interval.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Feed one raw notification. Returns `true` if it passes now.
    pub fn on_event(&mut self, now: Instant) -> bool {
        let ready = match self.last_pass {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if ready {
            self.last_pass = Some(now);
            self.trailing_pending = false;
            true
        } else {
            self.trailing_pending = true;
            false
        }
    }

    /// Fire the trailing edge if it is due. Returns `true` if it fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.last_pass = Some(now);
                self.trailing_pending = false;
                true
            }
            _ => false,
        }
    }

    /// When the pending trailing edge becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        if !self.trailing_pending {
            return None;
        }
        self.last_pass.map(|last| last + self.interval)
    }

    /// Whether a trailing call is waiting.
    #[inline]
    pub fn has_trailing(&self) -> bool {
        self.trailing_pending
    }

    /// Forget any pending trailing call.
    pub fn cancel(&mut self) {
        self.trailing_pending = false;
    }
}
