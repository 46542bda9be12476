#![forbid(unsafe_code)]

//! The scrollable surface the engine windows against.

use std::fmt;

use vscroll_core::geometry::Rectangle;

/// Notifications the engine subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportEvent {
    Scroll,
    Resize,
}

/// Host-provided scroll surface.
///
/// Coordinates are vertical pixels. [`rect`](Viewport::rect) is relative to
/// the list container: a viewport scrolled exactly to the first item has
/// `rect().top == 0` even when the list sits below a header.
pub trait Viewport {
    /// Visible rectangle relative to the list container.
    fn rect(&self) -> Rectangle;

    /// Distance from the scroll origin to the list container's top.
    fn offset_top(&self) -> f64;

    /// Scroll by `delta` pixels (positive moves content up).
    fn scroll_by(&mut self, delta: f64);

    /// Scroll so the surface's scroll offset equals `offset`.
    fn scroll_to(&mut self, offset: f64);

    /// Register interest in `event`. Dropping the guard unsubscribes.
    ///
    /// The guard only scopes the registration; events never arrive through
    /// it. While it is live the host forwards scroll events to
    /// [`Updater::on_scroll`](crate::Updater::on_scroll) and resize events to
    /// [`Updater::on_resize`](crate::Updater::on_resize).
    fn subscribe(&mut self, event: ViewportEvent) -> Subscription;
}

impl<V: Viewport + ?Sized> Viewport for &mut V {
    fn rect(&self) -> Rectangle {
        (**self).rect()
    }

    fn offset_top(&self) -> f64 {
        (**self).offset_top()
    }

    fn scroll_by(&mut self, delta: f64) {
        (**self).scroll_by(delta);
    }

    fn scroll_to(&mut self, offset: f64) {
        (**self).scroll_to(offset);
    }

    fn subscribe(&mut self, event: ViewportEvent) -> Subscription {
        (**self).subscribe(event)
    }
}

/// Drop guard for a viewport subscription.
///
/// Runs its unsubscribe action exactly once, on [`cancel`](Self::cancel) or
/// on drop, whichever comes first.
pub struct Subscription {
    event: Option<ViewportEvent>,
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Guard that runs `unsubscribe` when released.
    pub fn new(event: ViewportEvent, unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            event: Some(event),
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Guard with nothing to release.
    #[must_use]
    pub fn noop() -> Self {
        Self {
            event: None,
            unsubscribe: None,
        }
    }

    /// Event this guard was created for.
    #[inline]
    pub fn event(&self) -> Option<ViewportEvent> {
        self.event
    }

    /// Whether the unsubscribe action has not run yet.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }

    /// Unsubscribe now.
    pub fn cancel(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("active", &self.is_active())
            .finish()
    }
}
