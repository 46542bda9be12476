#![forbid(unsafe_code)]

//! The windowing engine.
//!
//! [`Updater`] decides which contiguous slice of the list is mounted and keeps
//! the page visually still while measurements and list mutations move items
//! around.
//!
//! # Render cycle
//!
//! Every time the mounted slice or the list changes, one cycle runs:
//!
//! 1. the committed snapshot, observed from the live viewport, becomes
//!    `previous`;
//! 2. the renderer mounts the slice and reports heights;
//! 3. heights are recorded (summed delta, number of changed items);
//! 4. the new snapshot is committed;
//! 5. if the list or any height changed, the anchor correction between
//!    `previous` and the new snapshot is applied through
//!    [`Viewport::scroll_by`];
//! 6. if the list changed or the summed delta reaches one assumed item
//!    height, a slice update is requested;
//! 7. a positioning notification is requested.
//!
//! # Frames
//!
//! Slice updates and positioning notifications are each coalesced to at most
//! one per frame, and at most one frame is requested from the
//! [`FrameScheduler`] while any work is outstanding.
//!
//! # Disposal
//!
//! After [`dispose`](Updater::dispose) every entry point is a silent no-op.

use std::sync::Arc;

use tracing::{debug, debug_span, trace};
use vscroll_core::diagnostics::DiagnosticSink;
use vscroll_core::frame_coalescer::FrameCoalescer;
use vscroll_core::identity::{Item, OrderedList};
use vscroll_core::throttle::ScrollThrottle;
use vscroll_layout::{
    HeightTable, Memo, PositionSnapshot, Reconciliation, RectangleTable, SliceBounds,
    SnapshotHistory, collect, default_slice, reconcile, render_window, resolve_anchor, select,
};
use web_time::Instant;

use crate::config::ScrollerConfig;
use crate::diagnostics::TracingDiagnostics;
use crate::error::{EngineError, Result};
use crate::render::{BlankSpace, ItemRenderer, MeasurementReport, RenderPlan};
use crate::scheduler::FrameScheduler;
use crate::viewport::{Subscription, Viewport, ViewportEvent};

/// `(list generation, heights version, assumed height bits)`
type RectKey = (u64, u64, u64);

/// Counters for tests and instrumentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdaterStats {
    /// Render cycles run.
    pub render_cycles: u64,
    /// Slice selections run (one per frame with a pending update).
    pub selections: u64,
    /// Non-zero anchor corrections applied.
    pub corrections: u64,
    /// Frames requested from the scheduler.
    pub frames_requested: u64,
}

/// Windowing engine. See the [module docs](self).
pub struct Updater<T, F> {
    config: ScrollerConfig,
    scheduler: F,
    list: OrderedList<T>,
    heights: HeightTable,
    bounds: SliceBounds,
    rects: Memo<RectKey, Arc<RectangleTable>>,
    history: SnapshotHistory<T>,
    update: FrameCoalescer,
    notify: FrameCoalescer,
    frame_requested: bool,
    throttle: ScrollThrottle,
    subscriptions: Vec<Subscription>,
    report: MeasurementReport,
    diagnostics: Box<dyn DiagnosticSink>,
    stats: UpdaterStats,
    disposed: bool,
}

impl<T, F> std::fmt::Debug for Updater<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("list_len", &self.list.len())
            .field("bounds", &self.bounds)
            .field("update_pending", &self.update.is_pending())
            .field("notify_pending", &self.notify.is_pending())
            .field("stats", &self.stats)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl<T, F: FrameScheduler> Updater<T, F> {
    /// Create an engine showing the default slice of `list`.
    pub fn new<V: Viewport + ?Sized>(
        list: OrderedList<T>,
        config: ScrollerConfig,
        scheduler: F,
        viewport: &V,
    ) -> Self {
        let throttle = ScrollThrottle::new(config.scroll_throttle());
        let mut updater = Self {
            config,
            scheduler,
            list,
            heights: HeightTable::new(),
            bounds: SliceBounds::EMPTY,
            rects: Memo::new(),
            history: SnapshotHistory::new(),
            update: FrameCoalescer::new(),
            notify: FrameCoalescer::new(),
            frame_requested: false,
            throttle,
            subscriptions: Vec::new(),
            report: MeasurementReport::new(),
            diagnostics: Box::new(TracingDiagnostics),
            stats: UpdaterStats::default(),
            disposed: false,
        };
        updater.bounds = updater.default_bounds(viewport.rect().height);
        updater
    }

    /// Route measurement diagnostics to `sink` instead of `tracing`.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    /// Subscribe to the viewport and run the first render cycle.
    pub fn mount<V, R>(&mut self, viewport: &mut V, renderer: &mut R)
    where
        V: Viewport + ?Sized,
        R: ItemRenderer<T> + ?Sized,
    {
        if self.disposed {
            return;
        }
        self.subscriptions.clear();
        self.subscriptions
            .push(viewport.subscribe(ViewportEvent::Scroll));
        self.subscriptions
            .push(viewport.subscribe(ViewportEvent::Resize));
        self.render_cycle(viewport, renderer, true);
    }

    /// Replace the list.
    ///
    /// The mounted slice follows its items by identity when it can; otherwise
    /// the default slice of the new list is used.
    pub fn set_list<V, R>(&mut self, list: OrderedList<T>, viewport: &mut V, renderer: &mut R)
    where
        V: Viewport + ?Sized,
        R: ItemRenderer<T> + ?Sized,
    {
        if self.disposed || list.same_list(&self.list) {
            return;
        }
        let reconciled = reconcile(&self.list, &list, self.bounds);
        self.list = list;
        self.bounds = match reconciled {
            Reconciliation::Resolved(bounds) => {
                trace!(start = bounds.start, end = bounds.end, "slice followed list mutation");
                bounds
            }
            Reconciliation::Unresolvable => {
                let bounds = self.default_bounds(viewport.rect().height);
                trace!(
                    start = bounds.start,
                    end = bounds.end,
                    "slice reset to default after list mutation"
                );
                bounds
            }
        };
        self.render_cycle(viewport, renderer, true);
    }

    /// A scroll notification arrived at `now`.
    pub fn on_scroll(&mut self, now: Instant) {
        if self.disposed {
            return;
        }
        if self.throttle.on_event(now) {
            self.request_update();
        }
    }

    /// Fire the trailing scroll edge if it is due.
    pub fn poll_timers(&mut self, now: Instant) {
        if self.disposed {
            return;
        }
        if self.throttle.poll(now) {
            self.request_update();
        }
    }

    /// When [`poll_timers`](Self::poll_timers) next has work.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.disposed {
            return None;
        }
        self.throttle.deadline()
    }

    /// A resize notification arrived.
    pub fn on_resize(&mut self) {
        if self.disposed {
            return;
        }
        self.request_update();
    }

    /// A requested frame arrived.
    ///
    /// Runs the pending slice update, then returns the current positioning if
    /// a notification was pending. Every slice update of a non-empty list
    /// raises a notification, whether or not the bounds moved.
    pub fn on_frame<V, R>(
        &mut self,
        viewport: &mut V,
        renderer: &mut R,
    ) -> Option<PositionSnapshot<T>>
    where
        V: Viewport + ?Sized,
        R: ItemRenderer<T> + ?Sized,
    {
        if self.disposed {
            return None;
        }
        // Requests raised while servicing this frame are folded into it.
        self.frame_requested = true;
        if self.update.take() {
            self.update_slice(viewport, renderer);
        }
        let positioning = if self.notify.take() {
            self.positioning(&*viewport)
        } else {
            None
        };
        self.frame_requested = false;
        if self.update.is_pending() || self.notify.is_pending() {
            self.schedule_frame();
        }
        positioning
    }

    /// Scroll so the item at `index` sits at the top of the viewport.
    pub fn scroll_to_index<V: Viewport + ?Sized>(
        &mut self,
        index: usize,
        viewport: &mut V,
    ) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        let len = self.list.len();
        let rect = self
            .rectangles()
            .at(index)
            .ok_or(EngineError::IndexOutOfRange { index, len })?;
        viewport.scroll_to(rect.top + viewport.offset_top());
        Ok(())
    }

    /// Committed snapshot observed from the live viewport.
    pub fn positioning<V: Viewport + ?Sized>(&self, viewport: &V) -> Option<PositionSnapshot<T>> {
        self.history
            .current()
            .map(|snapshot| snapshot.with_viewport(viewport.rect()))
    }

    /// Items currently mounted.
    pub fn current_slice(&self) -> &[Item<T>] {
        &self.list[self.bounds.range()]
    }

    #[inline]
    pub fn bounds(&self) -> SliceBounds {
        self.bounds
    }

    #[inline]
    pub fn list(&self) -> &OrderedList<T> {
        &self.list
    }

    #[inline]
    pub fn heights(&self) -> &HeightTable {
        &self.heights
    }

    #[inline]
    pub fn config(&self) -> &ScrollerConfig {
        &self.config
    }

    /// Adopt a config whose layout and throttle fields are unchanged.
    pub(crate) fn set_zone_config(&mut self, config: ScrollerConfig) {
        self.config = config;
    }

    #[inline]
    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    #[inline]
    pub fn stats(&self) -> UpdaterStats {
        self.stats
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Padding for the mounted slice, from the committed layout.
    pub fn blank_space(&self) -> BlankSpace {
        self.history
            .current()
            .map(|snapshot| blank_space(snapshot.rectangles(), snapshot.bounds()))
            .unwrap_or_default()
    }

    /// Stop: cancel pending frames and timers and release subscriptions.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.update.cancel();
        self.notify.cancel();
        self.frame_requested = false;
        self.throttle.cancel();
        self.subscriptions.clear();
        debug!(message = "vscroll.dispose");
    }

    fn rectangles(&mut self) -> Arc<RectangleTable> {
        let assumed = self.config.assumed_item_height;
        let key = (
            self.list.generation(),
            self.heights.version(),
            assumed.to_bits(),
        );
        let (list, heights) = (&self.list, &self.heights);
        Arc::clone(
            self.rects
                .get_or_compute(key, || Arc::new(collect(list, heights, assumed))),
        )
    }

    fn default_bounds(&mut self, viewport_height: f64) -> SliceBounds {
        let rects = self.rectangles();
        default_slice(&self.list, &rects, viewport_height)
    }

    fn schedule_frame(&mut self) {
        if !self.frame_requested {
            self.frame_requested = true;
            self.stats.frames_requested += 1;
            self.scheduler.request_frame();
        }
    }

    fn request_update(&mut self) {
        if self.update.request() {
            self.schedule_frame();
        }
    }

    fn request_notification(&mut self) {
        if self.notify.request() {
            self.schedule_frame();
        }
    }

    fn update_slice<V, R>(&mut self, viewport: &mut V, renderer: &mut R)
    where
        V: Viewport + ?Sized,
        R: ItemRenderer<T> + ?Sized,
    {
        if self.list.is_empty() {
            return;
        }
        let _span = debug_span!("vscroll.update").entered();
        self.stats.selections += 1;
        // Zones track the viewport, not the slice: notify even if bounds hold.
        self.request_notification();
        let rects = self.rectangles();
        let window = render_window(viewport.rect(), self.config.offscreen_to_viewport_ratio);
        let bounds = select(&self.list, &rects, window);
        if bounds != self.bounds {
            trace!(
                from_start = self.bounds.start,
                from_end = self.bounds.end,
                to_start = bounds.start,
                to_end = bounds.end,
                "slice changed"
            );
            self.bounds = bounds;
            self.render_cycle(viewport, renderer, false);
        }
    }

    fn render_cycle<V, R>(&mut self, viewport: &mut V, renderer: &mut R, list_changed: bool)
    where
        V: Viewport + ?Sized,
        R: ItemRenderer<T> + ?Sized,
    {
        let _span = debug_span!(
            "vscroll.render",
            start = self.bounds.start,
            end = self.bounds.end,
            list_changed
        )
        .entered();
        self.stats.render_cycles += 1;
        let assumed = self.config.assumed_item_height;

        self.history.begin_cycle(viewport.rect());

        let rects = self.rectangles();
        let plan = RenderPlan {
            items: &self.list[self.bounds.range()],
            start_index: self.bounds.start,
            blank_space: blank_space(&rects, self.bounds),
        };
        self.report.clear();
        renderer.render(&plan, &mut self.report);

        let change = self
            .heights
            .record(self.report.drain(), assumed, &mut *self.diagnostics);

        let snapshot = PositionSnapshot::new(
            viewport.rect(),
            self.list.clone(),
            self.rectangles(),
            self.bounds,
        );
        self.history.commit(snapshot);

        if list_changed || change.is_changed() {
            self.apply_correction(viewport);
        }
        if list_changed || change.delta.abs() >= assumed {
            self.request_update();
        }
        self.request_notification();
    }

    fn apply_correction<V: Viewport + ?Sized>(&mut self, viewport: &mut V) {
        let (Some(prev), Some(next)) = (self.history.previous(), self.history.current()) else {
            return;
        };
        let Some(correction) = resolve_anchor(prev, next) else {
            return;
        };
        if correction.delta != 0.0 {
            debug!(
                message = "vscroll.correction",
                anchor = %correction.anchor,
                delta = correction.delta,
            );
            self.stats.corrections += 1;
            viewport.scroll_by(correction.delta);
        }
    }
}

/// Height of the content before and after `bounds`.
fn blank_space(rects: &RectangleTable, bounds: SliceBounds) -> BlankSpace {
    let (Some(first), Some(last)) = (rects.at(0), rects.at(rects.len().saturating_sub(1))) else {
        return BlankSpace::default();
    };
    let above = rects
        .at(bounds.start)
        .map_or(0.0, |rect| rect.top - first.top);
    let below = rects
        .at(bounds.end)
        .map_or(0.0, |rect| last.bottom() - rect.top);
    BlankSpace { above, below }
}
