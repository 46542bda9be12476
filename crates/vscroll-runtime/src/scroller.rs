#![forbid(unsafe_code)]

//! Host-facing scroller: raw items in, slices and edge callbacks out.
//!
//! [`VirtualScroller`] wraps an [`Updater`] with the pieces an application
//! usually wants on top of the bare engine:
//!
//! - raw payloads are turned into an [`OrderedList`] through an identity
//!   function, with duplicates reported to a [`DiagnosticSink`];
//! - every positioning notification is fed to a [`ScrollZoneTracker`] and
//!   fans out to `on_positioning_update` and the four edge callbacks
//!   (`on_at_start`, `on_near_start`, `on_near_end`, `on_at_end`).
//!
//! ```rust,ignore
//! let mut scroller = VirtualScroller::new(rows, |row: &Row| row.id.into(), config, frames, &viewport)?;
//! scroller.on_near_end(|cause| load_more(cause));
//! scroller.mount(&mut viewport, &mut renderer);
//! // host loop
//! scroller.on_scroll(Instant::now());
//! scroller.on_frame(&mut viewport, &mut renderer);
//! ```

use std::fmt;

use tracing::debug;
use vscroll_core::diagnostics::DiagnosticSink;
use vscroll_core::identity::{Item, ItemId, OrderedList};
use vscroll_layout::{PositionSnapshot, ScrollZoneTracker, TriggerCause, ZoneKind, ZoneTrigger};
use web_time::Instant;

use crate::config::ScrollerConfig;
use crate::diagnostics::TracingDiagnostics;
use crate::error::{ConfigError, Result};
use crate::render::ItemRenderer;
use crate::scheduler::FrameScheduler;
use crate::updater::Updater;
use crate::viewport::Viewport;

type ZoneCallback = Box<dyn FnMut(TriggerCause)>;
type PositioningCallback<T> = Box<dyn FnMut(&PositionSnapshot<T>)>;

struct Callbacks<T> {
    at_start: Option<ZoneCallback>,
    near_start: Option<ZoneCallback>,
    near_end: Option<ZoneCallback>,
    at_end: Option<ZoneCallback>,
    positioning: Option<PositioningCallback<T>>,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self {
            at_start: None,
            near_start: None,
            near_end: None,
            at_end: None,
            positioning: None,
        }
    }
}

impl<T> Callbacks<T> {
    fn dispatch(&mut self, trigger: ZoneTrigger) {
        let slot = match trigger.zone {
            ZoneKind::AtStart => &mut self.at_start,
            ZoneKind::NearStart => &mut self.near_start,
            ZoneKind::NearEnd => &mut self.near_end,
            ZoneKind::AtEnd => &mut self.at_end,
        };
        debug!(zone = ?trigger.zone, cause = %trigger.cause, "zone triggered");
        if let Some(callback) = slot {
            callback(trigger.cause);
        }
    }
}

fn zone_tracker(config: &ScrollerConfig) -> ScrollZoneTracker {
    ScrollZoneTracker::standard(
        config.edge_distance,
        config.near_start_proximity_ratio,
        config.near_end_proximity_ratio,
    )
}

/// Virtualized list scroller. See the [module docs](self).
pub struct VirtualScroller<T, F> {
    updater: Updater<T, F>,
    identity: Box<dyn FnMut(&T) -> ItemId>,
    diagnostics: Box<dyn DiagnosticSink>,
    zones: ScrollZoneTracker,
    callbacks: Callbacks<T>,
}

impl<T, F> fmt::Debug for VirtualScroller<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualScroller")
            .field("updater", &self.updater)
            .field("zones", &self.zones)
            .finish_non_exhaustive()
    }
}

impl<T, F: FrameScheduler> VirtualScroller<T, F> {
    /// Ingest `items` and build the engine.
    ///
    /// Fails only on an invalid `config`.
    pub fn new<V: Viewport + ?Sized>(
        items: impl IntoIterator<Item = T>,
        identity: impl FnMut(&T) -> ItemId + 'static,
        config: ScrollerConfig,
        scheduler: F,
        viewport: &V,
    ) -> Result<Self> {
        let config = config.validated()?;
        let mut identity: Box<dyn FnMut(&T) -> ItemId> = Box::new(identity);
        let mut diagnostics: Box<dyn DiagnosticSink> = Box::new(TracingDiagnostics);
        let list = OrderedList::ingest(items, &mut identity, &mut *diagnostics);
        let zones = zone_tracker(&config);
        Ok(Self {
            updater: Updater::new(list, config, scheduler, viewport),
            identity,
            diagnostics,
            zones,
            callbacks: Callbacks::default(),
        })
    }

    /// Route later ingestion diagnostics to `sink`.
    pub fn set_diagnostics(&mut self, sink: impl DiagnosticSink + 'static) -> &mut Self {
        self.diagnostics = Box::new(sink);
        self
    }

    pub fn on_at_start(&mut self, callback: impl FnMut(TriggerCause) + 'static) -> &mut Self {
        self.callbacks.at_start = Some(Box::new(callback));
        self
    }

    pub fn on_near_start(&mut self, callback: impl FnMut(TriggerCause) + 'static) -> &mut Self {
        self.callbacks.near_start = Some(Box::new(callback));
        self
    }

    pub fn on_near_end(&mut self, callback: impl FnMut(TriggerCause) + 'static) -> &mut Self {
        self.callbacks.near_end = Some(Box::new(callback));
        self
    }

    pub fn on_at_end(&mut self, callback: impl FnMut(TriggerCause) + 'static) -> &mut Self {
        self.callbacks.at_end = Some(Box::new(callback));
        self
    }

    /// Called with every positioning notification, before zone callbacks.
    pub fn on_positioning_update(
        &mut self,
        callback: impl FnMut(&PositionSnapshot<T>) + 'static,
    ) -> &mut Self {
        self.callbacks.positioning = Some(Box::new(callback));
        self
    }

    /// Subscribe to the viewport and run the first render cycle.
    pub fn mount<V, R>(&mut self, viewport: &mut V, renderer: &mut R)
    where
        V: Viewport + ?Sized,
        R: ItemRenderer<T> + ?Sized,
    {
        self.updater.mount(viewport, renderer);
    }

    /// Replace the items. Always produces a new list generation.
    pub fn set_items<V, R>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        viewport: &mut V,
        renderer: &mut R,
    ) where
        V: Viewport + ?Sized,
        R: ItemRenderer<T> + ?Sized,
    {
        if self.updater.is_disposed() {
            return;
        }
        let list = OrderedList::ingest(items, &mut self.identity, &mut *self.diagnostics);
        self.updater.set_list(list, viewport, renderer);
    }

    /// Change the near-start / near-end zone extents.
    ///
    /// Zone state is rebuilt, so zones the viewport is inside fire again with
    /// [`TriggerCause::InitialPosition`] on the next notification.
    pub fn set_proximity_ratios(&mut self, near_start: f64, near_end: f64) -> Result<()> {
        let config = self
            .updater
            .config()
            .clone()
            .with_proximity_ratios(near_start, near_end);
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors).into());
        }
        self.zones = zone_tracker(&config);
        self.updater.set_zone_config(config);
        Ok(())
    }

    pub fn on_scroll(&mut self, now: Instant) {
        self.updater.on_scroll(now);
    }

    pub fn poll_timers(&mut self, now: Instant) {
        self.updater.poll_timers(now);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.updater.next_deadline()
    }

    pub fn on_resize(&mut self) {
        self.updater.on_resize();
    }

    /// A requested frame arrived: update the slice, then notify.
    pub fn on_frame<V, R>(
        &mut self,
        viewport: &mut V,
        renderer: &mut R,
    ) -> Option<PositionSnapshot<T>>
    where
        V: Viewport + ?Sized,
        R: ItemRenderer<T> + ?Sized,
    {
        let snapshot = self.updater.on_frame(viewport, renderer)?;
        if let Some(callback) = self.callbacks.positioning.as_mut() {
            callback(&snapshot);
        }
        let callbacks = &mut self.callbacks;
        self.zones
            .observe_snapshot(&snapshot, |trigger| callbacks.dispatch(trigger));
        Some(snapshot)
    }

    pub fn scroll_to_index<V: Viewport + ?Sized>(
        &mut self,
        index: usize,
        viewport: &mut V,
    ) -> Result<()> {
        self.updater.scroll_to_index(index, viewport)
    }

    pub fn current_slice(&self) -> &[Item<T>] {
        self.updater.current_slice()
    }

    pub fn updater(&self) -> &Updater<T, F> {
        &self.updater
    }

    pub fn zones(&self) -> &ScrollZoneTracker {
        &self.zones
    }

    /// Stop the engine and drop every callback.
    pub fn dispose(&mut self) {
        self.updater.dispose();
        self.callbacks = Callbacks::default();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::testing::{ManualFrames, SimViewport, StaticHeightRenderer};
    use vscroll_core::diagnostics::Diagnostic;
    use vscroll_layout::SliceBounds;

    #[derive(Debug, Clone)]
    struct Row {
        key: u32,
    }

    fn rows(keys: impl IntoIterator<Item = u32>) -> Vec<Row> {
        keys.into_iter().map(|key| Row { key }).collect()
    }

    fn scroller(
        keys: impl IntoIterator<Item = u32>,
        viewport: &SimViewport,
    ) -> VirtualScroller<Row, ManualFrames> {
        VirtualScroller::new(
            rows(keys),
            |row: &Row| ItemId::from(row.key),
            ScrollerConfig::default().with_assumed_item_height(100.0),
            ManualFrames::new(),
            viewport,
        )
        .unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let viewport = SimViewport::new(100.0);
        let err = VirtualScroller::new(
            rows(0..3),
            |row: &Row| ItemId::from(row.key),
            ScrollerConfig::default().with_assumed_item_height(0.0),
            ManualFrames::new(),
            &viewport,
        )
        .unwrap_err();
        assert!(err.to_string().contains("assumed_item_height"));
    }

    #[test]
    fn duplicates_are_dropped() {
        let viewport = SimViewport::new(100.0);
        let s = scroller([1, 2, 1], &viewport);
        assert_eq!(s.updater().list().len(), 2);
    }

    #[test]
    fn set_items_reports_duplicates_to_sink() {
        let mut viewport = SimViewport::new(350.0);
        let mut renderer = StaticHeightRenderer::uniform(100.0);
        let mut s = scroller(0..5, &viewport);
        s.mount(&mut viewport, &mut renderer);

        let seen = Rc::new(RefCell::new(Vec::new()));
        s.set_diagnostics(SharedSink(Rc::clone(&seen)));
        s.set_items(rows([7, 8, 7, 9]), &mut viewport, &mut renderer);

        assert_eq!(s.updater().list().len(), 3);
        assert_eq!(
            seen.borrow().as_slice(),
            &[Diagnostic::DuplicateIdentity {
                id: ItemId::Int(7),
                index: 2
            }]
        );
    }

    struct SharedSink(Rc<RefCell<Vec<Diagnostic>>>);

    impl DiagnosticSink for SharedSink {
        fn report(&mut self, diagnostic: Diagnostic) {
            self.0.borrow_mut().push(diagnostic);
        }
    }

    #[test]
    fn zone_callbacks_fire_on_notification() {
        let mut viewport = SimViewport::new(350.0);
        let mut renderer = StaticHeightRenderer::uniform(100.0);
        let mut s = scroller(0..50, &viewport);

        let fired: Rc<RefCell<Vec<(ZoneKind, TriggerCause)>>> = Rc::default();
        let log = Rc::clone(&fired);
        s.on_at_start(move |cause| log.borrow_mut().push((ZoneKind::AtStart, cause)));
        let log = Rc::clone(&fired);
        s.on_near_start(move |cause| log.borrow_mut().push((ZoneKind::NearStart, cause)));
        let log = Rc::clone(&fired);
        s.on_at_end(move |cause| log.borrow_mut().push((ZoneKind::AtEnd, cause)));
        let updates = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&updates);
        s.on_positioning_update(move |_| *counter.borrow_mut() += 1);

        s.mount(&mut viewport, &mut renderer);
        s.on_frame(&mut viewport, &mut renderer);
        assert_eq!(
            fired.borrow().as_slice(),
            &[
                (ZoneKind::AtStart, TriggerCause::InitialPosition),
                (ZoneKind::NearStart, TriggerCause::InitialPosition)
            ]
        );
        assert_eq!(*updates.borrow(), 1);

        // Jump to the bottom: list is 5000 tall, viewport bottom at 5000.
        fired.borrow_mut().clear();
        viewport.set_scroll_offset(4650.0);
        s.on_scroll(Instant::now());
        s.on_frame(&mut viewport, &mut renderer);
        assert_eq!(
            fired.borrow().as_slice(),
            &[(ZoneKind::AtEnd, TriggerCause::Movement)]
        );
    }

    #[test]
    fn zones_fire_when_scroll_keeps_the_slice() {
        // Five rows fit inside the render window at any offset: [0, 5) never moves.
        let mut viewport = SimViewport::new(300.0);
        let mut renderer = StaticHeightRenderer::uniform(100.0);
        let mut s = scroller(0..5, &viewport);

        let fired: Rc<RefCell<Vec<(ZoneKind, TriggerCause)>>> = Rc::default();
        let log = Rc::clone(&fired);
        s.on_at_end(move |cause| log.borrow_mut().push((ZoneKind::AtEnd, cause)));
        let updates = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&updates);
        s.on_positioning_update(move |_| *counter.borrow_mut() += 1);

        s.mount(&mut viewport, &mut renderer);
        s.on_frame(&mut viewport, &mut renderer);
        assert_eq!(s.updater().bounds(), SliceBounds::new(0, 5));
        assert!(fired.borrow().is_empty());
        let cycles = s.updater().stats().render_cycles;
        let before = *updates.borrow();

        viewport.set_scroll_offset(200.0);
        s.on_scroll(Instant::now());
        let snapshot = s.on_frame(&mut viewport, &mut renderer);

        assert!(snapshot.is_some());
        assert_eq!(s.updater().bounds(), SliceBounds::new(0, 5));
        assert_eq!(s.updater().stats().render_cycles, cycles);
        assert_eq!(*updates.borrow(), before + 1);
        assert_eq!(
            fired.borrow().as_slice(),
            &[(ZoneKind::AtEnd, TriggerCause::Movement)]
        );
    }

    #[test]
    fn set_proximity_ratios_rebuilds_zone_state() {
        let mut viewport = SimViewport::new(350.0);
        let mut renderer = StaticHeightRenderer::uniform(100.0);
        let mut s = scroller(0..50, &viewport);
        s.mount(&mut viewport, &mut renderer);
        s.on_frame(&mut viewport, &mut renderer);
        assert_eq!(
            s.zones().proximity(ZoneKind::AtStart),
            Some(vscroll_layout::Proximity::Inside)
        );

        s.set_proximity_ratios(0.5, 2.0).unwrap();
        assert_eq!(
            s.zones().proximity(ZoneKind::AtStart),
            Some(vscroll_layout::Proximity::Unknown)
        );
        assert_eq!(s.updater().config().near_start_proximity_ratio, 0.5);
        assert_eq!(s.updater().config().near_end_proximity_ratio, 2.0);

        assert!(s.set_proximity_ratios(-1.0, 2.0).is_err());
        assert_eq!(s.updater().config().near_start_proximity_ratio, 0.5);
    }

    #[test]
    fn dispose_drops_callbacks() {
        let mut viewport = SimViewport::new(350.0);
        let mut renderer = StaticHeightRenderer::uniform(100.0);
        let mut s = scroller(0..5, &viewport);
        let fired = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&fired);
        s.on_at_start(move |_| *counter.borrow_mut() += 1);
        s.mount(&mut viewport, &mut renderer);
        s.dispose();
        assert!(s.on_frame(&mut viewport, &mut renderer).is_none());
        s.set_items(rows(0..3), &mut viewport, &mut renderer);
        assert_eq!(*fired.borrow(), 0);
        assert_eq!(s.updater().list().len(), 5);
        assert_eq!(Rc::strong_count(&fired), 1);
    }
}
