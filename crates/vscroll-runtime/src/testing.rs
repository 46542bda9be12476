#![forbid(unsafe_code)]

//! Deterministic collaborators for driving the engine without a host.
//!
//! - [`SimViewport`]: a scroll surface with an explicit scroll offset that
//!   records every programmatic scroll.
//! - [`ManualFrames`]: a frame clock that only counts requests; the test
//!   decides when frames arrive.
//! - [`StaticHeightRenderer`]: "mounts" items by reporting a fixed height per
//!   identity and remembers each plan it received.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use vscroll_core::geometry::Rectangle;
use vscroll_core::identity::ItemId;

use crate::render::{BlankSpace, ItemRenderer, MeasurementReport, RenderPlan};
use crate::scheduler::FrameScheduler;
use crate::viewport::{Subscription, Viewport, ViewportEvent};

/// A programmatic scroll issued through [`Viewport`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollCall {
    By(f64),
    To(f64),
}

/// In-memory scroll surface.
#[derive(Debug)]
pub struct SimViewport {
    scroll_offset: f64,
    height: f64,
    offset_top: f64,
    calls: Vec<ScrollCall>,
    subscribers: Rc<Cell<usize>>,
}

impl SimViewport {
    /// Viewport of `height` pixels at scroll offset 0.
    #[must_use]
    pub fn new(height: f64) -> Self {
        Self {
            scroll_offset: 0.0,
            height,
            offset_top: 0.0,
            calls: Vec::new(),
            subscribers: Rc::new(Cell::new(0)),
        }
    }

    /// Place the list container `offset_top` pixels below the scroll origin.
    #[must_use]
    pub fn with_offset_top(mut self, offset_top: f64) -> Self {
        self.offset_top = offset_top;
        self
    }

    /// User scroll: moves without recording a programmatic call.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    /// Programmatic scrolls, oldest first.
    pub fn calls(&self) -> &[ScrollCall] {
        &self.calls
    }

    /// Live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.get()
    }
}

impl Viewport for SimViewport {
    fn rect(&self) -> Rectangle {
        Rectangle::new(self.scroll_offset - self.offset_top, self.height)
    }

    fn offset_top(&self) -> f64 {
        self.offset_top
    }

    fn scroll_by(&mut self, delta: f64) {
        self.calls.push(ScrollCall::By(delta));
        self.scroll_offset += delta;
    }

    fn scroll_to(&mut self, offset: f64) {
        self.calls.push(ScrollCall::To(offset));
        self.scroll_offset = offset;
    }

    fn subscribe(&mut self, event: ViewportEvent) -> Subscription {
        self.subscribers.set(self.subscribers.get() + 1);
        let subscribers = Rc::clone(&self.subscribers);
        Subscription::new(event, move || {
            subscribers.set(subscribers.get().saturating_sub(1));
        })
    }
}

/// Frame clock driven by the test.
#[derive(Debug, Clone, Default)]
pub struct ManualFrames {
    requested: u64,
}

impl ManualFrames {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `request_frame` calls so far.
    pub fn requested(&self) -> u64 {
        self.requested
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) {
        self.requested += 1;
    }
}

/// What a [`StaticHeightRenderer`] was asked to mount.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPlan {
    pub start_index: usize,
    pub ids: Vec<ItemId>,
    pub blank_space: BlankSpace,
}

/// Reports a fixed height per identity, with a uniform fallback.
#[derive(Debug, Clone)]
pub struct StaticHeightRenderer {
    default_height: f64,
    overrides: HashMap<ItemId, f64>,
    plans: Vec<RenderedPlan>,
}

impl StaticHeightRenderer {
    /// Every item measures `height`.
    #[must_use]
    pub fn uniform(height: f64) -> Self {
        Self {
            default_height: height,
            overrides: HashMap::new(),
            plans: Vec::new(),
        }
    }

    /// From now on, `id` measures `height`.
    pub fn set_height(&mut self, id: ItemId, height: f64) {
        self.overrides.insert(id, height);
    }

    pub fn height_of(&self, id: &ItemId) -> f64 {
        self.overrides
            .get(id)
            .copied()
            .unwrap_or(self.default_height)
    }

    /// Every plan received, oldest first.
    pub fn plans(&self) -> &[RenderedPlan] {
        &self.plans
    }

    pub fn last_plan(&self) -> Option<&RenderedPlan> {
        self.plans.last()
    }
}

impl<T> ItemRenderer<T> for StaticHeightRenderer {
    fn render(&mut self, plan: &RenderPlan<'_, T>, report: &mut MeasurementReport) {
        let ids: Vec<ItemId> = plan.items.iter().map(|item| item.id.clone()).collect();
        for id in &ids {
            report.report(id.clone(), self.height_of(id));
        }
        self.plans.push(RenderedPlan {
            start_index: plan.start_index,
            ids,
            blank_space: plan.blank_space,
        });
    }
}
