#![forbid(unsafe_code)]

//! Runtime: the windowing engine and its host-facing collaborators.
//!
//! # Role in vscroll
//! `vscroll-runtime` turns the pure layout pipeline into a running scroller.
//! It owns the render-cycle ordering (measure, diff, correct, reschedule),
//! coalesces scroll and resize storms into one slice update per frame, and
//! hands the host a positioning snapshot after each frame.
//!
//! # Primary responsibilities
//! - **Updater**: the engine. Holds the list, measured heights, slice bounds,
//!   snapshot history and frame coalescers.
//! - **VirtualScroller**: facade that ingests raw items, owns an `Updater`
//!   and dispatches edge-zone callbacks.
//! - **Collaborators**: [`Viewport`], [`FrameScheduler`] and
//!   [`ItemRenderer`] traits the host implements.
//! - **Config / errors**: [`ScrollerConfig`] and the [`EngineError`] family.
//!
//! # How it fits in the system
//! The host owns the event loop. It forwards scroll and resize notifications
//! to the scroller, calls [`Updater::on_frame`] when a requested frame
//! arrives, and polls [`Updater::poll_timers`] at
//! [`Updater::next_deadline`] so the trailing scroll edge is never lost.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod render;
pub mod scheduler;
pub mod scroller;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;
pub mod updater;
pub mod viewport;

pub use config::ScrollerConfig;
pub use diagnostics::TracingDiagnostics;
pub use error::{ConfigError, EngineError, Result};
pub use render::{BlankSpace, ItemRenderer, MeasurementReport, RenderPlan};
pub use scheduler::FrameScheduler;
pub use scroller::VirtualScroller;
pub use updater::{Updater, UpdaterStats};
pub use viewport::{Subscription, Viewport, ViewportEvent};

pub use vscroll_core::identity::{Item, ItemId, OrderedList};
pub use vscroll_layout::{PositionSnapshot, SliceBounds, TriggerCause, ZoneKind};
