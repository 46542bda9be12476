#![forbid(unsafe_code)]

//! Core: geometry, item identity, diagnostics, and frame-tick coalescing.
//!
//! # Role in vscroll
//! `vscroll-core` holds the leaf types every other layer speaks in. It owns
//! the vertical [`Rectangle`](geometry::Rectangle), the identity-checked
//! [`OrderedList`](identity::OrderedList), the diagnostic events emitted when
//! input is degraded, and the small schedulers that keep event storms from
//! turning into redundant work.
//!
//! # Primary responsibilities
//! - **Rectangle**: immutable `{top, height}` extent with overlap and
//!   containment queries.
//! - **OrderedList**: reference-counted item sequence with a generation token
//!   used for memoization by identity.
//! - **Diagnostics**: structured events (duplicate identity, bad measurement)
//!   routed through a [`DiagnosticSink`](diagnostics::DiagnosticSink).
//! - **Coalescing**: [`FrameCoalescer`](frame_coalescer::FrameCoalescer) and
//!   [`ScrollThrottle`](throttle::ScrollThrottle).
//!
//! # How it fits in the system
//! `vscroll-layout` computes rectangles, slices and anchors from these types;
//! `vscroll-runtime` wires them to a viewport, a renderer and a frame clock.

pub mod diagnostics;
pub mod frame_coalescer;
pub mod geometry;
pub mod identity;
pub mod throttle;

#[cfg(feature = "tracing")]
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, trace_span, warn};
