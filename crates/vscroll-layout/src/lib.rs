#![forbid(unsafe_code)]

//! Windowing math for vertically virtualized lists.
//!
//! Everything in this crate is a synchronous, side-effect free function (or
//! a small value type) over immutable inputs:
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | heights | [`heights`] | identity → last measured height |
//! | stacking | [`collect`] | identity → [`Rectangle`](vscroll_core::geometry::Rectangle) |
//! | windowing | [`slice`] | contiguous [`SliceBounds`] |
//! | list mutation | [`reconcile`] | bounds carried over by identity |
//! | positioning | [`snapshot`] | immutable [`PositionSnapshot`] |
//! | anchoring | [`anchor`] | scroll correction in pixels |
//! | edge events | [`zones`] | edge-triggered [`ZoneTrigger`]s |
//!
//! The runtime crate decides *when* each stage runs; this crate only decides
//! *what* it computes.

pub mod anchor;
pub mod collect;
pub mod heights;
pub mod memo;
pub mod reconcile;
pub mod slice;
pub mod snapshot;
pub mod zones;

pub use anchor::{AnchorCorrection, correction, find_anchor, resolve_anchor};
pub use collect::{RectangleTable, collect};
pub use heights::{HeightChange, HeightTable};
pub use memo::Memo;
pub use reconcile::{Reconciliation, reconcile};
pub use slice::{SliceBounds, default_slice, render_window, select};
pub use snapshot::{PositionSnapshot, SnapshotHistory};
pub use zones::{
    Proximity, ScrollZoneTracker, TriggerCause, Zone, ZoneCondition, ZoneKind, ZoneTrigger,
};
