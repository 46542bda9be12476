#![forbid(unsafe_code)]

//! Edge-triggered proximity zones ("near start", "at end", ...).
//!
//! Infinite-scroll style UIs want to hear about the list edges *once* per
//! approach, not on every frame spent near them. Each tracked [`Zone`] runs a
//! tiny state machine over [`Proximity`]:
//!
//! | previous | next | list length | trigger |
//! |----------|------|-------------|---------|
//! | Unknown | Inside | any | [`TriggerCause::InitialPosition`] |
//! | Outside | Inside | any | [`TriggerCause::Movement`] |
//! | Inside | Inside | changed | [`TriggerCause::ListUpdate`] |
//! | anything else | | | none |
//!
//! The `ListUpdate` row is what makes "load more" work: appending rows while
//! the user sits at the bottom re-fires the end zone even though proximity
//! never changed.

use std::fmt;

use serde::{Deserialize, Serialize};
use vscroll_core::geometry::Rectangle;

use crate::snapshot::PositionSnapshot;

/// Where the viewport sits relative to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proximity {
    /// No snapshot evaluated yet.
    #[default]
    Unknown,
    Inside,
    Outside,
}

/// Why a zone callback fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerCause {
    /// The first evaluated position already lies inside the zone.
    #[serde(rename = "init")]
    InitialPosition,
    /// Scrolling or resizing moved the viewport into the zone.
    Movement,
    /// The list length changed while the viewport stayed inside the zone.
    ListUpdate,
}

impl TriggerCause {
    /// Short stable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InitialPosition => "init",
            Self::Movement => "movement",
            Self::ListUpdate => "list-update",
        }
    }
}

impl fmt::Display for TriggerCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pure predicate over `(list_rect, viewport_rect)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneCondition {
    /// `viewport.top - list.top <= distance`
    NearTop(f64),
    /// `list.bottom - viewport.bottom <= distance`
    NearBottom(f64),
    /// `NearTop(ratio * viewport.height)`
    NearTopRatio(f64),
    /// `NearBottom(ratio * viewport.height)`
    NearBottomRatio(f64),
}

impl ZoneCondition {
    /// Evaluate the predicate.
    pub fn holds(&self, list: Rectangle, viewport: Rectangle) -> bool {
        match *self {
            Self::NearTop(distance) => viewport.top - list.top <= distance,
            Self::NearBottom(distance) => list.bottom() - viewport.bottom() <= distance,
            Self::NearTopRatio(ratio) => viewport.top - list.top <= ratio * viewport.height,
            Self::NearBottomRatio(ratio) => {
                list.bottom() - viewport.bottom() <= ratio * viewport.height
            }
        }
    }
}

/// Which of the standard edge zones fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    AtStart,
    NearStart,
    NearEnd,
    AtEnd,
}

/// A named condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub kind: ZoneKind,
    pub condition: ZoneCondition,
}

impl Zone {
    /// Create a zone.
    pub const fn new(kind: ZoneKind, condition: ZoneCondition) -> Self {
        Self { kind, condition }
    }
}

/// One edge-triggered notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneTrigger {
    pub zone: ZoneKind,
    pub cause: TriggerCause,
}

#[derive(Debug, Clone, Copy, Default)]
struct ZoneState {
    proximity: Proximity,
    list_len: usize,
}

fn classify(prev: ZoneState, next: ZoneState) -> Option<TriggerCause> {
    match (prev.proximity, next.proximity) {
        (Proximity::Unknown, Proximity::Inside) => Some(TriggerCause::InitialPosition),
        (Proximity::Outside, Proximity::Inside) => Some(TriggerCause::Movement),
        (Proximity::Inside, Proximity::Inside) if prev.list_len != next.list_len => {
            Some(TriggerCause::ListUpdate)
        }
        _ => None,
    }
}

/// Tracks several zones, each with its own state, in a fixed order.
#[derive(Debug, Clone, Default)]
pub struct ScrollZoneTracker {
    zones: Vec<(Zone, ZoneState)>,
}

impl ScrollZoneTracker {
    /// Track `zones`, evaluated in iteration order.
    pub fn new(zones: impl IntoIterator<Item = Zone>) -> Self {
        Self {
            zones: zones
                .into_iter()
                .map(|zone| (zone, ZoneState::default()))
                .collect(),
        }
    }

    /// The four standard zones: at-start and at-end within `edge_distance`
    /// pixels, near-start and near-end within the given viewport ratios.
    pub fn standard(edge_distance: f64, near_start_ratio: f64, near_end_ratio: f64) -> Self {
        Self::new([
            Zone::new(ZoneKind::AtStart, ZoneCondition::NearTop(edge_distance)),
            Zone::new(
                ZoneKind::NearStart,
                ZoneCondition::NearTopRatio(near_start_ratio),
            ),
            Zone::new(
                ZoneKind::NearEnd,
                ZoneCondition::NearBottomRatio(near_end_ratio),
            ),
            Zone::new(ZoneKind::AtEnd, ZoneCondition::NearBottom(edge_distance)),
        ])
    }

    /// Evaluate every zone against one position, calling `emit` for each
    /// trigger in zone order.
    pub fn observe(
        &mut self,
        list_rect: Rectangle,
        viewport_rect: Rectangle,
        list_len: usize,
        mut emit: impl FnMut(ZoneTrigger),
    ) {
        for (zone, state) in &mut self.zones {
            let proximity = if zone.condition.holds(list_rect, viewport_rect) {
                Proximity::Inside
            } else {
                Proximity::Outside
            };
            let next = ZoneState {
                proximity,
                list_len,
            };
            let cause = classify(*state, next);
            *state = next;
            if let Some(cause) = cause {
                emit(ZoneTrigger {
                    zone: zone.kind,
                    cause,
                });
            }
        }
    }

    /// [`observe`](Self::observe) a positioning snapshot.
    pub fn observe_snapshot<T>(
        &mut self,
        snapshot: &PositionSnapshot<T>,
        emit: impl FnMut(ZoneTrigger),
    ) {
        self.observe(
            snapshot.list_rect(),
            snapshot.viewport_rect(),
            snapshot.list().len(),
            emit,
        );
    }

    /// Convenience: collect triggers into a `Vec`.
    pub fn observe_collect(
        &mut self,
        list_rect: Rectangle,
        viewport_rect: Rectangle,
        list_len: usize,
    ) -> Vec<ZoneTrigger> {
        let mut out = Vec::new();
        self.observe(list_rect, viewport_rect, list_len, |t| out.push(t));
        out
    }

    /// Current proximity of the first zone of `kind`.
    pub fn proximity(&self, kind: ZoneKind) -> Option<Proximity> {
        self.zones
            .iter()
            .find(|(zone, _)| zone.kind == kind)
            .map(|(_, state)| state.proximity)
    }

    /// Forget all state; every zone returns to `Unknown`.
    pub fn reset(&mut self) {
        for (_, state) in &mut self.zones {
            *state = ZoneState::default();
        }
    }

    /// Tracked zones in evaluation order.
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter().map(|(zone, _)| zone)
    }
}
