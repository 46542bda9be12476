#![forbid(unsafe_code)]

//! Structured diagnostics for degraded-but-recoverable input.
//!
//! Nothing in the windowing engine fails the render cycle. When input is
//! malformed (a duplicate identity, a nonsensical measurement) the engine
//! repairs it and emits a [`Diagnostic`] through a [`DiagnosticSink`], letting
//! the embedding application decide whether to log, count, or assert on it.

use std::fmt;

use crate::identity::ItemId;

/// A recoverable anomaly observed while ingesting data.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// An identity appeared more than once in an input list. The later
    /// occurrence at `index` (position in the raw input) was discarded.
    DuplicateIdentity { id: ItemId, index: usize },
    /// A renderer reported a negative or non-finite height. The report was
    /// ignored and the previous height (or the assumed height) kept.
    InvalidMeasurement { id: ItemId, height: f64 },
}

impl Diagnostic {
    /// Stable short name, suitable for structured log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateIdentity { .. } => "duplicate_identity",
            Self::InvalidMeasurement { .. } => "invalid_measurement",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateIdentity { id, index } => write!(
                f,
                "duplicate item id \"{id}\" at input position {index}; later item discarded"
            ),
            Self::InvalidMeasurement { id, height } => {
                write!(f, "ignored invalid height {height} reported for item \"{id}\"")
            }
        }
    }
}

/// Receiver for [`Diagnostic`] events.
pub trait DiagnosticSink {
    /// Record one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in memory; handy for tests and batch inspection.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreDiagnostics;

impl DiagnosticSink for IgnoreDiagnostics {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}
