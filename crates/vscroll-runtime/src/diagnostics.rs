#![forbid(unsafe_code)]

//! Default diagnostic sink: structured `tracing` warnings.

use vscroll_core::diagnostics::{Diagnostic, DiagnosticSink};

/// Logs each [`Diagnostic`] as a `warn` event with a `kind` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(kind = diagnostic.kind(), "{diagnostic}");
    }
}
