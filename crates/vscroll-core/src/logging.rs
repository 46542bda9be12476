#![forbid(unsafe_code)]

//! Logging facade.
//!
//! Re-exports the `tracing` macros so downstream crates can log through
//! `vscroll_core` without naming `tracing` directly. Call sites gate on the
//! `tracing` feature; with it disabled nothing is compiled in.

pub use tracing::{debug, debug_span, error, info, trace, trace_span, warn};
