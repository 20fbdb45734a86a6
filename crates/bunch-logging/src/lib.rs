//! bunch-logging - Tracing setup for the bunch generator
//!
//! This crate provides:
//! - [`init_logging`] to install a stderr formatter filtered by [`LogLevel`]
//! - [`DiagnosticLayer`] tracing layer that records warnings and errors
//! - [`DiagnosticSink`] holding those records for the end-of-run summary

mod layer;
mod sink;

pub use bunch_core::LogLevel;
pub use layer::{DiagnosticLayer, env_filter, init_logging};
pub use sink::{Diagnostic, DiagnosticSink};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Diagnostic, DiagnosticLayer, DiagnosticSink, LogLevel, init_logging};
}
