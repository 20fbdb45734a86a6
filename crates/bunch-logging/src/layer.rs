//! Tracing layer that records diagnostics into a [`DiagnosticSink`]

use crate::sink::{Diagnostic, DiagnosticSink};
use bunch_core::LogLevel;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that keeps warning and error events for the run summary
pub struct DiagnosticLayer {
    sink: &'static DiagnosticSink,
}

impl DiagnosticLayer {
    /// Create a layer recording into the global sink
    pub fn new() -> Self {
        Self {
            sink: DiagnosticSink::global(),
        }
    }

    /// Create a layer with a specific sink
    pub fn with_sink(sink: &'static DiagnosticSink) -> Self {
        Self { sink }
    }

    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for DiagnosticLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for DiagnosticLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());

        if !self.sink.is_enabled(level) {
            return;
        }

        let mut visitor = DiagnosticVisitor::default();
        event.record(&mut visitor);

        self.sink.record(Diagnostic {
            level,
            target: metadata.target().to_string(),
            message: visitor.message.unwrap_or_default(),
            template: visitor.template,
            member: visitor.member,
        });
    }
}

/// Pulls the message and the template/member location out of an event
#[derive(Default)]
struct DiagnosticVisitor {
    message: Option<String>,
    template: Option<String>,
    member: Option<String>,
}

impl DiagnosticVisitor {
    fn store(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            "template" => self.template = Some(value),
            "member" => self.member = Some(value),
            _ => {}
        }
    }
}

impl Visit for DiagnosticVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.store(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.store(field, value.to_string());
    }
}

/// Build the filter for `level`, letting `RUST_LOG` override it
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Initialize logging: human-readable output on stderr plus the diagnostic sink
///
/// Call once at startup. A second call leaves the first subscriber in place.
pub fn init_logging(level: LogLevel) {
    use std::io::IsTerminal;
    use tracing_subscriber::prelude::*;

    let subscriber = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .with(DiagnosticLayer::new());

    // Ignore the error if a global subscriber is already set
    let _ = tracing::subscriber::set_global_default(subscriber);
}
