//! Thread-safe collection of warning and error diagnostics

use bunch_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU8, Ordering};

/// One recorded diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: LogLevel,

    /// Module path the event came from
    pub target: String,

    pub message: String,

    /// `template` field of the event, if any
    pub template: Option<String>,

    /// `member` field of the event, if any
    pub member: Option<String>,
}

impl Diagnostic {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            target: target.into(),
            message: message.into(),
            template: None,
            member: None,
        }
    }

    /// `template.member: message`, or as much of it as is known
    pub fn location(&self) -> String {
        match (&self.template, &self.member) {
            (Some(template), Some(member)) if !member.is_empty() => format!("{template}.{member}"),
            (Some(template), _) => template.clone(),
            _ => self.target.clone(),
        }
    }
}

/// Global diagnostic sink
static SINK: OnceCell<DiagnosticSink> = OnceCell::new();

/// Collects diagnostics at or above a threshold level
pub struct DiagnosticSink {
    records: RwLock<Vec<Diagnostic>>,
    level: AtomicU8,
}

impl DiagnosticSink {
    /// Create a sink keeping warnings and errors
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            level: AtomicU8::new(LogLevel::Warn as u8),
        }
    }

    /// Get the global sink instance
    pub fn global() -> &'static DiagnosticSink {
        SINK.get_or_init(DiagnosticSink::new)
    }

    /// Set the threshold level
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Get the threshold level
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    /// Check if a level is recorded
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level()
    }

    /// Record a diagnostic if its level is enabled
    pub fn record(&self, diagnostic: Diagnostic) {
        if !self.is_enabled(diagnostic.level) {
            return;
        }
        self.records.write().push(diagnostic);
    }

    /// Snapshot of every recorded diagnostic, oldest first
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.records.read().clone()
    }

    /// Remove and return every recorded diagnostic
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.records.write())
    }

    /// Number of diagnostics recorded at exactly `level`
    pub fn count(&self, level: LogLevel) -> usize {
        self.records
            .read()
            .iter()
            .filter(|d| d.level == level)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(LogLevel::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(LogLevel::Warn)
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}
