//! bunch-core - Rule engine for typed Bundle accessors
//!
//! This crate turns annotated template classes into generated accessor types:
//! - [`Resolver`] builds a [`TemplateType`] from a [`TemplateManifest`] entry
//! - [`classify()`] picks a [`StorageStrategy`] for each member
//! - [`Naming`] applies the override-over-convention naming rules
//! - [`synthesize_member`] and [`assemble()`] produce a [`GeneratedType`]
//! - [`generate_manifest`] runs the whole pipeline with per-template isolation

pub mod assemble;
pub mod classify;
mod config;
pub mod engine;
mod error;
pub mod model;
pub mod naming;
pub mod resolve;
pub mod schema;
pub mod synth;
pub mod types;

pub use assemble::{GeneratedType, Helper, MemberSummary, assemble};
pub use classify::{DirectKind, GetterClass, StorageStrategy, classify, classify_member};
pub use config::GeneratorConfig;
pub use engine::{Generation, generate, generate_manifest};
pub use error::{GenerationError, GenerationResult};
pub use model::{Member, MemberScope, TemplateType, Visibility};
pub use naming::Naming;
pub use resolve::Resolver;
pub use schema::TemplateManifest;
pub use synth::{Body, DefaultCall, Fallback, GeneratedMethod, Param, Returns, synthesize_member};
pub use types::{ClassTable, TypeDescriptor};

/// Log levels accepted on the command line
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        GeneratedType, GenerationError, GenerationResult, GeneratorConfig, LogLevel,
        StorageStrategy, TemplateManifest, TemplateType, generate, generate_manifest,
    };
}
