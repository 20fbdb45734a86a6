//! bunch-runtime - Executable model of generated accessor types
//!
//! This crate provides:
//! - [`Bundle`], a string-keyed container with reference semantics and an
//!   immutable empty singleton
//! - [`BunchClass`] and [`BunchInstance`], which run the methods of a
//!   [`GeneratedType`](bunch_core::GeneratedType) against a bundle
//! - [`RuntimeError`] for the faults generated accessors raise

mod bundle;
mod error;
mod instance;
mod value;

pub use bundle::Bundle;
pub use error::{RuntimeError, RuntimeResult};
pub use instance::{Assertion, BunchClass, BunchInstance, DefaultProvider, Defaults, Returned};
pub use value::{ObjectValue, Value};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Bundle, BunchClass, BunchInstance, Defaults, RuntimeError, Value};
}
