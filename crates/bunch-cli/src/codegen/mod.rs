//! Code generation from synthesized types.
//!
//! The core crate produces one [`bunch_core::GeneratedType`] per template.
//! This module turns it into Kotlin source:
//!
//! ```text
//! bunch.toml
//!     ↓
//!  [Resolver → Classifier → Synthesizer → Assembler]   (bunch-core)
//!     ↓
//!  GeneratedType
//!     ↓
//!  [Kotlin renderer] → <package dirs>/<Name>.kt
//! ```
//!
//! # See Also
//!
//! - [`kotlin`] module for the renderer
//! - [`kotlin_types`] module for type names and imports

pub mod kotlin;
pub mod kotlin_types;

pub use kotlin::{generate_kotlin, render_kotlin};
