//! Faults raised while executing generated methods

use thiserror::Error;

/// Result type alias for interpreted calls
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Faults a generated accessor can raise, plus interpreter misuse
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// An `OrThrow` getter found no value under the key
    #[error("property not found under key \"{key}\"")]
    PropertyNotFound { key: String },

    /// An assertion chain found an absent key
    #[error("missing key \"{key}\"")]
    MissingKey { key: String },

    /// A write was attempted on the canonical empty bundle
    #[error("the empty bundle cannot be modified")]
    ImmutableContainer,

    #[error("{type_name} has no method {method}")]
    UnknownMethod { type_name: String, method: String },

    #[error("{method}: {reason}")]
    ArgumentMismatch { method: String, reason: String },

    /// A stored or supplied name is not a constant of the enum
    #[error("{type_name} has no constant {constant}")]
    InvalidEnumConstant { type_name: String, constant: String },

    /// A default-backed getter ran without a registered default body
    #[error("no default value registered for {owner}.{function}()")]
    DefaultUnavailable { owner: String, function: String },
}

impl RuntimeError {
    /// True for faults the generated Kotlin code itself can raise
    pub fn is_generated_fault(&self) -> bool {
        matches!(
            self,
            RuntimeError::PropertyNotFound { .. } | RuntimeError::MissingKey { .. }
        )
    }
}
