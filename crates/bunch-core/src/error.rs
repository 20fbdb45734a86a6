//! Error types for template generation

use thiserror::Error;

/// Result type alias for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Error raised while turning a template into a generated type.
///
/// Every variant except [`GenerationError::Manifest`] is scoped to one
/// template, so a failure never aborts the other templates of a run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// The template or one of its members could not be resolved
    #[error("{template}{}: {reason}", member_suffix(.member))]
    Resolution {
        template: String,
        member: Option<String>,
        reason: String,
    },

    /// A member's declared type matches no storage strategy
    #[error("{template}.{member}: type {type_name} is not supported")]
    UnsupportedType {
        template: String,
        member: String,
        type_name: String,
    },

    /// Two members resolve to the same storage key
    #[error("{template}.{second}: key \"{key}\" is already used by {first}")]
    DuplicateKey {
        template: String,
        key: String,
        first: String,
        second: String,
    },

    /// A default body cannot be invoked from the generated type
    #[error("{template}.{member}: default value must be declared in the companion object")]
    DefaultNotReachable { template: String, member: String },

    /// Two templates claim the same generated type
    #[error("{template}: output type {output} is already generated by {previous}")]
    DuplicateOutput {
        template: String,
        output: String,
        previous: String,
    },

    /// The template manifest could not be parsed
    #[error("manifest error: {0}")]
    Manifest(String),
}

fn member_suffix(member: &Option<String>) -> String {
    member.as_ref().map(|m| format!(".{m}")).unwrap_or_default()
}

impl GenerationError {
    /// Create a resolution error for a whole template
    pub fn template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        GenerationError::Resolution {
            template: template.into(),
            member: None,
            reason: reason.into(),
        }
    }

    /// Create a resolution error for one member
    pub fn member(
        template: impl Into<String>,
        member: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        GenerationError::Resolution {
            template: template.into(),
            member: Some(member.into()),
            reason: reason.into(),
        }
    }

    /// Short, stable name of the error kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Resolution { .. } => "resolution",
            GenerationError::UnsupportedType { .. } => "unsupported-type",
            GenerationError::DuplicateKey { .. } => "duplicate-key",
            GenerationError::DefaultNotReachable { .. } => "default-not-reachable",
            GenerationError::DuplicateOutput { .. } => "duplicate-output",
            GenerationError::Manifest(_) => "manifest",
        }
    }

    /// The template this error is attached to, if any
    pub fn template_name(&self) -> Option<&str> {
        match self {
            GenerationError::Resolution { template, .. }
            | GenerationError::UnsupportedType { template, .. }
            | GenerationError::DuplicateKey { template, .. }
            | GenerationError::DefaultNotReachable { template, .. }
            | GenerationError::DuplicateOutput { template, .. } => Some(template),
            GenerationError::Manifest(_) => None,
        }
    }

    /// The member this error is attached to, if any
    pub fn member_name(&self) -> Option<&str> {
        match self {
            GenerationError::Resolution { member, .. } => member.as_deref(),
            GenerationError::UnsupportedType { member, .. }
            | GenerationError::DefaultNotReachable { member, .. } => Some(member),
            GenerationError::DuplicateKey { second, .. } => Some(second),
            GenerationError::DuplicateOutput { .. } | GenerationError::Manifest(_) => None,
        }
    }
}

impl From<toml::de::Error> for GenerationError {
    fn from(err: toml::de::Error) -> Self {
        GenerationError::Manifest(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
