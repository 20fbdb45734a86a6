//! Generator configuration

use serde::{Deserialize, Serialize};

/// Output settings read from the `[generator]` table of a template manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Spaces per indentation level in generated sources
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Appended to the output type name to build the file stem
    ///
    /// An empty suffix writes `Vegetables.kt`; `"_Bunch"` writes `Vegetables_Bunch.kt`.
    #[serde(default)]
    pub file_suffix: String,

    /// Emit the "generated, do not edit" header comment
    #[serde(default = "default_emit_header")]
    pub emit_header: bool,
}

fn default_indent() -> usize {
    4
}

fn default_emit_header() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            file_suffix: String::new(),
            emit_header: default_emit_header(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// One indentation level
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent)
    }

    /// File name for a generated type
    pub fn file_name(&self, output_name: &str) -> String {
        format!("{output_name}{}.kt", self.file_suffix)
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
