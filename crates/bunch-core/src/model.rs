//! Resolved templates and their members.

use crate::types::TypeDescriptor;
use serde::{Deserialize, Serialize};

/// Visibility of the template, copied onto the generated type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
}

/// Where a template function is declared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberScope {
    /// Declared in the class body
    #[default]
    Class,
    /// Declared in the companion object
    Companion,
}

/// A user template, fully resolved and ready for synthesis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateType {
    /// Qualified name of the template class
    pub class_name: String,

    /// Simple name of the generated type
    pub output_name: String,

    pub visibility: Visibility,

    /// Type-level default setter prefixes, empty means convention
    pub setter_prefixes: Vec<String>,

    /// Type-level default getter prefixes, empty means convention
    pub getter_prefixes: Vec<String>,

    /// Annotated members in declaration order
    pub members: Vec<Member>,
}

impl TemplateType {
    /// Package shared by the template and the generated type
    pub fn package(&self) -> &str {
        self.class_name
            .rsplit_once('.')
            .map(|(pkg, _)| pkg)
            .unwrap_or("")
    }

    /// Simple name of the template class
    pub fn simple_name(&self) -> &str {
        self.class_name
            .rsplit_once('.')
            .map(|(_, name)| name)
            .unwrap_or(&self.class_name)
    }

    /// Qualified name of the generated type
    pub fn output_qualified_name(&self) -> String {
        match self.package() {
            "" => self.output_name.clone(),
            pkg => format!("{pkg}.{}", self.output_name),
        }
    }
}

/// One annotated function of a template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    /// The function's own name
    pub declared_name: String,

    /// The function's return type
    pub declared_type: TypeDescriptor,

    /// True if the function has a body producing a default value
    pub has_default_body: bool,

    pub scope: MemberScope,

    /// `name` of the item annotation, empty means unset
    pub override_name: String,

    /// `tag` of the item annotation, empty means unset
    pub override_key: String,

    /// `setters` of the item annotation, empty means unset
    pub setter_prefixes: Vec<String>,

    /// `getters` of the item annotation, empty means unset
    pub getter_prefixes: Vec<String>,
}

impl Member {
    /// An abstract class-scope member with no annotation parameters
    pub fn new(declared_name: impl Into<String>, declared_type: TypeDescriptor) -> Self {
        Self {
            declared_name: declared_name.into(),
            declared_type,
            has_default_body: false,
            scope: MemberScope::Class,
            override_name: String::new(),
            override_key: String::new(),
            setter_prefixes: Vec::new(),
            getter_prefixes: Vec::new(),
        }
    }
}
