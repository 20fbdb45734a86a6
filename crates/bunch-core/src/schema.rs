//! Template manifest (`bunch.toml`) structure

use crate::config::GeneratorConfig;
use crate::error::GenerationResult;
use crate::model::{MemberScope, Visibility};
use crate::types::{ClassInfo, ClassTable};
use serde::{Deserialize, Serialize};

/// bunch.toml manifest structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateManifest {
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// User classes referenced by template return types
    #[serde(default, rename = "class")]
    pub classes: Vec<ClassInfo>,

    #[serde(default, rename = "template")]
    pub templates: Vec<TemplateDecl>,
}

/// One template class as the compiler would see it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDecl {
    /// Qualified name of the template class
    pub class: String,

    #[serde(default)]
    pub visibility: Visibility,

    /// Type-level generation annotation
    #[serde(default)]
    pub bunch: Option<BunchAnnotation>,

    #[serde(default, rename = "function")]
    pub functions: Vec<FunctionDecl>,
}

/// Type-level annotation: `@Bunch(name, setters, getters)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BunchAnnotation {
    pub name: String,

    #[serde(default)]
    pub setters: Vec<String>,

    #[serde(default)]
    pub getters: Vec<String>,
}

/// A function declared on the template class or its companion object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,

    /// Return type as written in Kotlin source
    pub returns: String,

    #[serde(default)]
    pub scope: MemberScope,

    /// Unset means abstract in class scope and concrete in companion scope
    #[serde(default, rename = "abstract")]
    pub is_abstract: Option<bool>,

    /// Member-level annotation; functions without it are not members
    #[serde(default)]
    pub item: Option<ItemAnnotation>,
}

impl FunctionDecl {
    /// Whether the function is abstract once the scope default is applied
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
            .unwrap_or(self.scope == MemberScope::Class)
    }
}

/// Member-level annotation: `@BunchItem(name, tag, setters, getters)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemAnnotation {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub tag: String,

    #[serde(default)]
    pub setters: Vec<String>,

    #[serde(default)]
    pub getters: Vec<String>,
}

impl TemplateManifest {
    /// Parse manifest from string
    pub fn from_str(content: &str) -> GenerationResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Platform classes plus every class this manifest declares
    pub fn class_table(&self) -> ClassTable {
        let mut table = ClassTable::with_builtins();
        for class in &self.classes {
            table.declare(class.clone());
        }
        table
    }
}
