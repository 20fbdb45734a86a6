//! Kotlin type names and import bookkeeping.
//!
//! Types from `kotlin` and `kotlin.collections` are visible without an
//! import, as are types from the generated file's own package. Everything
//! else is imported once. When two types share a simple name, the first one
//! registered keeps it and the other is written fully qualified.
//!
//! | Descriptor | Kotlin |
//! |------------|--------|
//! | `kotlin.Int` | `Int` |
//! | `kotlin.Array<kotlin.String>` | `Array<String>` |
//! | `kotlin.collections.List<com.example.Child>` | `List<Child>` |
//! | `android.os.Bundle` | `Bundle` + `import android.os.Bundle` |

use bunch_core::TypeDescriptor;
use std::collections::BTreeMap;

const IMPLICIT_PACKAGES: &[&str] = &["kotlin", "kotlin.collections"];

/// Imports of one generated file
#[derive(Debug, Clone, PartialEq)]
pub struct Imports {
    package: String,
    /// Simple name to the qualified name that owns it
    owners: BTreeMap<String, String>,
}

impl Imports {
    /// Start an import set for a file in `package`
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            owners: BTreeMap::new(),
        }
    }

    /// Register a qualified class name
    pub fn add_name(&mut self, qualified: &str) {
        self.owners
            .entry(simple_name(qualified).to_string())
            .or_insert_with(|| qualified.to_string());
    }

    /// Register a type and all of its type arguments
    pub fn add(&mut self, ty: &TypeDescriptor) {
        ty.walk(&mut |t| self.add_name(&t.name));
    }

    /// Kotlin source text for a type
    pub fn type_name(&self, ty: &TypeDescriptor) -> String {
        let mut name = self.class_name(&ty.name);
        if !ty.arguments.is_empty() {
            let arguments: Vec<String> = ty.arguments.iter().map(|a| self.type_name(a)).collect();
            name.push('<');
            name.push_str(&arguments.join(", "));
            name.push('>');
        }
        name
    }

    /// Kotlin source text for a class name without type arguments
    pub fn class_name(&self, qualified: &str) -> String {
        let simple = simple_name(qualified);
        match self.owners.get(simple) {
            Some(owner) if owner == qualified => simple.to_string(),
            None if self.is_visible(qualified) => simple.to_string(),
            _ => qualified.to_string(),
        }
    }

    /// `import` lines, sorted by qualified name
    pub fn lines(&self) -> Vec<String> {
        let mut names: Vec<&String> = self
            .owners
            .values()
            .filter(|name| !self.is_visible(name))
            .collect();
        names.sort();
        names.into_iter().map(|name| format!("import {name}")).collect()
    }

    /// True if the class needs no import in this file
    fn is_visible(&self, qualified: &str) -> bool {
        let package = package_of(qualified);
        package == self.package || IMPLICIT_PACKAGES.contains(&package)
    }
}

fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

fn package_of(qualified: &str) -> &str {
    qualified.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
}

/// Quote a string as a Kotlin string literal
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
