//! Type descriptors and the class hierarchy they are resolved against.
//!
//! A template manifest names return types the way Kotlin source does
//! (`Int`, `Array<String>`, `List<ChildParcelable>`). The [`ClassTable`]
//! knows the platform classes plus every class the manifest declares, and
//! turns a [`TypeExpr`] into a [`TypeDescriptor`] carrying the immediate
//! superclass and the full supertype closure the classifier needs.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

pub const PARCELABLE: &str = "android.os.Parcelable";
pub const SERIALIZABLE: &str = "java.io.Serializable";
pub const COMPARABLE: &str = "kotlin.Comparable";
pub const ENUM_BASE: &str = "kotlin.Enum";
pub const BUNDLE: &str = "android.os.Bundle";
pub const BINDER: &str = "android.os.IBinder";
pub const LIST: &str = "kotlin.collections.List";
pub const ARRAY: &str = "kotlin.Array";
pub const STRING: &str = "kotlin.String";
pub const CHAR_SEQUENCE: &str = "kotlin.CharSequence";

/// Kotlin scalar types, all comparable and serializable on the JVM
const SCALARS: &[&str] = &[
    "kotlin.Boolean",
    "kotlin.Byte",
    "kotlin.Char",
    "kotlin.Short",
    "kotlin.Int",
    "kotlin.Long",
    "kotlin.Float",
    "kotlin.Double",
];

const PRIMITIVE_ARRAYS: &[&str] = &[
    "kotlin.BooleanArray",
    "kotlin.ByteArray",
    "kotlin.CharArray",
    "kotlin.ShortArray",
    "kotlin.IntArray",
    "kotlin.LongArray",
    "kotlin.FloatArray",
    "kotlin.DoubleArray",
];

/// Errors raised while resolving a type expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("malformed type \"{0}\"")]
    Malformed(String),

    #[error("nullable type \"{0}\" cannot be stored")]
    Nullable(String),

    #[error("unknown class {0}")]
    UnknownClass(String),

    #[error("class name {0} is ambiguous")]
    Ambiguous(String),

    #[error("{name} expects {expected} type argument(s), got {actual}")]
    Arity {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("cyclic supertype chain through {0}")]
    Cyclic(String),
}

/// A type as written in the manifest: a name plus type arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    pub name: String,
    pub arguments: Vec<TypeExpr>,
}

impl TypeExpr {
    /// Parse `Name`, `pkg.Name`, or `Name<Arg, ...>`
    pub fn parse(source: &str) -> Result<TypeExpr, TypeError> {
        let trimmed = source.trim();
        if trimmed.ends_with('?') {
            return Err(TypeError::Nullable(trimmed.to_string()));
        }

        let mut parser = ExprParser {
            chars: trimmed.char_indices().peekable(),
            source: trimmed,
        };
        let expr = parser.expr()?;
        if parser.chars.peek().is_some() {
            return Err(TypeError::Malformed(trimmed.to_string()));
        }
        Ok(expr)
    }
}

struct ExprParser<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    source: &'a str,
}

impl ExprParser<'_> {
    fn malformed(&self) -> TypeError {
        TypeError::Malformed(self.source.to_string())
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn expr(&mut self) -> Result<TypeExpr, TypeError> {
        self.skip_whitespace();

        let mut name = String::new();
        while let Some((_, c)) = self.chars.next_if(|(_, c)| c.is_alphanumeric() || *c == '_' || *c == '.') {
            name.push(c);
        }
        if name.is_empty() || name.starts_with('.') || name.ends_with('.') || name.contains("..") {
            return Err(self.malformed());
        }

        self.skip_whitespace();
        let mut arguments = Vec::new();
        if self.chars.next_if(|(_, c)| *c == '<').is_some() {
            loop {
                arguments.push(self.expr()?);
                self.skip_whitespace();
                match self.chars.next() {
                    Some((_, ',')) => continue,
                    Some((_, '>')) => break,
                    Some((_, '?')) => return Err(TypeError::Nullable(self.source.to_string())),
                    _ => return Err(self.malformed()),
                }
            }
            self.skip_whitespace();
        }

        Ok(TypeExpr { name, arguments })
    }
}

/// Declared shape of a class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
}

/// A class known to the resolver, either built in or declared in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    /// Fully qualified name (e.g., `com.example.ChildParcelable`)
    pub name: String,

    #[serde(default)]
    pub kind: ClassKind,

    /// Immediate superclass, qualified or simple
    #[serde(default)]
    pub superclass: Option<String>,

    /// Directly implemented interfaces, qualified or simple
    #[serde(default)]
    pub interfaces: Vec<String>,

    /// Enum constants, in declaration order
    #[serde(default)]
    pub constants: Vec<String>,

    /// Number of type parameters
    #[serde(default)]
    pub type_parameters: usize,
}

impl ClassInfo {
    fn builtin(name: &str, kind: ClassKind, superclass: Option<&str>, interfaces: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind,
            superclass: superclass.map(str::to_string),
            interfaces: interfaces.iter().map(|i| i.to_string()).collect(),
            constants: Vec::new(),
            type_parameters: 0,
        }
    }

    fn generic(mut self, type_parameters: usize) -> Self {
        self.type_parameters = type_parameters;
        self
    }

    /// The superclass this class actually extends, enum base included
    fn effective_superclass(&self) -> Option<&str> {
        match self.kind {
            ClassKind::Enum => Some(ENUM_BASE),
            _ => self.superclass.as_deref(),
        }
    }
}

/// A fully resolved type, as seen by the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    /// Fully qualified name
    pub name: String,

    /// Resolved type arguments
    pub arguments: Vec<TypeDescriptor>,

    /// Immediate superclass, if any
    pub superclass: Option<String>,

    /// Every superclass and interface reachable from this type
    pub supertypes: BTreeSet<String>,

    /// Enum constants when the type is an enumeration
    pub constants: Vec<String>,
}

impl TypeDescriptor {
    /// A descriptor with no supertypes, mostly useful in tests
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            superclass: None,
            supertypes: BTreeSet::new(),
            constants: Vec::new(),
        }
    }

    /// Simple name without the package
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Package of the type, empty for the default package
    pub fn package(&self) -> &str {
        self.name.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
    }

    /// True if the type is `name` or has `name` in its supertype closure
    pub fn implements(&self, name: &str) -> bool {
        self.name == name || self.supertypes.contains(name)
    }

    /// True if the immediate superclass is the enumeration base
    pub fn is_enum(&self) -> bool {
        self.superclass.as_deref() == Some(ENUM_BASE)
    }

    /// Visit this type and every type argument, depth first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TypeDescriptor)) {
        visit(self);
        for argument in &self.arguments {
            argument.walk(visit);
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.arguments.is_empty() {
            write!(f, "<")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{argument}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// Every class the resolver can see, keyed by qualified name
#[derive(Debug, Clone)]
pub struct ClassTable {
    classes: BTreeMap<String, ClassInfo>,
}

impl ClassTable {
    /// Create a table holding only the platform classes
    pub fn with_builtins() -> Self {
        use ClassKind::{Class, Interface};

        let mut table = Self {
            classes: BTreeMap::new(),
        };

        for name in [PARCELABLE, SERIALIZABLE, BINDER] {
            table.declare(ClassInfo::builtin(name, Interface, None, &[]));
        }
        table.declare(ClassInfo::builtin(COMPARABLE, Interface, None, &[]).generic(1));
        table.declare(ClassInfo::builtin(CHAR_SEQUENCE, Interface, None, &[]));
        table.declare(ClassInfo::builtin(LIST, Interface, None, &[]).generic(1));
        table.declare(ClassInfo::builtin(ENUM_BASE, Class, None, &[COMPARABLE, SERIALIZABLE]).generic(1));
        table.declare(ClassInfo::builtin(BUNDLE, Class, None, &[PARCELABLE]));
        table.declare(ClassInfo::builtin(
            STRING,
            Class,
            None,
            &[CHAR_SEQUENCE, COMPARABLE, SERIALIZABLE],
        ));
        table.declare(ClassInfo::builtin(ARRAY, Class, None, &[SERIALIZABLE]).generic(1));
        for name in SCALARS {
            table.declare(ClassInfo::builtin(name, Class, None, &[COMPARABLE, SERIALIZABLE]));
        }
        for name in PRIMITIVE_ARRAYS {
            table.declare(ClassInfo::builtin(name, Class, None, &[SERIALIZABLE]));
        }

        table
    }

    /// Add or replace a class
    pub fn declare(&mut self, info: ClassInfo) {
        self.classes.insert(info.name.clone(), info);
    }

    /// Look up a class by qualified name
    pub fn get(&self, qualified: &str) -> Option<&ClassInfo> {
        self.classes.get(qualified)
    }

    /// Number of known classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True if the table knows no classes
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Expand a qualified or simple class name to its qualified form
    pub fn qualify(&self, name: &str) -> Result<String, TypeError> {
        if self.classes.contains_key(name) {
            return Ok(name.to_string());
        }
        if name.contains('.') {
            return Err(TypeError::UnknownClass(name.to_string()));
        }

        let suffix = format!(".{name}");
        let mut matches = self.classes.keys().filter(|k| k.ends_with(&suffix));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Ok(only.clone()),
            (Some(_), Some(_)) => Err(TypeError::Ambiguous(name.to_string())),
            (None, _) => Err(TypeError::UnknownClass(name.to_string())),
        }
    }

    /// Resolve a type expression against the table
    pub fn describe(&self, expr: &TypeExpr) -> Result<TypeDescriptor, TypeError> {
        let name = self.qualify(&expr.name)?;
        let info = self
            .get(&name)
            .ok_or_else(|| TypeError::UnknownClass(name.clone()))?;

        if info.type_parameters != expr.arguments.len() {
            return Err(TypeError::Arity {
                name,
                expected: info.type_parameters,
                actual: expr.arguments.len(),
            });
        }

        let arguments = expr
            .arguments
            .iter()
            .map(|argument| self.describe(argument))
            .collect::<Result<Vec<_>, _>>()?;

        let superclass = info
            .effective_superclass()
            .map(|s| self.qualify(s))
            .transpose()?;

        let mut supertypes = BTreeSet::new();
        self.collect_supertypes(&name, &mut Vec::new(), &mut supertypes)?;

        Ok(TypeDescriptor {
            name,
            arguments,
            superclass,
            supertypes,
            constants: info.constants.clone(),
        })
    }

    /// True if `name` is `ancestor` or one of its known subtypes
    ///
    /// Unknown classes and broken hierarchies are subtypes of nothing but themselves.
    pub fn is_subtype(&self, name: &str, ancestor: &str) -> bool {
        if name == ancestor {
            return true;
        }
        let mut supertypes = BTreeSet::new();
        self.collect_supertypes(name, &mut Vec::new(), &mut supertypes)
            .is_ok()
            && supertypes.contains(ancestor)
    }

    /// Parse and resolve in one step
    pub fn describe_str(&self, source: &str) -> Result<TypeDescriptor, TypeError> {
        self.describe(&TypeExpr::parse(source)?)
    }

    fn collect_supertypes(
        &self,
        name: &str,
        path: &mut Vec<String>,
        out: &mut BTreeSet<String>,
    ) -> Result<(), TypeError> {
        if path.iter().any(|p| p == name) {
            return Err(TypeError::Cyclic(name.to_string()));
        }
        let info = self
            .get(name)
            .ok_or_else(|| TypeError::UnknownClass(name.to_string()))?;

        path.push(name.to_string());
        let parents = info
            .effective_superclass()
            .into_iter()
            .chain(info.interfaces.iter().map(String::as_str));
        for parent in parents {
            let parent = self.qualify(parent)?;
            self.collect_supertypes(&parent, path, out)?;
            out.insert(parent);
        }
        path.pop();

        Ok(())
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        Self::with_builtins()
    }
}
