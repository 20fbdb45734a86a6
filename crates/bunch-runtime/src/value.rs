//! Values held by a [`Bundle`](crate::Bundle) or passed to generated methods.

use crate::bundle::Bundle;
use bunch_core::DirectKind;
use std::fmt;

/// An object stored by capability rather than by shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectValue {
    /// Qualified class name
    pub class_name: String,

    /// Opaque state, compared for equality only
    pub state: String,
}

impl ObjectValue {
    pub fn new(class_name: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            state: state.into(),
        }
    }
}

/// A dynamically typed value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BooleanArray(Vec<bool>),
    ByteArray(Vec<i8>),
    CharArray(Vec<char>),
    ShortArray(Vec<i16>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    String(String),
    CharSequence(String),
    StringArray(Vec<String>),
    CharSequenceArray(Vec<String>),
    /// Binder identity token
    Binder(String),
    Bundle(Bundle),
    Parcelable(ObjectValue),
    ParcelableList(Vec<ObjectValue>),
    Serializable(ObjectValue),
    /// An enum constant; the container only ever holds its name
    Enum { type_name: String, constant: String },
}

impl Value {
    /// The container's zero value for scalar kinds
    pub fn zero(kind: DirectKind) -> Option<Value> {
        let zero = match kind {
            DirectKind::Boolean => Value::Boolean(false),
            DirectKind::Byte => Value::Byte(0),
            DirectKind::Char => Value::Char('\0'),
            DirectKind::Short => Value::Short(0),
            DirectKind::Int => Value::Int(0),
            DirectKind::Long => Value::Long(0),
            DirectKind::Float => Value::Float(0.0),
            DirectKind::Double => Value::Double(0.0),
            _ => return None,
        };
        Some(zero)
    }

    /// The natively stored kind this value has, if any
    pub fn direct_kind(&self) -> Option<DirectKind> {
        let kind = match self {
            Value::Boolean(_) => DirectKind::Boolean,
            Value::Byte(_) => DirectKind::Byte,
            Value::Char(_) => DirectKind::Char,
            Value::Short(_) => DirectKind::Short,
            Value::Int(_) => DirectKind::Int,
            Value::Long(_) => DirectKind::Long,
            Value::Float(_) => DirectKind::Float,
            Value::Double(_) => DirectKind::Double,
            Value::BooleanArray(_) => DirectKind::BooleanArray,
            Value::ByteArray(_) => DirectKind::ByteArray,
            Value::CharArray(_) => DirectKind::CharArray,
            Value::ShortArray(_) => DirectKind::ShortArray,
            Value::IntArray(_) => DirectKind::IntArray,
            Value::LongArray(_) => DirectKind::LongArray,
            Value::FloatArray(_) => DirectKind::FloatArray,
            Value::DoubleArray(_) => DirectKind::DoubleArray,
            Value::String(_) => DirectKind::String,
            Value::CharSequence(_) => DirectKind::CharSequence,
            Value::StringArray(_) => DirectKind::StringArray,
            Value::CharSequenceArray(_) => DirectKind::CharSequenceArray,
            Value::Binder(_) => DirectKind::Binder,
            Value::Bundle(_) => DirectKind::Bundle,
            _ => return None,
        };
        Some(kind)
    }

    /// True if a member of `kind` accepts this value
    pub fn fits(&self, kind: DirectKind) -> bool {
        match (self.direct_kind(), kind) {
            (Some(actual), expected) if actual == expected => true,
            // a String is a CharSequence
            (Some(DirectKind::String), DirectKind::CharSequence) => true,
            (Some(DirectKind::StringArray), DirectKind::CharSequenceArray) => true,
            _ => false,
        }
    }

    /// Short description used in mismatch messages
    pub fn type_label(&self) -> &'static str {
        match self {
            Value::Parcelable(_) => "Parcelable",
            Value::ParcelableList(_) => "ParcelableList",
            Value::Serializable(_) => "Serializable",
            Value::Enum { .. } => "Enum",
            other => other.direct_kind().map(DirectKind::suffix).unwrap_or("?"),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::CharSequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// An enum constant value
    pub fn enum_constant(type_name: impl Into<String>, constant: impl Into<String>) -> Value {
        Value::Enum {
            type_name: type_name.into(),
            constant: constant.into(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "'{v}'"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}L"),
            Value::Float(v) => write!(f, "{v}f"),
            Value::Double(v) => write!(f, "{v}"),
            Value::String(s) | Value::CharSequence(s) => write!(f, "{s:?}"),
            Value::Binder(token) => write!(f, "binder({token})"),
            Value::Bundle(bundle) => write!(f, "Bundle[{} keys]", bundle.len()),
            Value::Parcelable(obj) | Value::Serializable(obj) => write!(f, "{}", obj.class_name),
            Value::Enum { constant, .. } => write!(f, "{constant}"),
            other => write!(f, "{}", other.type_label()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Bundle> for Value {
    fn from(value: Bundle) -> Self {
        Value::Bundle(value)
    }
}
