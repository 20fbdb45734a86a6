//! Storage strategy classification.
//!
//! Checks run in a fixed order and the first match wins:
//!
//! | Order | Declared type | Strategy |
//! |-------|---------------|----------|
//! | 1 | scalar, primitive array, `String`, `CharSequence`, their arrays, `IBinder`, `Bundle` | [`StorageStrategy::Direct`] |
//! | 2 | `List<T>` with `T: Parcelable` | [`StorageStrategy::ObjectList`] |
//! | 3 | immediate superclass `kotlin.Enum` | [`StorageStrategy::Enum`] |
//! | 4 | implements `Parcelable` | [`StorageStrategy::Object`] |
//! | 5 | implements `Serializable` | [`StorageStrategy::Serializable`] |
//!
//! Direct kinds come first because a `Bundle` is also `Parcelable` and
//! every scalar is also `Serializable`. Enums come before the capability
//! checks because `kotlin.Enum` is `Serializable`.

use crate::error::{GenerationError, GenerationResult};
use crate::model::{Member, TemplateType};
use crate::types::{
    ARRAY, BINDER, BUNDLE, CHAR_SEQUENCE, LIST, PARCELABLE, SERIALIZABLE, STRING, TypeDescriptor,
};
use serde::Serialize;
use tracing::debug;

/// Types the container stores natively
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DirectKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    BooleanArray,
    ByteArray,
    CharArray,
    ShortArray,
    IntArray,
    LongArray,
    FloatArray,
    DoubleArray,
    String,
    CharSequence,
    StringArray,
    CharSequenceArray,
    Binder,
    Bundle,
}

/// How absence is handled when reading a member back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GetterClass {
    /// The container returns a zero value, so one getter suffices
    ZeroDefault,
    /// The container accepts an inline fallback but can also return null
    FallbackCapable,
    /// Absence can only be reported as null
    Nullable,
}

impl DirectKind {
    pub const ALL: [DirectKind; 22] = [
        DirectKind::Boolean,
        DirectKind::Byte,
        DirectKind::Char,
        DirectKind::Short,
        DirectKind::Int,
        DirectKind::Long,
        DirectKind::Float,
        DirectKind::Double,
        DirectKind::BooleanArray,
        DirectKind::ByteArray,
        DirectKind::CharArray,
        DirectKind::ShortArray,
        DirectKind::IntArray,
        DirectKind::LongArray,
        DirectKind::FloatArray,
        DirectKind::DoubleArray,
        DirectKind::String,
        DirectKind::CharSequence,
        DirectKind::StringArray,
        DirectKind::CharSequenceArray,
        DirectKind::Binder,
        DirectKind::Bundle,
    ];

    /// Match a descriptor against the natively stored types
    pub fn from_descriptor(ty: &TypeDescriptor) -> Option<Self> {
        let kind = match ty.name.as_str() {
            "kotlin.Boolean" => DirectKind::Boolean,
            "kotlin.Byte" => DirectKind::Byte,
            "kotlin.Char" => DirectKind::Char,
            "kotlin.Short" => DirectKind::Short,
            "kotlin.Int" => DirectKind::Int,
            "kotlin.Long" => DirectKind::Long,
            "kotlin.Float" => DirectKind::Float,
            "kotlin.Double" => DirectKind::Double,
            "kotlin.BooleanArray" => DirectKind::BooleanArray,
            "kotlin.ByteArray" => DirectKind::ByteArray,
            "kotlin.CharArray" => DirectKind::CharArray,
            "kotlin.ShortArray" => DirectKind::ShortArray,
            "kotlin.IntArray" => DirectKind::IntArray,
            "kotlin.LongArray" => DirectKind::LongArray,
            "kotlin.FloatArray" => DirectKind::FloatArray,
            "kotlin.DoubleArray" => DirectKind::DoubleArray,
            STRING => DirectKind::String,
            CHAR_SEQUENCE => DirectKind::CharSequence,
            BINDER => DirectKind::Binder,
            BUNDLE => DirectKind::Bundle,
            ARRAY => match ty.arguments.first().map(|a| a.name.as_str()) {
                Some(STRING) => DirectKind::StringArray,
                Some(CHAR_SEQUENCE) => DirectKind::CharSequenceArray,
                _ => return None,
            },
            _ => return None,
        };
        Some(kind)
    }

    /// Suffix of the container's typed put/get calls (`putInt`, `getIntArray`)
    pub fn suffix(self) -> &'static str {
        match self {
            DirectKind::Boolean => "Boolean",
            DirectKind::Byte => "Byte",
            DirectKind::Char => "Char",
            DirectKind::Short => "Short",
            DirectKind::Int => "Int",
            DirectKind::Long => "Long",
            DirectKind::Float => "Float",
            DirectKind::Double => "Double",
            DirectKind::BooleanArray => "BooleanArray",
            DirectKind::ByteArray => "ByteArray",
            DirectKind::CharArray => "CharArray",
            DirectKind::ShortArray => "ShortArray",
            DirectKind::IntArray => "IntArray",
            DirectKind::LongArray => "LongArray",
            DirectKind::FloatArray => "FloatArray",
            DirectKind::DoubleArray => "DoubleArray",
            DirectKind::String => "String",
            DirectKind::CharSequence => "CharSequence",
            DirectKind::StringArray => "StringArray",
            DirectKind::CharSequenceArray => "CharSequenceArray",
            DirectKind::Binder => "Binder",
            DirectKind::Bundle => "Bundle",
        }
    }

    pub fn getter_class(self) -> GetterClass {
        match self {
            DirectKind::Boolean
            | DirectKind::Byte
            | DirectKind::Char
            | DirectKind::Short
            | DirectKind::Int
            | DirectKind::Long
            | DirectKind::Float
            | DirectKind::Double => GetterClass::ZeroDefault,
            DirectKind::String | DirectKind::CharSequence => GetterClass::FallbackCapable,
            _ => GetterClass::Nullable,
        }
    }

    /// Kotlin literal of the container's zero value, for zero-default kinds
    pub fn zero_literal(self) -> Option<&'static str> {
        match self {
            DirectKind::Boolean => Some("false"),
            DirectKind::Byte | DirectKind::Short | DirectKind::Int => Some("0"),
            DirectKind::Char => Some("'\\u0000'"),
            DirectKind::Long => Some("0L"),
            DirectKind::Float => Some("0f"),
            DirectKind::Double => Some("0.0"),
            _ => None,
        }
    }
}

/// How a member is written to and read from the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum StorageStrategy {
    Direct(DirectKind),
    /// `List<T: Parcelable>`, stored as a parcelable array list
    ObjectList,
    /// Stored as the constant's name
    Enum,
    /// Stored as a parcelable
    Object,
    /// Stored as a serializable, read back with an unchecked cast
    Serializable,
}

impl StorageStrategy {
    pub fn getter_class(self) -> GetterClass {
        match self {
            StorageStrategy::Direct(kind) => kind.getter_class(),
            _ => GetterClass::Nullable,
        }
    }

    /// Stable short name, used in helper names and diagnostics
    pub fn label(self) -> &'static str {
        match self {
            StorageStrategy::Direct(kind) => kind.suffix(),
            StorageStrategy::ObjectList => "ParcelableList",
            StorageStrategy::Enum => "Enum",
            StorageStrategy::Object => "Parcelable",
            StorageStrategy::Serializable => "Serializable",
        }
    }
}

/// Map a resolved type to its storage strategy, first match wins
pub fn classify(ty: &TypeDescriptor) -> Option<StorageStrategy> {
    if let Some(kind) = DirectKind::from_descriptor(ty) {
        return Some(StorageStrategy::Direct(kind));
    }

    if ty.name == LIST
        && ty
            .arguments
            .first()
            .is_some_and(|element| element.implements(PARCELABLE))
    {
        return Some(StorageStrategy::ObjectList);
    }

    if ty.is_enum() {
        return Some(StorageStrategy::Enum);
    }

    if ty.implements(PARCELABLE) {
        return Some(StorageStrategy::Object);
    }

    if ty.implements(SERIALIZABLE) {
        return Some(StorageStrategy::Serializable);
    }

    None
}

/// Classify one member, failing with [`GenerationError::UnsupportedType`]
pub fn classify_member(template: &TemplateType, member: &Member) -> GenerationResult<StorageStrategy> {
    let strategy = classify(&member.declared_type).ok_or_else(|| {
        GenerationError::UnsupportedType {
            template: template.class_name.clone(),
            member: member.declared_name.clone(),
            type_name: member.declared_type.to_string(),
        }
    })?;

    debug!(
        template = %template.class_name,
        member = %member.declared_name,
        strategy = strategy.label(),
        "Classified member"
    );

    Ok(strategy)
}
