//! Method synthesis: the rules turning one classified member into methods.
//!
//! | Getter class | Default body | Getters per prefix `p` |
//! |--------------|--------------|------------------------|
//! | zero default | no | `pName(): T` falling back to the zero value |
//! | zero default | yes | `pName(): T` falling back to the default |
//! | fallback capable | no | `pName(): T?`, `pNameOrThrow(): T` |
//! | fallback capable | yes | `pName(): T` falling back to the default |
//! | nullable | no | `pName(): T?`, `pNameOrThrow(): T` |
//! | nullable | yes | `pName(): T`, `pNameOrNull(): T?`, `pNameOrThrow(): T` |
//!
//! Every setter prefix yields an instance setter and a static entry point
//! of the same name. Every member yields one `has` assertion on the
//! generated type and one on its `Assert` accumulator.

use crate::classify::{GetterClass, StorageStrategy};
use crate::error::{GenerationError, GenerationResult};
use crate::model::{Member, MemberScope, TemplateType};
use crate::naming::{Naming, OR_NULL_SUFFIX, OR_THROW_SUFFIX};
use crate::types::{BUNDLE, TypeDescriptor};
use serde::Serialize;

/// One synthesized method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedMethod {
    pub name: String,
    pub params: Vec<Param>,
    pub returns: Returns,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeDescriptor,
}

/// Return type of a generated method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Returns {
    /// The generated type itself
    Receiver,
    Value { ty: TypeDescriptor, nullable: bool },
    /// The nested assertion accumulator
    Assert,
    /// The raw container
    Container,
}

/// Reference to a default body declared in the template's companion object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultCall {
    /// Simple name of the template class
    pub owner: String,
    pub function: String,
}

/// What a getter does when the key is absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Fallback {
    /// Pass the container's zero value as the inline fallback
    InlineZero,
    /// Pass the default body's result as the inline fallback
    InlineDefault(DefaultCall),
    /// Invoke the default body when the read yields null
    OrDefault(DefaultCall),
    OrNull,
    /// Raise a property-not-found fault carrying the key
    OrThrow,
}

/// What a generated method does
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Body {
    /// Write `param` under `key`, return the receiver
    Store {
        key: String,
        strategy: StorageStrategy,
        param: String,
    },
    /// Read `key` back as `ty`
    Load {
        key: String,
        strategy: StorageStrategy,
        ty: TypeDescriptor,
        fallback: Fallback,
    },
    /// Start a new accumulator over the container and record `key`
    Assert { key: String },
    /// Record `key` on an existing accumulator
    AssertChain { key: String },
    /// Apply `setter` to an instance over a fresh empty container
    Entry { setter: String, param: String },
    /// Wrap a duplicate of the supplied container
    From,
    /// Expose the backing container
    Collect,
}

/// Everything one member contributes to the generated type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberMethods {
    pub member: String,
    pub key: String,
    pub strategy: StorageStrategy,
    pub setters: Vec<GeneratedMethod>,
    pub getters: Vec<GeneratedMethod>,
    /// `has` method on the generated type
    pub assert: GeneratedMethod,
    /// `has` method on the assertion accumulator
    pub assert_chain: GeneratedMethod,
    /// Static entry points, one per setter
    pub entries: Vec<GeneratedMethod>,
}

/// Synthesize the methods of one member
pub fn synthesize_member(
    template: &TemplateType,
    member: &Member,
    naming: &Naming,
    strategy: StorageStrategy,
) -> GenerationResult<MemberMethods> {
    let default_call = default_call(template, member)?;

    let param = naming.property.clone();
    let ty = member.declared_type.clone();

    let setters: Vec<GeneratedMethod> = naming
        .setter_names()
        .into_iter()
        .map(|name| GeneratedMethod {
            name,
            params: vec![Param {
                name: param.clone(),
                ty: ty.clone(),
            }],
            returns: Returns::Receiver,
            body: Body::Store {
                key: naming.key.clone(),
                strategy,
                param: param.clone(),
            },
        })
        .collect();

    let entries = setters
        .iter()
        .map(|setter| GeneratedMethod {
            name: setter.name.clone(),
            params: setter.params.clone(),
            returns: Returns::Receiver,
            body: Body::Entry {
                setter: setter.name.clone(),
                param: param.clone(),
            },
        })
        .collect();

    let load = |name: String, nullable: bool, fallback: Fallback| GeneratedMethod {
        name,
        params: Vec::new(),
        returns: Returns::Value {
            ty: ty.clone(),
            nullable,
        },
        body: Body::Load {
            key: naming.key.clone(),
            strategy,
            ty: ty.clone(),
            fallback,
        },
    };

    let mut getters = Vec::new();
    for name in naming.getter_names() {
        let or_null = format!("{name}{OR_NULL_SUFFIX}");
        let or_throw = format!("{name}{OR_THROW_SUFFIX}");

        match (strategy.getter_class(), &default_call) {
            (GetterClass::ZeroDefault, None) => {
                getters.push(load(name, false, Fallback::InlineZero));
            }
            (GetterClass::ZeroDefault | GetterClass::FallbackCapable, Some(call)) => {
                getters.push(load(name, false, Fallback::InlineDefault(call.clone())));
            }
            (GetterClass::FallbackCapable | GetterClass::Nullable, None) => {
                getters.push(load(name, true, Fallback::OrNull));
                getters.push(load(or_throw, false, Fallback::OrThrow));
            }
            (GetterClass::Nullable, Some(call)) => {
                getters.push(load(name, false, Fallback::OrDefault(call.clone())));
                getters.push(load(or_null, true, Fallback::OrNull));
                getters.push(load(or_throw, false, Fallback::OrThrow));
            }
        }
    }

    let assert_name = naming.assert_name();
    let assert = GeneratedMethod {
        name: assert_name.clone(),
        params: Vec::new(),
        returns: Returns::Assert,
        body: Body::Assert {
            key: naming.key.clone(),
        },
    };
    let assert_chain = GeneratedMethod {
        name: assert_name,
        params: Vec::new(),
        returns: Returns::Assert,
        body: Body::AssertChain {
            key: naming.key.clone(),
        },
    };

    Ok(MemberMethods {
        member: member.declared_name.clone(),
        key: naming.key.clone(),
        strategy,
        setters,
        getters,
        assert,
        assert_chain,
        entries,
    })
}

/// The call producing a member's default, if it has one
fn default_call(template: &TemplateType, member: &Member) -> GenerationResult<Option<DefaultCall>> {
    if !member.has_default_body {
        return Ok(None);
    }

    // Only companion functions can be called without a template instance
    if member.scope != MemberScope::Companion {
        return Err(GenerationError::DefaultNotReachable {
            template: template.class_name.clone(),
            member: member.declared_name.clone(),
        });
    }

    Ok(Some(DefaultCall {
        owner: template.simple_name().to_string(),
        function: member.declared_name.clone(),
    }))
}

/// The static `from(container)` entry point
pub fn from_method() -> GeneratedMethod {
    GeneratedMethod {
        name: "from".to_string(),
        params: vec![Param {
            name: "bundle".to_string(),
            ty: TypeDescriptor::named(BUNDLE),
        }],
        returns: Returns::Receiver,
        body: Body::From,
    }
}

/// The `collect()` escape hatch
pub fn collect_method() -> GeneratedMethod {
    GeneratedMethod {
        name: "collect".to_string(),
        params: Vec::new(),
        returns: Returns::Container,
        body: Body::Collect,
    }
}

#[cfg(test)]
#[path = "synth/synth_tests.rs"]
mod synth_tests;
