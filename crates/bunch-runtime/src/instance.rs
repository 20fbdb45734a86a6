//! Interpreter for generated types.
//!
//! A [`BunchClass`] wraps one [`GeneratedType`] and runs its method bodies
//! against a [`Bundle`], with the same observable behavior as the rendered
//! Kotlin class.

use crate::bundle::Bundle;
use crate::error::{RuntimeError, RuntimeResult};
use crate::value::{ObjectValue, Value};
use bunch_core::{
    Body, ClassTable, DefaultCall, Fallback, GeneratedMethod, GeneratedType, StorageStrategy,
    TypeDescriptor,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// Source of default bodies declared in a template's companion object
pub trait DefaultProvider: Send + Sync {
    /// Evaluate the default body, `None` if it is not known
    fn call(&self, call: &DefaultCall) -> Option<Value>;
}

type DefaultFn = Box<dyn Fn() -> Value + Send + Sync>;

/// Default bodies registered as closures, keyed by owner and function
#[derive(Default)]
pub struct Defaults {
    bodies: BTreeMap<(String, String), DefaultFn>,
}

impl Defaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the body of `owner.function()`
    pub fn with(
        mut self,
        owner: impl Into<String>,
        function: impl Into<String>,
        body: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        self.bodies
            .insert((owner.into(), function.into()), Box::new(body));
        self
    }
}

impl DefaultProvider for Defaults {
    fn call(&self, call: &DefaultCall) -> Option<Value> {
        self.bodies
            .get(&(call.owner.clone(), call.function.clone()))
            .map(|body| body())
    }
}

/// What an instance method returned
#[derive(Debug, Clone, PartialEq)]
pub enum Returned {
    /// The instance itself, for chaining
    Receiver,
    Value(Option<Value>),
    Assert(Assertion),
    Container(Bundle),
}

/// A generated type ready to be instantiated
#[derive(Clone)]
pub struct BunchClass {
    generated: Arc<GeneratedType>,
    defaults: Arc<dyn DefaultProvider>,
    classes: Arc<ClassTable>,
}

impl BunchClass {
    /// Wrap a generated type with no default bodies, knowing only the platform classes
    pub fn new(generated: GeneratedType) -> Self {
        Self {
            generated: Arc::new(generated),
            defaults: Arc::new(Defaults::new()),
            classes: Arc::new(ClassTable::with_builtins()),
        }
    }

    /// Attach the class hierarchy setters check object arguments against
    pub fn with_classes(mut self, classes: ClassTable) -> Self {
        self.classes = Arc::new(classes);
        self
    }

    /// Attach the template's default bodies
    pub fn with_defaults(mut self, defaults: impl DefaultProvider + 'static) -> Self {
        self.defaults = Arc::new(defaults);
        self
    }

    pub fn generated(&self) -> &GeneratedType {
        &self.generated
    }

    /// `from(bundle)`: wrap a duplicate, never the caller's bundle
    pub fn from(&self, bundle: &Bundle) -> BunchInstance {
        self.wrap(bundle.duplicate())
    }

    /// Call a companion method: `from` or a static entry point
    pub fn call_static(&self, name: &str, args: &[Value]) -> RuntimeResult<BunchInstance> {
        let method = self.find(self.generated.companion_named(name), name, args)?;

        match &method.body {
            Body::From => match args {
                [Value::Bundle(bundle)] => Ok(self.from(bundle)),
                _ => Err(mismatch(name, "expected a single Bundle argument")),
            },
            Body::Entry { setter, .. } => {
                let instance = self.wrap(Bundle::new());
                instance.invoke(setter, args)?;
                Ok(instance)
            }
            _ => Err(self.unknown(name)),
        }
    }

    fn wrap(&self, bundle: Bundle) -> BunchInstance {
        BunchInstance {
            class: self.clone(),
            bundle,
        }
    }

    fn find<'a>(
        &self,
        mut candidates: impl Iterator<Item = &'a GeneratedMethod>,
        name: &str,
        args: &[Value],
    ) -> RuntimeResult<&'a GeneratedMethod> {
        let mut seen = false;
        let found = candidates.find(|method| {
            seen = true;
            method.params.len() == args.len()
        });

        match found {
            Some(method) => Ok(method),
            None if seen => Err(mismatch(
                name,
                format!("no overload takes {} argument(s)", args.len()),
            )),
            None => Err(self.unknown(name)),
        }
    }

    fn unknown(&self, method: &str) -> RuntimeError {
        RuntimeError::UnknownMethod {
            type_name: self.generated.name.clone(),
            method: method.to_string(),
        }
    }

    fn default_value(&self, call: &DefaultCall) -> RuntimeResult<Value> {
        self.defaults
            .call(call)
            .ok_or_else(|| RuntimeError::DefaultUnavailable {
                owner: call.owner.clone(),
                function: call.function.clone(),
            })
    }
}

impl std::fmt::Debug for BunchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BunchClass")
            .field("name", &self.generated.qualified_name())
            .finish()
    }
}

/// One instance of a generated type, owning its backing bundle
#[derive(Clone)]
pub struct BunchInstance {
    class: BunchClass,
    bundle: Bundle,
}

impl BunchInstance {
    /// Run an instance method
    pub fn invoke(&self, name: &str, args: &[Value]) -> RuntimeResult<Returned> {
        let class = &self.class;
        let method = class.find(class.generated.methods_named(name), name, args)?;

        match &method.body {
            Body::Store { key, strategy, .. } => {
                let ty = method
                    .params
                    .first()
                    .map(|p| &p.ty)
                    .ok_or_else(|| mismatch(name, "setter has no parameter"))?;
                let stored = encode(&class.classes, name, *strategy, ty, &args[0])?;
                self.bundle.put(key.clone(), stored)?;
                Ok(Returned::Receiver)
            }
            Body::Load {
                key,
                strategy,
                ty,
                fallback,
            } => {
                let value = decode(*strategy, ty, key, self.bundle.get(key))?;
                let value = match fallback {
                    Fallback::InlineZero => match strategy {
                        StorageStrategy::Direct(kind) => value.or_else(|| Value::zero(*kind)),
                        _ => value,
                    },
                    Fallback::InlineDefault(call) => {
                        // the fallback argument is evaluated on every call
                        let fallback = class.default_value(call)?;
                        Some(value.unwrap_or(fallback))
                    }
                    Fallback::OrDefault(call) => match value {
                        Some(value) => Some(value),
                        None => Some(class.default_value(call)?),
                    },
                    Fallback::OrNull => value,
                    Fallback::OrThrow => {
                        Some(value.ok_or_else(|| RuntimeError::PropertyNotFound { key: key.clone() })?)
                    }
                };
                Ok(Returned::Value(value))
            }
            Body::Assert { key } => Ok(Returned::Assert(Assertion {
                class: class.clone(),
                bundle: self.bundle.clone(),
                keys: vec![key.clone()],
            })),
            Body::Collect => Ok(Returned::Container(self.bundle.clone())),
            Body::AssertChain { .. } | Body::Entry { .. } | Body::From => Err(class.unknown(name)),
        }
    }

    /// Call a setter, returning the instance for chaining
    pub fn set(&self, setter: &str, value: impl Into<Value>) -> RuntimeResult<&Self> {
        match self.invoke(setter, &[value.into()])? {
            Returned::Receiver => Ok(self),
            _ => Err(mismatch(setter, "not a setter")),
        }
    }

    /// Call a getter
    pub fn get(&self, getter: &str) -> RuntimeResult<Option<Value>> {
        match self.invoke(getter, &[])? {
            Returned::Value(value) => Ok(value),
            _ => Err(mismatch(getter, "not a getter")),
        }
    }

    /// Call a `has` method, starting an assertion chain
    pub fn has(&self, assert: &str) -> RuntimeResult<Assertion> {
        match self.invoke(assert, &[])? {
            Returned::Assert(assertion) => Ok(assertion),
            _ => Err(mismatch(assert, "not an assertion")),
        }
    }

    /// The backing bundle, shared rather than copied
    pub fn collect(&self) -> Bundle {
        self.bundle.clone()
    }
}

impl std::fmt::Debug for BunchInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BunchInstance")
            .field("class", &self.class)
            .field("bundle", &self.bundle)
            .finish()
    }
}

/// Accumulated presence checks over one bundle
#[derive(Clone)]
pub struct Assertion {
    class: BunchClass,
    bundle: Bundle,
    keys: Vec<String>,
}

impl Assertion {
    /// Chain another `has` method
    pub fn has(mut self, name: &str) -> RuntimeResult<Assertion> {
        match self.class.generated.assert_method(name).map(|m| &m.body) {
            Some(Body::AssertChain { key }) => {
                self.keys.push(key.clone());
                Ok(self)
            }
            _ => Err(self.class.unknown(name)),
        }
    }

    /// Keys recorded so far, in call order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Fail with the first recorded key absent from the bundle
    pub fn assert(&self) -> RuntimeResult<()> {
        match self.keys.iter().find(|key| !self.bundle.contains_key(key)) {
            Some(key) => Err(RuntimeError::MissingKey { key: key.clone() }),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion").field("keys", &self.keys).finish()
    }
}

impl PartialEq for Assertion {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys && self.bundle.same_as(&other.bundle)
    }
}

/// Convert a setter argument to its stored representation
///
/// Parcelable arguments must be instances of the declared class; serializable
/// ones are accepted by capability alone.
fn encode(
    classes: &ClassTable,
    method: &str,
    strategy: StorageStrategy,
    ty: &TypeDescriptor,
    value: &Value,
) -> RuntimeResult<Value> {
    let instance_of = |object: &ObjectValue, declared: &TypeDescriptor| {
        classes.is_subtype(&object.class_name, &declared.name)
    };

    let accepted = match (strategy, value) {
        (StorageStrategy::Direct(kind), value) => value.fits(kind),
        (StorageStrategy::ObjectList, Value::ParcelableList(items)) => match ty.arguments.first() {
            Some(element) => items.iter().all(|item| instance_of(item, element)),
            None => false,
        },
        (StorageStrategy::Object, Value::Parcelable(object)) => instance_of(object, ty),
        (StorageStrategy::Serializable, Value::Serializable(_)) => true,
        (StorageStrategy::Enum, Value::Enum { type_name, constant }) if *type_name == ty.name => {
            if !ty.constants.contains(constant) {
                return Err(RuntimeError::InvalidEnumConstant {
                    type_name: type_name.clone(),
                    constant: constant.clone(),
                });
            }
            return Ok(Value::String(constant.clone()));
        }
        _ => false,
    };

    if !accepted {
        return Err(mismatch(
            method,
            format!("expected {ty}, got {}", value.type_label()),
        ));
    }
    Ok(value.clone())
}

/// Convert a stored value back to the member's type
fn decode(
    strategy: StorageStrategy,
    ty: &TypeDescriptor,
    key: &str,
    stored: Option<Value>,
) -> RuntimeResult<Option<Value>> {
    let Some(stored) = stored else {
        return Ok(None);
    };

    let decoded = match (strategy, stored) {
        (StorageStrategy::Direct(kind), value) if value.fits(kind) => Some(value),
        (StorageStrategy::ObjectList, value @ Value::ParcelableList(_))
        | (StorageStrategy::Object, value @ Value::Parcelable(_))
        | (StorageStrategy::Serializable, value @ Value::Serializable(_)) => Some(value),
        (StorageStrategy::Enum, Value::String(name)) => {
            if !ty.constants.contains(&name) {
                return Err(RuntimeError::InvalidEnumConstant {
                    type_name: ty.name.clone(),
                    constant: name,
                });
            }
            Some(Value::enum_constant(&ty.name, name))
        }
        (strategy, other) => {
            // the platform container logs and returns null on a type mismatch
            warn!(
                key,
                expected = strategy.label(),
                found = other.type_label(),
                "Stored value has unexpected type"
            );
            None
        }
    };
    Ok(decoded)
}

fn mismatch(method: &str, reason: impl Into<String>) -> RuntimeError {
    RuntimeError::ArgumentMismatch {
        method: method.to_string(),
        reason: reason.into(),
    }
}
