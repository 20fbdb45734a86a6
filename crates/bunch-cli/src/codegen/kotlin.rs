//! Kotlin source generation from generated types.

use super::kotlin_types::{Imports, string_literal};
use anyhow::{Context, Result};
use bunch_core::types::{BINDER, BUNDLE, CHAR_SEQUENCE, PARCELABLE, SERIALIZABLE, STRING};
use bunch_core::{
    Body, DefaultCall, DirectKind, Fallback, GeneratedMethod, GeneratedType, GeneratorConfig,
    Helper, Returns, StorageStrategy, TypeDescriptor, Visibility,
};
use std::fs;
use std::path::{Path, PathBuf};

const PROPERTY_NOT_FOUND: &str = "PropertyNotFoundException";
const MISSING_KEY: &str = "MissingKeyException";

/// Write one `.kt` file per generated type under `output_dir`.
///
/// Files land in the directory matching their package. Returns the written paths.
pub fn generate_kotlin(
    types: &[GeneratedType],
    output_dir: &Path,
    config: &GeneratorConfig,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(types.len());

    for generated in types {
        let package_dir = output_dir.join(generated.package.replace('.', "/"));
        fs::create_dir_all(&package_dir)
            .with_context(|| format!("Failed to create directory: {package_dir:?}"))?;

        let output_file = package_dir.join(config.file_name(&generated.name));
        fs::write(&output_file, render_kotlin(generated, config))
            .with_context(|| format!("Failed to write {output_file:?}"))?;

        written.push(output_file);
    }

    Ok(written)
}

/// Render the Kotlin source of one generated type
pub fn render_kotlin(generated: &GeneratedType, config: &GeneratorConfig) -> String {
    KotlinWriter::new(generated, config).render()
}

struct KotlinWriter<'a> {
    generated: &'a GeneratedType,
    config: &'a GeneratorConfig,
    imports: Imports,
    indent: String,
    code: String,
}

impl<'a> KotlinWriter<'a> {
    fn new(generated: &'a GeneratedType, config: &'a GeneratorConfig) -> Self {
        Self {
            generated,
            config,
            imports: collect_imports(generated),
            indent: config.indent_unit(),
            code: String::new(),
        }
    }

    fn render(mut self) -> String {
        let generated = self.generated;

        if self.config.emit_header {
            self.line(
                0,
                &format!("// Generated by bunch from {}. Do not edit.", generated.template),
            );
            self.blank();
        }

        if !generated.package.is_empty() {
            self.line(0, &format!("package {}", generated.package));
            self.blank();
        }

        let imports = self.imports.lines();
        if !imports.is_empty() {
            for import in &imports {
                self.line(0, import);
            }
            self.blank();
        }

        let modifier = match generated.visibility {
            Visibility::Public => "",
            Visibility::Internal => "internal ",
        };
        let bundle = self.bundle();
        self.line(
            0,
            &format!(
                "{modifier}class {} private constructor(private val bundle: {bundle}) {{",
                generated.name
            ),
        );

        for method in &generated.methods {
            self.blank();
            self.instance_method(method);
        }

        self.blank();
        self.assert_class();

        self.blank();
        self.line(
            1,
            &format!(
                "class {PROPERTY_NOT_FOUND}(val key: String) : IllegalStateException(\"Property $key not found\")"
            ),
        );
        self.blank();
        self.line(
            1,
            &format!("class {MISSING_KEY}(val key: String) : IllegalStateException(\"$key not found\")"),
        );

        self.blank();
        self.companion();

        self.line(0, "}");
        self.code
    }

    fn instance_method(&mut self, method: &GeneratedMethod) {
        let statement = match &method.body {
            // `this.` so a parameter named `bundle` cannot shadow the field
            Body::Store {
                key,
                strategy,
                param,
            } => format!(
                "return apply {{ this.bundle.{}({}, {param}) }}",
                Helper::Insert(*strategy).name(),
                string_literal(key)
            ),
            Body::Load {
                key,
                strategy,
                ty,
                fallback,
            } => self.load(method, key, *strategy, ty, fallback),
            Body::Assert { .. } => format!("return Assert().{}()", method.name),
            Body::Collect => "return bundle".to_string(),
            // Only reachable from the companion or the accumulator
            Body::AssertChain { key } => format!("return add({})", string_literal(key)),
            Body::Entry { setter, param } => self.entry(setter, param),
            Body::From => self.from(method),
        };
        self.function(1, method, &statement);
    }

    fn load(
        &self,
        method: &GeneratedMethod,
        key: &str,
        strategy: StorageStrategy,
        ty: &TypeDescriptor,
        fallback: &Fallback,
    ) -> String {
        let helper = Helper::for_body(&method.body)
            .map(Helper::name)
            .unwrap_or_default();
        let key = string_literal(key);

        let inline = match (fallback, strategy) {
            (Fallback::InlineZero, StorageStrategy::Direct(kind)) => {
                kind.zero_literal().map(str::to_string)
            }
            (Fallback::InlineDefault(call), StorageStrategy::Direct(_)) => {
                Some(default_call(call))
            }
            _ => None,
        };
        if let Some(value) = inline {
            return format!("return bundle.{helper}({key}, {value})");
        }

        let type_argument = match strategy {
            StorageStrategy::Direct(_) => None,
            StorageStrategy::ObjectList => ty.arguments.first(),
            StorageStrategy::Enum | StorageStrategy::Object | StorageStrategy::Serializable => {
                Some(ty)
            }
        };
        let type_argument = type_argument
            .map(|t| format!("<{}>", self.imports.type_name(t)))
            .unwrap_or_default();

        let read = format!("bundle.{helper}{type_argument}({key})");
        match fallback {
            Fallback::OrThrow => format!("return {read} ?: throw {PROPERTY_NOT_FOUND}({key})"),
            Fallback::OrDefault(call) | Fallback::InlineDefault(call) => {
                format!("return {read} ?: {}", default_call(call))
            }
            Fallback::OrNull | Fallback::InlineZero => format!("return {read}"),
        }
    }

    fn entry(&self, setter: &str, param: &str) -> String {
        format!(
            "return {}({}()).{setter}({param})",
            self.generated.name,
            self.bundle()
        )
    }

    fn from(&self, method: &GeneratedMethod) -> String {
        let param = method
            .params
            .first()
            .map(|p| p.name.as_str())
            .unwrap_or("bundle");
        format!("return {}({param}.duplicate())", self.generated.name)
    }

    fn assert_class(&mut self) {
        self.line(1, "inner class Assert {");
        self.line(2, "private val keys = mutableListOf<String>()");
        self.blank();
        self.line(2, "private fun add(key: String): Assert = apply { keys.add(key) }");

        let generated = self.generated;
        for method in &generated.assert_methods {
            self.blank();
            let statement = match &method.body {
                Body::AssertChain { key } | Body::Assert { key } => {
                    format!("return add({})", string_literal(key))
                }
                _ => continue,
            };
            self.function(2, method, &statement);
        }

        self.blank();
        self.line(2, "fun assert() {");
        self.line(3, "val present = bundle.keySet()");
        self.line(
            3,
            &format!("keys.firstOrNull {{ it !in present }}?.let {{ throw {MISSING_KEY}(it) }}"),
        );
        self.line(2, "}");
        self.line(1, "}");
    }

    fn companion(&mut self) {
        let generated = self.generated;
        let bundle = self.bundle();

        self.line(1, "companion object {");

        let mut first = true;
        for method in &generated.companion {
            if !first {
                self.blank();
            }
            first = false;

            let statement = match &method.body {
                Body::From => self.from(method),
                Body::Entry { setter, param } => self.entry(setter, param),
                _ => continue,
            };
            self.function(2, method, &statement);
        }

        if !first {
            self.blank();
        }
        self.line(2, &format!("private fun {bundle}.duplicate(): {bundle} {{"));
        self.line(
            3,
            &format!("return if (this === {bundle}.EMPTY) {bundle}() else clone() as {bundle}"),
        );
        self.line(2, "}");

        for helper in &generated.helpers {
            self.blank();
            self.helper(*helper);
        }

        self.line(1, "}");
    }

    fn helper(&mut self, helper: Helper) {
        let bundle = self.bundle();
        let name = helper.name();
        let parcelable = self.imports.class_name(PARCELABLE);

        let (annotation, signature, statement) = match helper {
            Helper::Insert(strategy) => {
                let (value, call) = match strategy {
                    StorageStrategy::Direct(kind) => (
                        self.direct_type_name(kind),
                        format!("put{}(key, value)", kind.suffix()),
                    ),
                    StorageStrategy::ObjectList => (
                        format!("List<{parcelable}>"),
                        "putParcelableArrayList(key, ArrayList(value))".to_string(),
                    ),
                    StorageStrategy::Enum => {
                        ("Enum<*>".to_string(), "putString(key, value.name)".to_string())
                    }
                    StorageStrategy::Object => {
                        (parcelable.clone(), "putParcelable(key, value)".to_string())
                    }
                    StorageStrategy::Serializable => (
                        self.imports.class_name(SERIALIZABLE),
                        "putSerializable(key, value)".to_string(),
                    ),
                };
                (
                    None,
                    format!("private fun {bundle}.{name}(key: String, value: {value}) {{"),
                    call,
                )
            }
            Helper::ExtractWithFallback(kind) => {
                let ty = self.direct_type_name(kind);
                (
                    None,
                    format!("private fun {bundle}.{name}(key: String, fallback: {ty}): {ty} {{"),
                    format!("return get{}(key, fallback)", kind.suffix()),
                )
            }
            Helper::Extract(strategy) => match strategy {
                StorageStrategy::Direct(kind) => (
                    None,
                    format!(
                        "private fun {bundle}.{name}(key: String): {}? {{",
                        self.direct_type_name(kind)
                    ),
                    format!("return get{}(key)", kind.suffix()),
                ),
                StorageStrategy::ObjectList => (
                    None,
                    format!(
                        "private fun <T : {parcelable}> {bundle}.{name}(key: String): List<T>? {{"
                    ),
                    "return getParcelableArrayList(key)".to_string(),
                ),
                StorageStrategy::Enum => (
                    None,
                    format!(
                        "private inline fun <reified T : Enum<T>> {bundle}.{name}(key: String): T? {{"
                    ),
                    "return getString(key)?.let { enumValueOf<T>(it) }".to_string(),
                ),
                StorageStrategy::Object => (
                    None,
                    format!("private fun <T : {parcelable}> {bundle}.{name}(key: String): T? {{"),
                    "return getParcelable(key)".to_string(),
                ),
                StorageStrategy::Serializable => (
                    Some("@Suppress(\"UNCHECKED_CAST\")"),
                    format!(
                        "private fun <T : {}> {bundle}.{name}(key: String): T? {{",
                        self.imports.class_name(SERIALIZABLE)
                    ),
                    "return getSerializable(key) as? T".to_string(),
                ),
            },
        };

        if let Some(annotation) = annotation {
            self.line(2, annotation);
        }
        self.line(2, &signature);
        self.line(3, &statement);
        self.line(2, "}");
    }

    fn function(&mut self, depth: usize, method: &GeneratedMethod, statement: &str) {
        let params: Vec<String> = method
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, self.imports.type_name(&p.ty)))
            .collect();
        let returns = self.returns(&method.returns);

        self.line(
            depth,
            &format!("fun {}({}): {returns} {{", method.name, params.join(", ")),
        );
        self.line(depth + 1, statement);
        self.line(depth, "}");
    }

    fn returns(&self, returns: &Returns) -> String {
        match returns {
            Returns::Receiver => self.generated.name.clone(),
            Returns::Value { ty, nullable } => {
                let name = self.imports.type_name(ty);
                if *nullable { format!("{name}?") } else { name }
            }
            Returns::Assert => "Assert".to_string(),
            Returns::Container => self.bundle(),
        }
    }

    fn direct_type_name(&self, kind: DirectKind) -> String {
        self.imports.type_name(&direct_type(kind))
    }

    fn bundle(&self) -> String {
        self.imports.class_name(BUNDLE)
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.code.push_str(&self.indent);
        }
        self.code.push_str(text);
        self.code.push('\n');
    }

    fn blank(&mut self) {
        self.code.push('\n');
    }
}

/// `Owner.function()`, the call of a companion default body
fn default_call(call: &DefaultCall) -> String {
    format!("{}.{}()", call.owner, call.function)
}

/// The Kotlin type a direct kind is put and read as
fn direct_type(kind: DirectKind) -> TypeDescriptor {
    let array_of = |element: &str| {
        let mut ty = TypeDescriptor::named(bunch_core::types::ARRAY);
        ty.arguments.push(TypeDescriptor::named(element));
        ty
    };

    match kind {
        DirectKind::String => TypeDescriptor::named(STRING),
        DirectKind::CharSequence => TypeDescriptor::named(CHAR_SEQUENCE),
        DirectKind::StringArray => array_of(STRING),
        DirectKind::CharSequenceArray => array_of(CHAR_SEQUENCE),
        DirectKind::Binder => TypeDescriptor::named(BINDER),
        DirectKind::Bundle => TypeDescriptor::named(BUNDLE),
        other => TypeDescriptor::named(format!("kotlin.{}", other.suffix())),
    }
}

/// Every class the rendered file mentions, container first
fn collect_imports(generated: &GeneratedType) -> Imports {
    let mut imports = Imports::new(generated.package.clone());
    imports.add_name(BUNDLE);

    let methods = generated.methods.iter().chain(&generated.companion);
    for method in methods {
        for param in &method.params {
            imports.add(&param.ty);
        }
        if let Returns::Value { ty, .. } = &method.returns {
            imports.add(ty);
        }
    }

    for helper in &generated.helpers {
        match helper {
            Helper::Insert(StorageStrategy::Direct(kind))
            | Helper::Extract(StorageStrategy::Direct(kind))
            | Helper::ExtractWithFallback(kind) => imports.add(&direct_type(*kind)),
            Helper::Insert(StorageStrategy::Object | StorageStrategy::ObjectList)
            | Helper::Extract(StorageStrategy::Object | StorageStrategy::ObjectList) => {
                imports.add_name(PARCELABLE)
            }
            Helper::Insert(StorageStrategy::Serializable)
            | Helper::Extract(StorageStrategy::Serializable) => imports.add_name(SERIALIZABLE),
            Helper::Insert(StorageStrategy::Enum) | Helper::Extract(StorageStrategy::Enum) => {}
        }
    }

    imports
}
