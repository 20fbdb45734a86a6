//! Output assembly: one [`GeneratedType`] per template.

use crate::classify::{DirectKind, GetterClass, StorageStrategy};
use crate::error::{GenerationError, GenerationResult};
use crate::model::{TemplateType, Visibility};
use crate::synth::{Body, Fallback, GeneratedMethod, MemberMethods, collect_method, from_method};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Private companion helper wrapping one container call family
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Helper {
    Insert(StorageStrategy),
    Extract(StorageStrategy),
    /// Typed read taking an inline fallback value
    ExtractWithFallback(DirectKind),
}

impl Helper {
    pub fn name(self) -> String {
        match self {
            Helper::Insert(strategy) => format!("insert{}", strategy.label()),
            Helper::Extract(strategy) => format!("extract{}", strategy.label()),
            Helper::ExtractWithFallback(kind) => format!("extract{}", kind.suffix()),
        }
    }

    /// The helper a method body calls, if any
    pub fn for_body(body: &Body) -> Option<Helper> {
        match body {
            Body::Store { strategy, .. } => Some(Helper::Insert(*strategy)),
            Body::Load {
                strategy, fallback, ..
            } => match (strategy, fallback) {
                (
                    StorageStrategy::Direct(kind),
                    Fallback::InlineZero | Fallback::InlineDefault(_),
                ) => Some(Helper::ExtractWithFallback(*kind)),
                _ => Some(Helper::Extract(*strategy)),
            },
            _ => None,
        }
    }
}

/// Storage facts for one member, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub member: String,
    pub key: String,
    pub strategy: StorageStrategy,
    pub getter_class: GetterClass,
}

/// A fully synthesized output type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedType {
    pub package: String,
    pub name: String,

    /// Qualified name of the template it was generated from
    pub template: String,

    pub visibility: Visibility,

    pub members: Vec<MemberSummary>,

    /// Instance setters, getters and assertions, then `collect`
    pub methods: Vec<GeneratedMethod>,

    /// Chainable methods of the nested `Assert` accumulator
    pub assert_methods: Vec<GeneratedMethod>,

    /// `from` and the per-setter static entry points
    pub companion: Vec<GeneratedMethod>,

    /// Strategy helpers actually used by this type
    pub helpers: BTreeSet<Helper>,
}

impl GeneratedType {
    /// Qualified name of the generated type
    pub fn qualified_name(&self) -> String {
        match self.package.as_str() {
            "" => self.name.clone(),
            pkg => format!("{pkg}.{}", self.name),
        }
    }

    /// Instance methods with the given name, overloads included
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a GeneratedMethod> {
        self.methods.iter().filter(move |m| m.name == name)
    }

    /// Companion methods with the given name
    pub fn companion_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a GeneratedMethod> {
        self.companion.iter().filter(move |m| m.name == name)
    }

    pub fn assert_method(&self, name: &str) -> Option<&GeneratedMethod> {
        self.assert_methods.iter().find(|m| m.name == name)
    }

    pub fn member(&self, name: &str) -> Option<&MemberSummary> {
        self.members.iter().find(|m| m.member == name)
    }
}

/// Compose member methods and boilerplate into the output type
pub fn assemble(template: &TemplateType, members: Vec<MemberMethods>) -> GenerationResult<GeneratedType> {
    let mut summaries = Vec::with_capacity(members.len());
    let mut methods = Vec::new();
    let mut assert_methods = Vec::new();
    let mut companion = vec![from_method()];
    let mut signatures = Signatures::default();

    for member in members {
        summaries.push(MemberSummary {
            member: member.member.clone(),
            key: member.key.clone(),
            strategy: member.strategy,
            getter_class: member.strategy.getter_class(),
        });

        let instance = member
            .setters
            .into_iter()
            .chain(member.getters)
            .chain(std::iter::once(member.assert));
        for method in instance {
            signatures.claim(template, &member.member, &method)?;
            methods.push(method);
        }

        assert_methods.push(member.assert_chain);
        companion.extend(member.entries);
    }

    let collect = collect_method();
    signatures.claim(template, "collect", &collect)?;
    methods.push(collect);

    let helpers = methods
        .iter()
        .filter_map(|m| Helper::for_body(&m.body))
        .collect();

    Ok(GeneratedType {
        package: template.package().to_string(),
        name: template.output_name.clone(),
        template: template.class_name.clone(),
        visibility: template.visibility,
        members: summaries,
        methods,
        assert_methods,
        companion,
        helpers,
    })
}

/// Instance method signatures claimed so far, with the member owning each
#[derive(Default)]
struct Signatures {
    owners: BTreeMap<(String, Vec<String>), String>,
}

impl Signatures {
    fn claim(
        &mut self,
        template: &TemplateType,
        member: &str,
        method: &GeneratedMethod,
    ) -> GenerationResult<()> {
        let params = method.params.iter().map(|p| p.ty.to_string()).collect();
        let signature = (method.name.clone(), params);

        if let Some(owner) = self.owners.get(&signature) {
            return Err(GenerationError::member(
                &template.class_name,
                member,
                format!("generated method {} clashes with one generated for {owner}", method.name),
            ));
        }
        self.owners.insert(signature, member.to_string());
        Ok(())
    }
}
