//! Generation entry points.
//!
//! Data flows one way: resolve, then name and classify each member,
//! synthesize its methods, and assemble the output type. Templates share
//! no state, so a failing template never affects the others.

use crate::assemble::{GeneratedType, assemble};
use crate::classify::classify_member;
use crate::error::{GenerationError, GenerationResult};
use crate::model::TemplateType;
use crate::naming::Naming;
use crate::resolve::Resolver;
use crate::schema::TemplateManifest;
use crate::synth::synthesize_member;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{error, info};

/// Generate the output type for one resolved template
pub fn generate(template: &TemplateType) -> GenerationResult<GeneratedType> {
    let mut keys: BTreeMap<String, &str> = BTreeMap::new();
    let mut members = Vec::with_capacity(template.members.len());

    for member in &template.members {
        let naming = Naming::resolve(template, member);

        if let Some(first) = keys.get(naming.key.as_str()) {
            return Err(GenerationError::DuplicateKey {
                template: template.class_name.clone(),
                key: naming.key,
                first: first.to_string(),
                second: member.declared_name.clone(),
            });
        }
        keys.insert(naming.key.clone(), &member.declared_name);

        let strategy = classify_member(template, member)?;
        members.push(synthesize_member(template, member, &naming, strategy)?);
    }

    assemble(template, members)
}

/// Outcome of generating every template in a manifest
#[derive(Debug, Default)]
pub struct Generation {
    /// Successfully generated types, in manifest order
    pub outputs: Vec<GeneratedType>,

    /// One error per failed template
    pub failures: Vec<GenerationError>,
}

impl Generation {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolve and generate every template, isolating failures per template
pub fn generate_manifest(manifest: &TemplateManifest) -> Generation {
    let classes = manifest.class_table();
    let resolver = Resolver::new(&classes);

    let mut generation = Generation::default();
    let mut claimed: BTreeMap<String, String> = BTreeMap::new();
    let template_classes: BTreeSet<&str> =
        manifest.templates.iter().map(|decl| decl.class.as_str()).collect();

    for decl in &manifest.templates {
        let result = resolver.resolve(decl).and_then(|template| {
            let output = template.output_qualified_name();
            if template_classes.contains(output.as_str()) || classes.get(&output).is_some() {
                return Err(GenerationError::template(
                    &template.class_name,
                    format!("output type {output} has the name of a declared class"),
                ));
            }
            if let Some(previous) = claimed.get(&output) {
                return Err(GenerationError::DuplicateOutput {
                    template: template.class_name.clone(),
                    output,
                    previous: previous.clone(),
                });
            }
            generate(&template)
        });

        match result {
            Ok(generated) => {
                info!(
                    template = %generated.template,
                    output = %generated.qualified_name(),
                    methods = generated.methods.len(),
                    "Generated type"
                );
                claimed.insert(generated.qualified_name(), generated.template.clone());
                generation.outputs.push(generated);
            }
            Err(err) => {
                error!(
                    template = err.template_name().unwrap_or(&decl.class),
                    member = err.member_name().unwrap_or(""),
                    kind = err.kind(),
                    "{err}"
                );
                generation.failures.push(err);
            }
        }
    }

    generation
}
