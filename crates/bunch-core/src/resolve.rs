//! Template resolution: one pass from manifest declarations to [`TemplateType`].
//!
//! Every fact the later stages need (declared type, abstractness, scope and
//! annotation parameters) is gathered into a single [`Member`] record while
//! walking the template's functions once.

use crate::error::{GenerationError, GenerationResult};
use crate::model::{Member, MemberScope, TemplateType};
use crate::naming::{is_identifier, is_identifier_prefix};
use crate::schema::{FunctionDecl, ItemAnnotation, TemplateDecl};
use crate::types::ClassTable;
use tracing::debug;

/// Resolves template declarations against a class table
pub struct Resolver<'a> {
    classes: &'a ClassTable,
}

impl<'a> Resolver<'a> {
    pub fn new(classes: &'a ClassTable) -> Self {
        Self { classes }
    }

    /// Resolve one template with all of its annotated members
    pub fn resolve(&self, decl: &TemplateDecl) -> GenerationResult<TemplateType> {
        let template = decl.class.as_str();

        if template.is_empty() {
            return Err(GenerationError::template(
                "<unnamed>",
                "template class name is empty",
            ));
        }

        let bunch = decl.bunch.as_ref().ok_or_else(|| {
            GenerationError::template(template, "missing @Bunch annotation")
        })?;

        if bunch.name.is_empty() {
            return Err(GenerationError::template(
                template,
                "@Bunch name must not be empty",
            ));
        }
        if !is_identifier(&bunch.name) {
            return Err(GenerationError::template(
                template,
                format!("@Bunch name \"{}\" is not a valid identifier", bunch.name),
            ));
        }
        check_prefixes(template, None, &bunch.setters)?;
        check_prefixes(template, None, &bunch.getters)?;

        let mut members = Vec::new();
        for function in &decl.functions {
            let Some(item) = &function.item else {
                debug!(template, function = %function.name, "Skipping function without @BunchItem");
                continue;
            };
            members.push(self.resolve_member(template, function, item)?);
        }

        debug!(template, members = members.len(), "Resolved template");

        Ok(TemplateType {
            class_name: decl.class.clone(),
            output_name: bunch.name.clone(),
            visibility: decl.visibility,
            setter_prefixes: bunch.setters.clone(),
            getter_prefixes: bunch.getters.clone(),
            members,
        })
    }

    fn resolve_member(
        &self,
        template: &str,
        function: &FunctionDecl,
        item: &ItemAnnotation,
    ) -> GenerationResult<Member> {
        let name = function.name.as_str();

        if !is_identifier(name) {
            return Err(GenerationError::member(
                template,
                name,
                "function name is not a valid identifier",
            ));
        }
        if !item.name.is_empty() && !is_identifier(&item.name) {
            return Err(GenerationError::member(
                template,
                name,
                format!("@BunchItem name \"{}\" is not a valid identifier", item.name),
            ));
        }
        check_prefixes(template, Some(name), &item.setters)?;
        check_prefixes(template, Some(name), &item.getters)?;

        let is_abstract = function.is_abstract();
        if function.scope == MemberScope::Companion && is_abstract {
            return Err(GenerationError::member(
                template,
                name,
                "companion object functions cannot be abstract",
            ));
        }

        let declared_type = self
            .classes
            .describe_str(&function.returns)
            .map_err(|e| GenerationError::member(template, name, e.to_string()))?;

        Ok(Member {
            declared_name: name.to_string(),
            declared_type,
            has_default_body: !is_abstract,
            scope: function.scope,
            override_name: item.name.clone(),
            override_key: item.tag.clone(),
            setter_prefixes: item.setters.clone(),
            getter_prefixes: item.getters.clone(),
        })
    }
}

fn check_prefixes(template: &str, member: Option<&str>, prefixes: &[String]) -> GenerationResult<()> {
    let Some(bad) = prefixes.iter().find(|p| !is_identifier_prefix(p)) else {
        return Ok(());
    };

    let reason = format!("prefix \"{bad}\" is not a valid identifier");
    Err(match member {
        Some(member) => GenerationError::member(template, member, reason),
        None => GenerationError::template(template, reason),
    })
}
