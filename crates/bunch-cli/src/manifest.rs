//! Manifest loading and the `check` and `describe` commands

use anyhow::{Context, Result};
use bunch_core::{Generation, GenerationError, TemplateManifest, generate_manifest};
use serde_json::json;
use std::path::Path;

/// Load a template manifest from a file
pub fn load(path: &Path) -> Result<TemplateManifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {path:?}"))?;

    TemplateManifest::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {path:?}"))
}

/// Check command implementation
pub fn check(path: &Path) -> Result<()> {
    println!("Checking manifest: {}", path.display());

    let manifest = load(path)?;
    let generation = generate_manifest(&manifest);

    for generated in &generation.outputs {
        println!(
            "✓ {} from {} ({} members, {} methods)",
            generated.qualified_name(),
            generated.template,
            generated.members.len(),
            generated.methods.len()
        );
    }
    for failure in &generation.failures {
        println!("✗ {failure}");
    }

    ensure_success(&generation)?;
    println!("\nManifest is valid!");

    Ok(())
}

/// Describe command implementation
pub fn describe(path: &Path) -> Result<()> {
    let manifest = load(path)?;
    let generation = generate_manifest(&manifest);

    let document = describe_json(&generation);
    println!(
        "{}",
        serde_json::to_string_pretty(&document).context("Failed to serialize description")?
    );

    ensure_success(&generation)
}

/// JSON document listing every generated type and every failure
pub fn describe_json(generation: &Generation) -> serde_json::Value {
    let failures: Vec<serde_json::Value> = generation.failures.iter().map(failure_json).collect();

    json!({
        "types": generation.outputs,
        "failures": failures,
    })
}

fn failure_json(failure: &GenerationError) -> serde_json::Value {
    json!({
        "kind": failure.kind(),
        "template": failure.template_name(),
        "member": failure.member_name(),
        "message": failure.to_string(),
    })
}

/// Fail if any template failed to generate
pub fn ensure_success(generation: &Generation) -> Result<()> {
    if !generation.is_success() {
        anyhow::bail!(
            "{} of {} template(s) failed to generate",
            generation.failures.len(),
            generation.failures.len() + generation.outputs.len()
        );
    }
    Ok(())
}
