//! Generate command implementation

use crate::codegen::generate_kotlin;
use crate::manifest;
use anyhow::Result;
use bunch_core::generate_manifest;
use bunch_logging::DiagnosticSink;
use std::path::{Path, PathBuf};

/// Generate Kotlin sources for every template in the manifest.
///
/// Successful templates are written even when others fail; the command
/// still fails in that case.
pub fn run(input: &Path, output: &Path) -> Result<Vec<PathBuf>> {
    println!("Generating from manifest: {}", input.display());

    let manifest = manifest::load(input)?;
    let generation = generate_manifest(&manifest);

    let written = generate_kotlin(&generation.outputs, output, &manifest.generator)?;
    for path in &written {
        println!("✓ {}", path.display());
    }

    let sink = DiagnosticSink::global();
    println!(
        "\nGenerated {} file(s), {} failed template(s), {} warning(s)",
        written.len(),
        generation.failures.len(),
        sink.warning_count()
    );

    manifest::ensure_success(&generation)?;
    Ok(written)
}
