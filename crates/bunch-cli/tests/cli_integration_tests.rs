//! Integration tests for the bunch binary.
//!
//! Each test writes a manifest into a temporary directory and runs the
//! compiled binary against it.

#![allow(non_snake_case)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const VEGETABLES: &str = r#"
[[class]]
name = "com.example.ChildParcelable"
interfaces = ["android.os.Parcelable"]

[[template]]
class = "com.example.VegetableInfo"
bunch = { name = "Vegetables" }

[[template.function]]
name = "tomatoes"
returns = "Int"
item = { tag = "ripe_tomatoes", setters = ["withABagOf"], getters = ["squeeze"] }

[[template.function]]
name = "children"
returns = "List<ChildParcelable>"
item = {}
"#;

const DUPLICATE_KEY: &str = r#"
[[template]]
class = "com.example.Clash"
bunch = { name = "ClashBunch" }

[[template.function]]
name = "first"
returns = "Int"
item = { tag = "same" }

[[template.function]]
name = "second"
returns = "Long"
item = { tag = "same" }
"#;

fn bunch(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bunch"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn manifest(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("bunch.toml");
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// generate
// =============================================================================

#[test]
fn generate___valid_manifest___writes_kotlin_file() {
    let dir = TempDir::new().unwrap();
    let input = manifest(&dir, VEGETABLES);
    let output = dir.path().join("generated");

    let result = bunch(&[
        "generate",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);

    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    let code = fs::read_to_string(output.join("com/example/Vegetables.kt")).unwrap();
    assert!(code.contains("fun withABagOfTomatoes(tomatoes: Int): Vegetables"));
    assert!(code.contains("fun squeezeTomatoes(): Int"));
    assert!(code.contains("fun getChildrenOrThrow(): List<ChildParcelable>"));
}

#[test]
fn generate___duplicate_key___exits_non_zero_and_reports_member() {
    let dir = TempDir::new().unwrap();
    let input = manifest(&dir, DUPLICATE_KEY);
    let output = dir.path().join("generated");

    let result = bunch(&[
        "generate",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("com.example.Clash.second"), "{stderr}");
    assert!(!output.join("com/example/ClashBunch.kt").exists());
}

#[test]
fn generate___missing_manifest___exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");

    let result = bunch(&["generate", "-i", missing.to_str().unwrap(), "-o", "unused"]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Failed to read manifest"));
}

// =============================================================================
// check and describe
// =============================================================================

#[test]
fn check___valid_manifest___reports_generated_type() {
    let dir = TempDir::new().unwrap();
    let input = manifest(&dir, VEGETABLES);

    let result = bunch(&["check", "-i", input.to_str().unwrap()]);

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("com.example.Vegetables"));
    assert!(stdout.contains("Manifest is valid!"));
}

#[test]
fn describe___valid_manifest___prints_json() {
    let dir = TempDir::new().unwrap();
    let input = manifest(&dir, VEGETABLES);

    let result = bunch(&["--log-level", "error", "describe", "-i", input.to_str().unwrap()]);

    assert!(result.status.success());
    let document: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(document["types"][0]["name"], "Vegetables");
    assert_eq!(document["types"][0]["members"][0]["key"], "ripe_tomatoes");
    assert!(document["failures"].as_array().unwrap().is_empty());
}

#[test]
fn cli___unknown_log_level___is_rejected() {
    let result = bunch(&["--log-level", "loud", "check"]);

    assert!(!result.status.success());
}
