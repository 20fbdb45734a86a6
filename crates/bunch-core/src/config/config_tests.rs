#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn GeneratorConfig___default___has_expected_values() {
    let config = GeneratorConfig::default();

    assert_eq!(config.indent, 4);
    assert!(config.file_suffix.is_empty());
    assert!(config.emit_header);
}

#[test]
fn GeneratorConfig___from_empty_table___uses_defaults() {
    let config: GeneratorConfig = toml::from_str("").unwrap();

    assert_eq!(config, GeneratorConfig::default());
}

#[test]
fn GeneratorConfig___from_toml___overrides_given_fields() {
    let config: GeneratorConfig = toml::from_str(
        r#"
indent = 2
file_suffix = "_Bunch"
"#,
    )
    .unwrap();

    assert_eq!(config.indent, 2);
    assert_eq!(config.file_suffix, "_Bunch");
    assert!(config.emit_header);
}

#[test_case(0, "")]
#[test_case(2, "  ")]
#[test_case(4, "    ")]
fn GeneratorConfig___indent_unit___repeats_spaces(indent: usize, expected: &str) {
    let config = GeneratorConfig {
        indent,
        ..GeneratorConfig::default()
    };

    assert_eq!(config.indent_unit(), expected);
}

#[test_case("", "Vegetables.kt")]
#[test_case("_Bunch", "Vegetables_Bunch.kt")]
fn GeneratorConfig___file_name___appends_suffix(suffix: &str, expected: &str) {
    let config = GeneratorConfig {
        file_suffix: suffix.to_string(),
        ..GeneratorConfig::default()
    };

    assert_eq!(config.file_name("Vegetables"), expected);
}
