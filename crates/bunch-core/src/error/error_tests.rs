#![allow(non_snake_case)]

use super::*;

#[test]
fn GenerationError___template_resolution___displays_without_member() {
    let err = GenerationError::template("com.example.Args", "missing @Bunch annotation");

    assert_eq!(err.to_string(), "com.example.Args: missing @Bunch annotation");
}

#[test]
fn GenerationError___member_resolution___displays_member() {
    let err = GenerationError::member("com.example.Args", "index", "unknown class Foo");

    assert_eq!(err.to_string(), "com.example.Args.index: unknown class Foo");
}

#[test]
fn GenerationError___unsupported_type___names_type_and_member() {
    let err = GenerationError::UnsupportedType {
        template: "com.example.Args".into(),
        member: "handle".into(),
        type_name: "com.example.Handle".into(),
    };

    let msg = err.to_string();
    assert!(msg.contains("handle"));
    assert!(msg.contains("com.example.Handle"));
}

#[test]
fn GenerationError___duplicate_key___names_both_members() {
    let err = GenerationError::DuplicateKey {
        template: "com.example.Args".into(),
        key: "shared".into(),
        first: "left".into(),
        second: "right".into(),
    };

    assert_eq!(
        err.to_string(),
        "com.example.Args.right: key \"shared\" is already used by left"
    );
}

#[test]
fn GenerationError___from_toml_error___becomes_manifest() {
    let toml_err = toml::from_str::<toml::Table>("[[broken").unwrap_err();

    let err: GenerationError = toml_err.into();

    assert!(matches!(err, GenerationError::Manifest(_)));
    assert!(err.template_name().is_none());
}

#[test]
fn GenerationError___duplicate_key___member_is_second_declaration() {
    let err = GenerationError::DuplicateKey {
        template: "T".into(),
        key: "k".into(),
        first: "a".into(),
        second: "b".into(),
    };

    assert_eq!(err.member_name(), Some("b"));
}
