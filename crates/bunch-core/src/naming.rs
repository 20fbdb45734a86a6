//! Naming rules for generated accessors.
//!
//! | Input | Rule | Output |
//! |-------|------|--------|
//! | override name | non-empty wins over the declared name | property name |
//! | override key | non-empty wins over `tag_` + declared name | storage key |
//! | member prefixes | non-empty wins over template prefixes, then `with` / `get` | accessor prefixes |
//! | prefix + property | [`accessor_name`] | `withABagOfTomatoes` |
//!
//! The storage key is derived from the declared name, never the override
//! name, so renaming an accessor keeps existing bundles readable.

use crate::model::{Member, TemplateType};
use serde::Serialize;

pub const DEFAULT_SETTER_PREFIX: &str = "with";
pub const DEFAULT_GETTER_PREFIX: &str = "get";
pub const KEY_PREFIX: &str = "tag_";
pub const ASSERT_PREFIX: &str = "has";
pub const OR_THROW_SUFFIX: &str = "OrThrow";
pub const OR_NULL_SUFFIX: &str = "OrNull";

/// Kotlin hard keywords, which cannot name a function or parameter
const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Resolved names for one member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Naming {
    /// Effective property name, also the setter parameter name
    pub property: String,

    /// Key under which the value is stored
    pub key: String,

    pub setter_prefixes: Vec<String>,

    pub getter_prefixes: Vec<String>,
}

impl Naming {
    /// Apply the override-over-convention rules to a member
    pub fn resolve(template: &TemplateType, member: &Member) -> Self {
        let property = if member.override_name.is_empty() {
            member.declared_name.clone()
        } else {
            member.override_name.clone()
        };

        let key = if member.override_key.is_empty() {
            format!("{KEY_PREFIX}{}", member.declared_name)
        } else {
            member.override_key.clone()
        };

        Self {
            property,
            key,
            setter_prefixes: cascade(
                &member.setter_prefixes,
                &template.setter_prefixes,
                DEFAULT_SETTER_PREFIX,
            ),
            getter_prefixes: cascade(
                &member.getter_prefixes,
                &template.getter_prefixes,
                DEFAULT_GETTER_PREFIX,
            ),
        }
    }

    /// Setter names, one per prefix
    pub fn setter_names(&self) -> Vec<String> {
        self.setter_prefixes
            .iter()
            .map(|p| accessor_name(p, &self.property))
            .collect()
    }

    /// Plain getter names, one per prefix
    pub fn getter_names(&self) -> Vec<String> {
        self.getter_prefixes
            .iter()
            .map(|p| accessor_name(p, &self.property))
            .collect()
    }

    /// Name of the presence assertion
    pub fn assert_name(&self) -> String {
        accessor_name(ASSERT_PREFIX, &self.property)
    }
}

/// First non-empty list wins; duplicates keep their first position
fn cascade(member: &[String], template: &[String], convention: &str) -> Vec<String> {
    let chosen: Vec<String> = if !member.is_empty() {
        member.to_vec()
    } else if !template.is_empty() {
        template.to_vec()
    } else {
        vec![convention.to_string()]
    };

    let mut unique = Vec::with_capacity(chosen.len());
    for prefix in chosen {
        if !unique.contains(&prefix) {
            unique.push(prefix);
        }
    }
    unique
}

/// Build an accessor name from a prefix and a property name.
///
/// # Examples
///
/// ```
/// use bunch_core::naming::accessor_name;
///
/// assert_eq!(accessor_name("withABagOf", "tomatoes"), "withABagOfTomatoes");
/// assert_eq!(accessor_name("has", "myIndex"), "hasMyIndex");
/// ```
pub fn accessor_name(prefix: &str, property: &str) -> String {
    format!("{prefix}{}", capitalize(property))
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use bunch_core::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize("world"), "World");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Check that a string can be used as a Kotlin function or parameter name
pub fn is_identifier(s: &str) -> bool {
    is_identifier_prefix(s) && !KEYWORDS.contains(&s)
}

/// Check that a string can start a Kotlin name.
///
/// Keywords are allowed: `do` is not a name, but `doIndex` is.
pub fn is_identifier_prefix(s: &str) -> bool {
    let mut chars = s.chars();
    let valid_start = match chars.next() {
        Some(first) => first.is_alphabetic() || first == '_',
        None => false,
    };

    valid_start && chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::types::TypeDescriptor;
    use proptest::prelude::*;

    fn template() -> TemplateType {
        TemplateType {
            class_name: "com.example.VegetableInfo".into(),
            output_name: "Vegetables".into(),
            visibility: Default::default(),
            setter_prefixes: vec![],
            getter_prefixes: vec![],
            members: vec![],
        }
    }

    fn member(name: &str) -> Member {
        Member::new(name, TypeDescriptor::named("kotlin.Int"))
    }

    #[test]
    fn capitalize___capitalizes_first_letter() {
        assert_eq!(capitalize("hello"), "Hello");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn capitalize___preserves_rest_of_string() {
        assert_eq!(capitalize("myIndex"), "MyIndex");
        assert_eq!(capitalize("ALLCAPS"), "ALLCAPS");
        assert_eq!(capitalize("_under"), "_under");
    }

    #[test]
    fn resolve___no_overrides___uses_conventions() {
        let naming = Naming::resolve(&template(), &member("pickles"));

        assert_eq!(naming.property, "pickles");
        assert_eq!(naming.key, "tag_pickles");
        assert_eq!(naming.setter_names(), vec!["withPickles"]);
        assert_eq!(naming.getter_names(), vec!["getPickles"]);
        assert_eq!(naming.assert_name(), "hasPickles");
    }

    #[test]
    fn resolve___all_overrides___uses_annotation_values() {
        let tomatoes = Member {
            override_name: "tomatoes".into(),
            override_key: "ripe_tomatoes".into(),
            setter_prefixes: vec!["withABagOf".into()],
            getter_prefixes: vec!["squeeze".into()],
            ..member("tomatoes")
        };

        let naming = Naming::resolve(&template(), &tomatoes);

        assert_eq!(naming.key, "ripe_tomatoes");
        assert_eq!(naming.setter_names(), vec!["withABagOfTomatoes"]);
        assert_eq!(naming.getter_names(), vec!["squeezeTomatoes"]);
    }

    #[test]
    fn resolve___override_name___keeps_declared_key() {
        let index = Member {
            override_name: "myIndex".into(),
            setter_prefixes: vec!["put".into(), "add".into(), "seasonWith".into()],
            ..member("index")
        };

        let naming = Naming::resolve(&template(), &index);

        assert_eq!(naming.key, "tag_index");
        assert_eq!(
            naming.setter_names(),
            vec!["putMyIndex", "addMyIndex", "seasonWithMyIndex"]
        );
        assert_eq!(naming.assert_name(), "hasMyIndex");
    }

    #[test]
    fn resolve___template_prefixes___apply_when_member_has_none() {
        let template = TemplateType {
            setter_prefixes: vec!["put".into()],
            getter_prefixes: vec!["read".into()],
            ..template()
        };
        let cabbage = Member {
            getter_prefixes: vec!["cut".into()],
            ..member("cabbage")
        };

        let naming = Naming::resolve(&template, &cabbage);

        assert_eq!(naming.setter_names(), vec!["putCabbage"]);
        assert_eq!(naming.getter_names(), vec!["cutCabbage"]);
    }

    #[test]
    fn resolve___repeated_prefix___generates_once() {
        let repeated = Member {
            setter_prefixes: vec!["put".into(), "put".into(), "with".into()],
            ..member("count")
        };

        let naming = Naming::resolve(&template(), &repeated);

        assert_eq!(naming.setter_names(), vec!["putCount", "withCount"]);
    }

    #[test]
    fn is_identifier___accepts_kotlin_names() {
        assert!(is_identifier("withABagOf"));
        assert!(is_identifier("_hidden"));
        assert!(is_identifier("item1"));
    }

    #[test]
    fn is_identifier___rejects_invalid_names() {
        assert!(!is_identifier(""));
        assert!(!is_identifier("1item"));
        assert!(!is_identifier("with-dash"));
        assert!(!is_identifier("fun"));
        assert!(!is_identifier("has space"));
    }

    #[test]
    fn is_identifier_prefix___allows_keywords_but_not_invalid_text() {
        assert!(is_identifier_prefix("do"));
        assert!(is_identifier_prefix("in"));
        assert!(!is_identifier_prefix("with-"));
        assert!(!is_identifier_prefix(""));
    }

    proptest! {
        #[test]
        fn resolve___key_ignores_override_name(
            declared in "[a-z][a-zA-Z0-9]{0,12}",
            renamed in "[a-z][a-zA-Z0-9]{0,12}",
        ) {
            let renamed_member = Member {
                override_name: renamed.clone(),
                ..member(&declared)
            };

            let naming = Naming::resolve(&template(), &renamed_member);

            prop_assert_eq!(naming.key, format!("tag_{declared}"));
            prop_assert_eq!(naming.property, renamed);
        }

        #[test]
        fn resolve___override_key_always_wins(
            declared in "[a-z][a-zA-Z0-9]{0,12}",
            key in "[a-z_]{1,16}",
        ) {
            let keyed = Member {
                override_key: key.clone(),
                ..member(&declared)
            };

            prop_assert_eq!(Naming::resolve(&template(), &keyed).key, key);
        }

        #[test]
        fn accessor_name___only_first_character_changes(
            prefix in "[a-z]{1,8}",
            property in "[a-z][a-zA-Z0-9]{0,12}",
        ) {
            let name = accessor_name(&prefix, &property);

            prop_assert!(name.starts_with(&prefix));
            prop_assert_eq!(&name[prefix.len() + 1..], &property[1..]);
        }
    }
}
