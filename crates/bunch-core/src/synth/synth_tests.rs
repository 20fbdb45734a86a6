#![allow(non_snake_case)]

use super::*;
use crate::classify::DirectKind;
use test_case::test_case;

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

fn synth(member: &Member, strategy: StorageStrategy) -> GenerationResult<MemberMethods> {
    let template = template();
    let naming = Naming::resolve(&template, member);
    synthesize_member(&template, member, &naming, strategy)
}

fn with_default(member: Member) -> Member {
    Member {
        has_default_body: true,
        scope: MemberScope::Companion,
        ..member
    }
}

fn getter_shapes(methods: &MemberMethods) -> Vec<(String, bool, Fallback)> {
    methods
        .getters
        .iter()
        .map(|m| match (&m.returns, &m.body) {
            (Returns::Value { nullable, .. }, Body::Load { fallback, .. }) => {
                (m.name.clone(), *nullable, fallback.clone())
            }
            other => panic!("unexpected getter shape {other:?}"),
        })
        .collect()
}

fn pickles_default() -> DefaultCall {
    DefaultCall {
        owner: "VegetableInfo".into(),
        function: "pickles".into(),
    }
}

#[test]
fn synthesize_member___vegetables_tomatoes___uses_override_names() {
    let tomatoes = Member {
        override_name: "tomatoes".into(),
        override_key: "ripe_tomatoes".into(),
        setter_prefixes: vec!["withABagOf".into()],
        getter_prefixes: vec!["squeeze".into()],
        ..Member::new("tomatoes", TypeDescriptor::named("kotlin.Int"))
    };

    let methods = synth(&tomatoes, StorageStrategy::Direct(DirectKind::Int)).unwrap();

    assert_eq!(methods.key, "ripe_tomatoes");
    assert_eq!(methods.setters.len(), 1);
    assert_eq!(methods.setters[0].name, "withABagOfTomatoes");
    assert_eq!(methods.setters[0].params[0].name, "tomatoes");
    assert_eq!(
        methods.setters[0].body,
        Body::Store {
            key: "ripe_tomatoes".into(),
            strategy: StorageStrategy::Direct(DirectKind::Int),
            param: "tomatoes".into(),
        }
    );
    assert_eq!(
        getter_shapes(&methods),
        vec![("squeezeTomatoes".into(), false, Fallback::InlineZero)]
    );
    assert_eq!(methods.assert.name, "hasTomatoes");
}

#[test]
fn synthesize_member___index_with_three_prefixes___generates_three_identical_setters() {
    let index = Member {
        override_name: "myIndex".into(),
        setter_prefixes: vec!["put".into(), "add".into(), "seasonWith".into()],
        ..Member::new("index", TypeDescriptor::named("kotlin.Int"))
    };

    let methods = synth(&index, StorageStrategy::Direct(DirectKind::Int)).unwrap();

    let names: Vec<_> = methods.setters.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["putMyIndex", "addMyIndex", "seasonWithMyIndex"]);
    assert!(methods.setters.iter().all(|m| m.body == methods.setters[0].body));
    assert_eq!(methods.entries.len(), 3);
    assert_eq!(
        methods.entries[2].body,
        Body::Entry {
            setter: "seasonWithMyIndex".into(),
            param: "myIndex".into(),
        }
    );
}

#[test]
fn synthesize_member___scalar_with_default___falls_back_inline_to_default() {
    let count = with_default(Member::new("pickles", TypeDescriptor::named("kotlin.Int")));

    let methods = synth(&count, StorageStrategy::Direct(DirectKind::Int)).unwrap();

    assert_eq!(
        getter_shapes(&methods),
        vec![(
            "getPickles".into(),
            false,
            Fallback::InlineDefault(pickles_default())
        )]
    );
}

#[test_case(DirectKind::String)]
#[test_case(DirectKind::CharSequence)]
fn synthesize_member___fallback_capable_without_default___nullable_and_throwing(kind: DirectKind) {
    let member = Member::new("cabbage", TypeDescriptor::named("kotlin.String"));

    let methods = synth(&member, StorageStrategy::Direct(kind)).unwrap();

    assert_eq!(
        getter_shapes(&methods),
        vec![
            ("getCabbage".into(), true, Fallback::OrNull),
            ("getCabbageOrThrow".into(), false, Fallback::OrThrow),
        ]
    );
}

#[test]
fn synthesize_member___string_with_default___single_non_null_getter() {
    let member = with_default(Member::new("pickles", TypeDescriptor::named("kotlin.String")));

    let methods = synth(&member, StorageStrategy::Direct(DirectKind::String)).unwrap();

    assert_eq!(
        getter_shapes(&methods),
        vec![(
            "getPickles".into(),
            false,
            Fallback::InlineDefault(pickles_default())
        )]
    );
}

#[test_case(StorageStrategy::Direct(DirectKind::IntArray))]
#[test_case(StorageStrategy::Direct(DirectKind::Bundle))]
#[test_case(StorageStrategy::ObjectList)]
#[test_case(StorageStrategy::Enum)]
#[test_case(StorageStrategy::Object)]
#[test_case(StorageStrategy::Serializable)]
fn synthesize_member___nullable_without_default___two_getters(strategy: StorageStrategy) {
    let member = Member::new("pickles", TypeDescriptor::named("com.example.Thing"));

    let methods = synth(&member, strategy).unwrap();

    assert_eq!(
        getter_shapes(&methods),
        vec![
            ("getPickles".into(), true, Fallback::OrNull),
            ("getPicklesOrThrow".into(), false, Fallback::OrThrow),
        ]
    );
}

#[test_case(StorageStrategy::Direct(DirectKind::StringArray))]
#[test_case(StorageStrategy::Enum)]
#[test_case(StorageStrategy::Serializable)]
fn synthesize_member___nullable_with_default___three_getters(strategy: StorageStrategy) {
    let member = with_default(Member::new("pickles", TypeDescriptor::named("com.example.Thing")));

    let methods = synth(&member, strategy).unwrap();

    assert_eq!(
        getter_shapes(&methods),
        vec![
            ("getPickles".into(), false, Fallback::OrDefault(pickles_default())),
            ("getPicklesOrNull".into(), true, Fallback::OrNull),
            ("getPicklesOrThrow".into(), false, Fallback::OrThrow),
        ]
    );
}

#[test]
fn synthesize_member___getters_repeat_per_prefix() {
    let member = Member {
        getter_prefixes: vec!["cut".into(), "chop".into()],
        ..Member::new("cabbage", TypeDescriptor::named("kotlin.String"))
    };

    let methods = synth(&member, StorageStrategy::Direct(DirectKind::String)).unwrap();

    let names: Vec<_> = methods.getters.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["cutCabbage", "cutCabbageOrThrow", "chopCabbage", "chopCabbageOrThrow"]
    );
}

#[test]
fn synthesize_member___class_scope_default___is_not_reachable() {
    let member = Member {
        has_default_body: true,
        ..Member::new("pickles", TypeDescriptor::named("kotlin.Int"))
    };

    let err = synth(&member, StorageStrategy::Direct(DirectKind::Int)).unwrap_err();

    assert_eq!(
        err,
        GenerationError::DefaultNotReachable {
            template: "com.example.VegetableInfo".into(),
            member: "pickles".into(),
        }
    );
}

#[test]
fn synthesize_member___assert_methods___record_storage_key() {
    let member = Member {
        override_name: "renamed".into(),
        ..Member::new("cabbage", TypeDescriptor::named("kotlin.String"))
    };

    let methods = synth(&member, StorageStrategy::Direct(DirectKind::String)).unwrap();

    assert_eq!(methods.assert.name, "hasRenamed");
    assert_eq!(methods.assert.returns, Returns::Assert);
    assert_eq!(methods.assert.body, Body::Assert { key: "tag_cabbage".into() });
    assert_eq!(methods.assert_chain.name, "hasRenamed");
    assert_eq!(
        methods.assert_chain.body,
        Body::AssertChain { key: "tag_cabbage".into() }
    );
}

#[test]
fn from_method___takes_bundle_and_returns_receiver() {
    let from = from_method();

    assert_eq!(from.name, "from");
    assert_eq!(from.params[0].ty.name, BUNDLE);
    assert_eq!(from.returns, Returns::Receiver);
    assert_eq!(collect_method().returns, Returns::Container);
}
