#![allow(non_snake_case)]

use super::*;

#[test]
fn Bundle___clone___aliases_storage() {
    let bundle = Bundle::new();
    let alias = bundle.clone();

    alias.put("count", Value::Int(3)).unwrap();

    assert_eq!(bundle.get("count"), Some(Value::Int(3)));
    assert!(bundle.same_as(&alias));
}

#[test]
fn Bundle___duplicate___is_independent() {
    let bundle = Bundle::new();
    bundle.put("count", Value::Int(3)).unwrap();

    let copy = bundle.duplicate();
    copy.put("count", Value::Int(4)).unwrap();
    copy.put("extra", Value::Boolean(true)).unwrap();

    assert_eq!(bundle.get("count"), Some(Value::Int(3)));
    assert!(!bundle.contains_key("extra"));
    assert!(!bundle.same_as(&copy));
}

#[test]
fn Bundle___duplicate___shares_nested_bundles() {
    let nested = Bundle::new();
    nested.put("inner", Value::Int(1)).unwrap();
    let bundle = Bundle::new();
    bundle.put("nested", Value::Bundle(nested.clone())).unwrap();

    let copy = bundle.duplicate();
    let Some(Value::Bundle(copied_nested)) = copy.get("nested") else {
        panic!("nested bundle missing");
    };
    copied_nested.put("inner", Value::Int(2)).unwrap();

    assert!(copied_nested.same_as(&nested));
    assert_eq!(nested.get("inner"), Some(Value::Int(2)));
}

#[test]
fn Bundle___duplicate_of_self_containing_bundle___terminates() {
    let bundle = Bundle::new();
    bundle.put("self", Value::Bundle(bundle.clone())).unwrap();

    let copy = bundle.duplicate();

    let Some(Value::Bundle(inner)) = copy.get("self") else {
        panic!("self entry missing");
    };
    assert!(inner.same_as(&bundle));
    assert!(!copy.same_as(&bundle));
    assert_eq!(copy.keys(), vec!["self".to_string()]);
}

#[test]
fn Bundle___empty___is_shared_singleton() {
    let first = Bundle::empty();
    let second = Bundle::empty();

    assert!(first.same_as(&second));
    assert!(first.is_empty_singleton());
    assert!(!Bundle::new().is_empty_singleton());
}

#[test]
fn Bundle___empty___rejects_writes() {
    let empty = Bundle::empty();

    assert_eq!(
        empty.put("count", Value::Int(1)),
        Err(RuntimeError::ImmutableContainer)
    );
    assert_eq!(empty.remove("count"), Err(RuntimeError::ImmutableContainer));
    assert!(empty.is_empty());
}

#[test]
fn Bundle___duplicate_of_empty___is_writable() {
    let fresh = Bundle::empty().duplicate();

    fresh.put("count", Value::Int(1)).unwrap();

    assert!(!fresh.is_empty_singleton());
    assert!(Bundle::empty().is_empty());
}

#[test]
fn Bundle___eq___compares_contents() {
    let a = Bundle::new();
    let b = Bundle::new();
    a.put("name", Value::from("x")).unwrap();
    b.put("name", Value::from("x")).unwrap();

    assert_eq!(a, b);

    b.put("other", Value::Int(0)).unwrap();
    assert_ne!(a, b);
}

#[test]
fn Bundle___keys___are_sorted() {
    let bundle = Bundle::new();
    bundle.put("b", Value::Int(2)).unwrap();
    bundle.put("a", Value::Int(1)).unwrap();

    assert_eq!(bundle.keys(), vec!["a", "b"]);
    assert_eq!(bundle.len(), 2);
}

#[test]
fn Bundle___remove___returns_previous_value() {
    let bundle = Bundle::new();
    bundle.put("a", Value::Int(1)).unwrap();

    assert_eq!(bundle.remove("a").unwrap(), Some(Value::Int(1)));
    assert_eq!(bundle.remove("a").unwrap(), None);
}

#[test]
fn Bundle___shared_across_threads___sees_all_writes() {
    let bundle = Bundle::new();

    std::thread::scope(|scope| {
        for i in 0..4 {
            let handle = bundle.clone();
            scope.spawn(move || {
                handle.put(format!("key{i}"), Value::Int(i)).unwrap();
            });
        }
    });

    assert_eq!(bundle.len(), 4);
}
