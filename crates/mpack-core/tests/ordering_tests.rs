use mpack_core::{decode, sort_values, Kind, MsgPackError, Value};
use std::cmp::Ordering;

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn mixed_keys_sort_numbers_first() {
    let mut keys: Vec<Value> = vec![
        "a".into(),
        9.into(),
        "z".into(),
        "!".into(),
        1.into(),
        "b".into(),
    ];
    sort_values(&mut keys).unwrap();
    let expected: Vec<Value> = vec![
        1.into(),
        9.into(),
        "!".into(),
        "a".into(),
        "b".into(),
        "z".into(),
    ];
    assert_eq!(keys, expected);
    // Stronger than ==: check the kinds too
    assert!(matches!(keys[0], Value::Int(1)));
    assert!(matches!(keys[2], Value::String(ref s) if s == "!"));
}

#[test]
fn numbers_compare_across_representations() {
    assert_eq!(Value::from(1).compare(&Value::from(1.5)).unwrap(), Ordering::Less);
    assert_eq!(Value::from(2.0f32).compare(&Value::from(2)).unwrap(), Ordering::Equal);
    assert_eq!(
        Value::unsigned(u64::MAX).compare(&Value::from(i64::MAX)).unwrap(),
        Ordering::Greater
    );
    assert_eq!(Value::from(-1).compare(&Value::unsigned(0)).unwrap(), Ordering::Less);
}

#[test]
fn large_integer_against_float_is_exact() {
    // 2^53 + 1 is not representable as f64; a lossy comparison would say Equal
    let big = Value::from((1i64 << 53) + 1);
    let float = Value::from(9_007_199_254_740_992.0f64);
    assert_eq!(big.compare(&float).unwrap(), Ordering::Greater);
    assert_ne!(big, float);
}

#[test]
fn fractional_floats_against_integers() {
    assert_eq!(Value::from(-1).compare(&Value::from(-1.5)).unwrap(), Ordering::Greater);
    assert_eq!(Value::from(-2).compare(&Value::from(-1.5)).unwrap(), Ordering::Less);
    assert_eq!(Value::from(i64::MAX).compare(&Value::from(1e300)).unwrap(), Ordering::Less);
    assert_eq!(Value::from(i64::MIN).compare(&Value::from(-1e300)).unwrap(), Ordering::Greater);
}

#[test]
fn strings_compare_by_bytes() {
    assert_eq!(Value::from("B").compare(&Value::from("a")).unwrap(), Ordering::Less);
    assert_eq!(Value::from("ab").compare(&Value::from("abc")).unwrap(), Ordering::Less);
    assert_eq!(Value::from("é").compare(&Value::from("z")).unwrap(), Ordering::Greater);
}

#[test]
fn number_sorts_before_string() {
    assert_eq!(Value::from(1000).compare(&Value::from("0")).unwrap(), Ordering::Less);
    assert_eq!(Value::from("0").compare(&Value::from(1000)).unwrap(), Ordering::Greater);
}

#[test]
fn unsupported_kinds_cannot_be_ordered() {
    assert!(matches!(
        Value::from(true).compare(&Value::Array(vec![])),
        Err(MsgPackError::UnsupportedComparison { .. })
    ));
    assert!(Value::Null.compare(&Value::from(1)).is_err());
    assert!(Value::from("a").compare(&Value::from_bytes(b"a")).is_err());
    assert_eq!(Value::from(true).partial_cmp(&Value::from(false)), None);
    assert_eq!(Value::Null.partial_cmp(&Value::Null), Some(Ordering::Equal));
}

#[test]
fn sort_rejects_incomparable_members() {
    let mut values = vec![Value::from(1), Value::Null];
    assert!(sort_values(&mut values).is_err());
}

#[test]
fn partial_ord_operators() {
    assert!(Value::from(1) < Value::from(2.5));
    assert!(Value::from("b") > Value::from(99));
}

// ============================================================================
// Equality laws
// ============================================================================

fn samples() -> Vec<Value> {
    vec![
        Value::Null,
        Value::from(true),
        Value::from(10),
        Value::from(10.0),
        Value::unsigned(10),
        Value::from(10.0f32),
        Value::from("10"),
        Value::from_bytes(b"10"),
        Value::array(vec![10.into()]),
        Value::map([(Value::from("k"), Value::from(10))]),
        Value::from(f64::NAN),
    ]
}

#[test]
fn equality_is_reflexive() {
    for a in samples() {
        assert_eq!(a, a.clone(), "{a} != itself");
    }
}

#[test]
fn equality_is_symmetric() {
    let all = samples();
    for a in &all {
        for b in &all {
            assert_eq!(a == b, b == a, "asymmetry between {a} and {b}");
        }
    }
}

#[test]
fn int_and_float_ten_are_equal() {
    assert_eq!(Value::from(10), Value::from(10.0));
    assert_eq!(Value::from(10), Value::unsigned(10));
    assert_eq!(Value::from(10.0f32), Value::from(10.0f64));
}

#[test]
fn string_and_number_never_equal() {
    assert_ne!(Value::from("10"), Value::from(10));
    assert_ne!(Value::from("10"), Value::from(10.0));
}

#[test]
fn string_and_binary_never_equal() {
    assert_ne!(Value::from("ab"), Value::from_bytes(b"ab"));
}

#[test]
fn nan_equals_nan() {
    assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
    assert_eq!(Value::from(f32::NAN), Value::from(f64::NAN));
    assert_ne!(Value::from(f64::NAN), Value::from(0.0));
}

#[test]
fn arrays_are_order_sensitive() {
    let a = Value::array(vec![1.into(), 2.into()]);
    let b = Value::array(vec![2.into(), 1.into()]);
    assert_ne!(a, b);
    assert_ne!(a, Value::array(vec![1.into()]));
}

#[test]
fn maps_are_order_insensitive() {
    let a = Value::map([
        (Value::from("x"), Value::from(1)),
        (Value::from(2), Value::from("two")),
        (Value::from("y"), Value::array(vec![])),
    ]);
    let b = Value::map([
        (Value::from("y"), Value::array(vec![])),
        (Value::from("x"), Value::from(1)),
        (Value::from(2), Value::from("two")),
    ]);
    assert_eq!(a, b);
}

#[test]
fn maps_differing_in_one_value_are_unequal() {
    let a = Value::map([(Value::from("x"), Value::from(1)), (Value::from("y"), Value::from(2))]);
    let b = Value::map([(Value::from("y"), Value::from(3)), (Value::from("x"), Value::from(1))]);
    assert_ne!(a, b);
}

#[test]
fn maps_with_different_cardinality_are_unequal() {
    let a = Value::map([(Value::from("x"), Value::from(1))]);
    let b = Value::map([(Value::from("x"), Value::from(1)), (Value::from("y"), Value::Null)]);
    assert_ne!(a, b);
}

#[test]
fn maps_with_unordered_keys_still_compare() {
    let a = Value::map([(Value::from(true), Value::from(1)), (Value::Null, Value::from(2))]);
    let b = Value::map([(Value::Null, Value::from(2)), (Value::from(true), Value::from(1))]);
    assert_eq!(a, b);
    let c = Value::map([(Value::Null, Value::from(2)), (Value::from(false), Value::from(1))]);
    assert_ne!(a, c);
}

#[test]
fn map_keys_match_across_numeric_kinds() {
    let m = Value::map([(Value::from(1), Value::from("one"))]);
    assert_eq!(m.get(&Value::from(1.0)), Some(&Value::from("one")));
    assert_eq!(m.get(&Value::unsigned(1)), Some(&Value::from("one")));
    assert_eq!(m.get(&Value::from("1")), None);
}

#[test]
fn maps_with_numerically_equal_keys_ignore_order() {
    // {1: "x", 1.0: "y"} against {1.0: "y", 1: "x"}, straight off the wire
    let a = decode(&[
        0x82, 0x01, 0xa1, b'x', 0xcb, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0, 0xa1, b'y',
    ])
    .unwrap();
    let b = decode(&[
        0x82, 0xcb, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0, 0xa1, b'y', 0x01, 0xa1, b'x',
    ])
    .unwrap();
    assert_eq!(a.len(), Some(2));
    assert_eq!(a, b);
    assert_eq!(b, a);
}

#[test]
fn maps_with_numerically_equal_keys_still_compare_values() {
    let a = Value::Map(vec![
        (Value::from(1), Value::from("x")),
        (Value::from(1.0), Value::from("y")),
    ]);
    let b = Value::Map(vec![
        (Value::from(1.0), Value::from("x")),
        (Value::unsigned(1), Value::from("x")),
    ]);
    assert_ne!(a, b);
    let c = Value::Map(vec![
        (Value::from(1), Value::from("x")),
        (Value::from(2), Value::from("y")),
    ]);
    assert_ne!(a, c);
}

#[test]
fn incomparable_error_names_the_offending_pair() {
    let mut values = vec![Value::from(1), Value::from(true)];
    let err = sort_values(&mut values).unwrap_err();
    assert!(matches!(
        err,
        MsgPackError::UnsupportedComparison {
            left: Kind::Int,
            right: Kind::Bool,
        }
    ));
}
