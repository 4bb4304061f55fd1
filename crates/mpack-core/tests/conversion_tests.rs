use mpack_core::{array_of, MsgPackError, Value};

// ============================================================================
// Exact kind
// ============================================================================

#[test]
fn exact_kinds() {
    assert!(Value::from(true).to::<bool>().unwrap());
    assert_eq!(Value::from("hi").to::<String>().unwrap(), "hi");
    assert_eq!(Value::from_bytes(&[1, 2]).to::<Vec<u8>>().unwrap(), vec![1, 2]);
    assert_eq!(Value::from(-9).to::<i64>().unwrap(), -9);
    assert_eq!(Value::from(2.5).to::<f64>().unwrap(), 2.5);
    assert_eq!(Value::from(2.5f32).to::<f32>().unwrap(), 2.5);
}

// ============================================================================
// Numeric widening / narrowing
// ============================================================================

#[test]
fn int_to_narrower_int_in_range() {
    assert_eq!(Value::from(100).to::<i8>().unwrap(), 100);
    assert_eq!(Value::from(65535).to::<u16>().unwrap(), 65535);
    assert_eq!(Value::unsigned(42).to::<i32>().unwrap(), 42);
}

#[test]
fn int_out_of_range_is_detected() {
    assert!(matches!(
        Value::from(300).to::<u8>(),
        Err(MsgPackError::OutOfRange { target: "u8", .. })
    ));
    assert!(matches!(Value::from(-1).to::<u64>(), Err(MsgPackError::OutOfRange { .. })));
    assert!(matches!(
        Value::unsigned(u64::MAX).to::<i64>(),
        Err(MsgPackError::OutOfRange { .. })
    ));
}

#[test]
fn float_to_int_truncates() {
    assert_eq!(Value::from(3.99).to::<i32>().unwrap(), 3);
    assert_eq!(Value::from(-3.99).to::<i32>().unwrap(), -3);
    assert_eq!(Value::from(255.5f32).to::<u8>().unwrap(), 255);
}

#[test]
fn float_to_int_out_of_range() {
    assert!(Value::from(256.0).to::<u8>().is_err());
    assert!(Value::from(-0.5).to::<u8>().is_ok());
    assert!(Value::from(-1.0).to::<u8>().is_err());
    assert!(Value::from(f64::NAN).to::<i64>().is_err());
    assert!(Value::from(f64::INFINITY).to::<i64>().is_err());
    assert!(Value::from(9.3e18).to::<i64>().is_err());
    assert_eq!(Value::from(9.3e18).to::<u64>().unwrap(), 9_300_000_000_000_000_000);
}

#[test]
fn int_to_float() {
    assert_eq!(Value::from(10).to::<f64>().unwrap(), 10.0);
    assert_eq!(Value::unsigned(u64::MAX).to::<f64>().unwrap(), u64::MAX as f64);
    assert_eq!(Value::from(7).to::<f32>().unwrap(), 7.0);
}

#[test]
fn float_width_conversion() {
    assert_eq!(Value::from(1.5f64).to::<f32>().unwrap(), 1.5f32);
    assert_eq!(Value::from(0.1f32).to::<f64>().unwrap(), f64::from(0.1f32));
}

// ============================================================================
// Null and Option
// ============================================================================

#[test]
fn null_to_option_is_none() {
    assert_eq!(Value::Null.to::<Option<String>>().unwrap(), None);
    assert_eq!(Value::Null.to::<Option<f64>>().unwrap(), None);
}

#[test]
fn non_null_to_option_is_some() {
    assert_eq!(Value::from(5).to::<Option<u8>>().unwrap(), Some(5));
}

#[test]
fn null_to_non_nullable_fails() {
    assert!(matches!(Value::Null.to::<i32>(), Err(MsgPackError::TypeMismatch { .. })));
    assert!(matches!(Value::Null.to::<String>(), Err(MsgPackError::TypeMismatch { .. })));
}

#[test]
fn null_to_value_is_null() {
    assert!(Value::Null.to::<Value>().unwrap().is_null());
}

// ============================================================================
// Mismatches and defaults
// ============================================================================

#[test]
fn mismatched_kind_fails() {
    let err = Value::from("true").to::<bool>().unwrap_err();
    assert!(matches!(
        err,
        MsgPackError::TypeMismatch { expected: "bool", found: mpack_core::Kind::String }
    ));
    assert!(Value::from(1).to::<String>().is_err());
    assert!(Value::from("1").to::<i32>().is_err());
    assert!(Value::from("ab").to::<Vec<u8>>().is_err());
}

#[test]
fn try_to_returns_value_on_success() {
    assert_eq!(Value::from(8).try_to::<u8>(0).unwrap(), 8);
}

#[test]
fn try_to_returns_default_on_mismatch() {
    assert_eq!(Value::from("x").try_to::<i32>(-1).unwrap(), -1);
    assert!(Value::Null.try_to::<bool>(true).unwrap());
}

#[test]
fn try_to_returns_default_on_out_of_range() {
    assert_eq!(Value::from(1000).try_to::<u8>(7).unwrap(), 7);
}

#[test]
fn conversion_errors_are_classified() {
    assert!(Value::Null.to::<i32>().unwrap_err().is_conversion());
    assert!(!MsgPackError::InvalidTag(0xc1).is_conversion());
    assert!(!MsgPackError::Truncated { needed: 1 }.is_conversion());
}

#[test]
fn array_projection() {
    let v = Value::array(vec![1.into(), 2.into(), 3.into()]);
    assert_eq!(array_of::<u8>(&v).unwrap(), vec![1, 2, 3]);
    let mixed = Value::array(vec![1.into(), "x".into()]);
    assert!(array_of::<u8>(&mixed).is_err());
    assert!(array_of::<u8>(&Value::from(1)).is_err());
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn wide_host_integers_outside_64_bits_are_rejected() {
    assert!(matches!(
        Value::try_from(i128::MAX),
        Err(MsgPackError::UnsupportedConstruction(_))
    ));
    assert!(matches!(
        Value::try_from(-(1i128 << 64)),
        Err(MsgPackError::UnsupportedConstruction(_))
    ));
    assert!(matches!(
        Value::try_from(u128::MAX),
        Err(MsgPackError::UnsupportedConstruction(_))
    ));
}

#[test]
fn kind_names() {
    assert_eq!(Value::from(1).kind().to_string(), "int");
    assert_eq!(Value::unsigned(1).kind().to_string(), "uint");
    assert_eq!(Value::from_bytes(&[]).kind().to_string(), "binary");
}
