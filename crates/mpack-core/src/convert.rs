//! Projections from a [`Value`] into host types.
//!
//! [`Value::to`] performs a checked conversion and [`Value::try_to`] falls back
//! to a caller-supplied default, but only for conversion failures. Numeric
//! kinds convert freely among themselves: integer targets reject values that
//! do not fit (floats are truncated toward zero first), float targets use the
//! usual `as` rounding. `Null` projects to `None` for `Option<T>` and is a type
//! mismatch for every other target.

use crate::error::{MsgPackError, Result};
use crate::value::Value;

/// A host type that can be read out of a value node.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

impl Value {
    /// Project this node into `T`.
    ///
    /// ```
    /// use mpack_core::Value;
    /// assert_eq!(Value::from(300).to::<u16>().unwrap(), 300);
    /// assert!(Value::from(300).to::<u8>().is_err());
    /// ```
    pub fn to<T: FromValue>(&self) -> Result<T> {
        T::from_value(self)
    }

    /// Project this node into `T`, yielding `default` when the conversion
    /// itself fails. Any other error is still returned.
    pub fn try_to<T: FromValue>(&self, default: T) -> Result<T> {
        match T::from_value(self) {
            Ok(v) => Ok(v),
            Err(e) if e.is_conversion() => Ok(default),
            Err(e) => Err(e),
        }
    }
}

fn mismatch(expected: &'static str, value: &Value) -> MsgPackError {
    MsgPackError::TypeMismatch {
        expected,
        found: value.kind(),
    }
}

fn out_of_range(target: &'static str, value: impl ToString) -> MsgPackError {
    MsgPackError::OutOfRange {
        target,
        value: value.to_string(),
    }
}

/// Truncate a float toward zero and range-check it against `[min, max]`,
/// both given as exactly representable `f64` bounds.
fn float_to_i128(target: &'static str, x: f64, min: f64, max: f64) -> Result<i128> {
    if !x.is_finite() {
        return Err(out_of_range(target, x));
    }
    let t = x.trunc();
    if t < min || t > max {
        return Err(out_of_range(target, x));
    }
    Ok(t as i128)
}

macro_rules! int_from_value {
    ($($t:ty),*) => {$(
        impl FromValue for $t {
            fn from_value(value: &Value) -> Result<Self> {
                const NAME: &str = stringify!($t);
                let wide: i128 = match value {
                    Value::Int(n) => i128::from(*n),
                    Value::UInt(n) => i128::from(*n),
                    Value::F32(x) => float_to_i128(NAME, f64::from(*x), <$t>::MIN as f64, <$t>::MAX as f64)?,
                    Value::F64(x) => float_to_i128(NAME, *x, <$t>::MIN as f64, <$t>::MAX as f64)?,
                    other => return Err(mismatch(NAME, other)),
                };
                <$t>::try_from(wide).map_err(|_| out_of_range(NAME, wide))
            }
        }
    )*};
}

int_from_value!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::F64(x) => Ok(*x),
            Value::F32(x) => Ok(f64::from(*x)),
            Value::Int(n) => Ok(*n as f64),
            Value::UInt(n) => Ok(*n as f64),
            other => Err(mismatch("f64", other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::F32(x) => Ok(*x),
            Value::F64(x) => Ok(*x as f32),
            Value::Int(n) => Ok(*n as f32),
            Value::UInt(n) => Ok(*n as f32),
            other => Err(mismatch("f32", other)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(mismatch("bool", other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch("string", other)),
        }
    }
}

/// Binary payloads only; use `Vec<T>` element projection for arrays.
impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Binary(b) => Ok(b.clone()),
            other => Err(mismatch("binary", other)),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Projects every element of an array node.
pub fn array_of<T: FromValue>(value: &Value) -> Result<Vec<T>> {
    match value {
        Value::Array(items) => items.iter().map(T::from_value).collect(),
        other => Err(mismatch("array", other)),
    }
}
