//! Structural equality and key ordering over value trees.
//!
//! Equality is defined for every kind. Numeric nodes compare by mathematical
//! value across `Int`/`UInt`/`F32`/`F64`, so `10` equals `10.0`; NaN equals
//! NaN so decoded trees compare equal to their sources. Arrays compare
//! pairwise in order, maps compare as unordered sets of pairs.
//!
//! Ordering exists to sort map keys. Numbers sort before strings, numbers by
//! value, strings by byte order. Any other kind combination is an
//! [`MsgPackError::UnsupportedComparison`].

use crate::error::{MsgPackError, Result};
use crate::value::Value;
use std::cmp::Ordering;

/// A numeric node widened without loss: every `i64`/`u64` fits `i128` and
/// every `f32` fits `f64`.
#[derive(Clone, Copy)]
enum Num {
    Int(i128),
    Float(f64),
}

impl Num {
    fn of(value: &Value) -> Option<Num> {
        match value {
            Value::Int(n) => Some(Num::Int(i128::from(*n))),
            Value::UInt(n) => Some(Num::Int(i128::from(*n))),
            Value::F32(x) => Some(Num::Float(f64::from(*x))),
            Value::F64(x) => Some(Num::Float(*x)),
            _ => None,
        }
    }
}

/// 2^127, the first float magnitude outside `i128`.
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Total order on floats where NaN equals NaN and sorts above everything.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // -0.0 == 0.0 here, unlike total_cmp
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer against a float.
fn cmp_int_float(i: i128, x: f64) -> Ordering {
    if x.is_nan() {
        return Ordering::Less;
    }
    if x >= I128_BOUND {
        return Ordering::Less;
    }
    if x < -I128_BOUND {
        return Ordering::Greater;
    }
    let whole = x.trunc();
    match i.cmp(&(whole as i128)) {
        Ordering::Equal => cmp_floats(whole, x),
        other => other,
    }
}

fn cmp_nums(a: Num, b: Num) -> Ordering {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => x.cmp(&y),
        (Num::Float(x), Num::Float(y)) => cmp_floats(x, y),
        (Num::Int(x), Num::Float(y)) => cmp_int_float(x, y),
        (Num::Float(x), Num::Int(y)) => cmp_int_float(y, x).reverse(),
    }
}

impl Value {
    /// Compare two nodes under the key ordering.
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        match (Num::of(self), Num::of(other)) {
            (Some(a), Some(b)) => return Ok(cmp_nums(a, b)),
            (Some(_), None) if matches!(other, Value::String(_)) => return Ok(Ordering::Less),
            (None, Some(_)) if matches!(self, Value::String(_)) => return Ok(Ordering::Greater),
            _ => {}
        }
        match (self, other) {
            (Value::String(a), Value::String(b)) => Ok(a.as_bytes().cmp(b.as_bytes())),
            _ => Err(MsgPackError::UnsupportedComparison {
                left: self.kind(),
                right: other.kind(),
            }),
        }
    }
}

/// Sort nodes in place under [`Value::compare`]. Fails without a defined
/// result order if any pair is incomparable.
pub fn sort_values(values: &mut [Value]) -> Result<()> {
    check_comparable(values.iter())?;
    values.sort_by(|a, b| a.compare(b).unwrap_or(Ordering::Equal));
    Ok(())
}

/// Every node must be numeric or a string for the slice to be sortable.
/// On failure the error pairs the first offending node with its neighbour.
fn check_comparable<'a>(values: impl Iterator<Item = &'a Value>) -> Result<()> {
    let mut prev: Option<&Value> = None;
    for v in values {
        if !v.is_numeric() && !matches!(v, Value::String(_)) {
            // A lone node is reported against itself.
            let other = prev.unwrap_or(v);
            return Err(MsgPackError::UnsupportedComparison {
                left: other.kind(),
                right: v.kind(),
            });
        }
        prev = Some(v);
    }
    Ok(())
}

fn maps_equal(a: &[(Value, Value)], b: &[(Value, Value)]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if check_comparable(a.iter().chain(b).map(|(k, _)| k)).is_ok() {
        let mut left: Vec<&(Value, Value)> = a.iter().collect();
        let mut right: Vec<&(Value, Value)> = b.iter().collect();
        let by_key = |x: &&(Value, Value), y: &&(Value, Value)| {
            x.0.compare(&y.0).unwrap_or(Ordering::Equal)
        };
        left.sort_by(by_key);
        right.sort_by(by_key);
        // Runs of equal keys (`1` next to `1.0`) keep wire order after a stable
        // sort, so each run is matched as a multiset.
        let mut start = 0;
        while start < left.len() {
            let key = &left[start].0;
            let end = start + left[start..].iter().take_while(|p| p.0 == *key).count();
            let run = &right[start..end];
            if run.iter().any(|p| p.0 != *key) || right.get(end).is_some_and(|p| p.0 == *key) {
                return false;
            }
            if !pairs_match(left[start..end].iter().copied(), run.iter().copied()) {
                return false;
            }
            start = end;
        }
        return true;
    }
    // Keys outside the ordered subset: match pairs one by one.
    pairs_match(a.iter(), b.iter())
}

/// Multiset match of two equally sized pair lists.
fn pairs_match<'a>(
    mut a: impl Iterator<Item = &'a (Value, Value)>,
    b: impl Iterator<Item = &'a (Value, Value)>,
) -> bool {
    let candidates: Vec<&(Value, Value)> = b.collect();
    let mut used = vec![false; candidates.len()];
    a.all(|(ka, va)| {
        let hit = candidates
            .iter()
            .enumerate()
            .find(|(i, (kb, vb))| !used[*i] && ka == kb && va == vb);
        match hit {
            Some((i, _)) => {
                used[i] = true;
                true
            }
            None => false,
        }
    })
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (Num::of(self), Num::of(other)) {
            return cmp_nums(a, b) == Ordering::Equal;
        }
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => maps_equal(a, b),
            _ => false,
        }
    }
}

/// Equal nodes of unordered kinds still report `Equal`, keeping `partial_cmp`
/// consistent with `==`.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.compare(other) {
            Ok(ord) => Some(ord),
            Err(_) if self == other => Some(Ordering::Equal),
            Err(_) => None,
        }
    }
}
