//! The value tree: an owned, type-tagged representation of any MessagePack value.
//!
//! `Value` mirrors the wire types one-to-one. Integers keep the signed/unsigned
//! distinction and floats keep their width, so the encoder never has to guess
//! which tag family a node belongs to. Maps are stored as key/value pairs in
//! insertion order; keys may be any node.

use crate::error::{MsgPackError, Result};
use std::fmt;

/// One node of the value tree.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// Any integer that fits `i64`.
    Int(i64),
    /// An unsigned integer; always encoded as a full 8-byte uint64.
    UInt(u64),
    F32(f32),
    F64(f64),
    String(String),
    Binary(Vec<u8>),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order.
    Map(Vec<(Value, Value)>),
}

/// The discriminant of a [`Value`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    UInt,
    F32,
    F64,
    String,
    Binary,
    Array,
    Map,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::UInt => "uint",
            Kind::F32 => "float32",
            Kind::F64 => "float64",
            Kind::String => "string",
            Kind::Binary => "binary",
            Kind::Array => "array",
            Kind::Map => "map",
        }
    }

    /// Int, UInt, F32 and F64.
    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Int | Kind::UInt | Kind::F32 | Kind::F64)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    pub fn null() -> Self {
        Value::Null
    }

    pub fn from_bool(v: bool) -> Self {
        Value::Bool(v)
    }

    pub fn from_i64(v: i64) -> Self {
        Value::Int(v)
    }

    /// Builds a signed node when `v` fits `i64`, an unsigned one otherwise.
    pub fn from_u64(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(signed) => Value::Int(signed),
            Err(_) => Value::UInt(v),
        }
    }

    /// Builds an unsigned node regardless of magnitude.
    pub fn unsigned(v: u64) -> Self {
        Value::UInt(v)
    }

    pub fn from_f32(v: f32) -> Self {
        Value::F32(v)
    }

    pub fn from_f64(v: f64) -> Self {
        Value::F64(v)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(v: &str) -> Self {
        Value::String(v.to_owned())
    }

    pub fn from_bytes(v: &[u8]) -> Self {
        Value::Binary(v.to_vec())
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(items)
    }

    /// Builds a map from pairs. Later duplicates of an equal key replace earlier ones.
    pub fn map<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let mut entries: Vec<(Value, Value)> = Vec::new();
        for (k, v) in pairs {
            match entries.iter_mut().find(|(existing, _)| *existing == k) {
                Some((_, slot)) => *slot = v,
                None => entries.push((k, v)),
            }
        }
        Value::Map(entries)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::UInt(_) => Kind::UInt,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::String(_) => Kind::String,
            Value::Binary(_) => Kind::Binary,
            Value::Array(_) => Kind::Array,
            Value::Map(_) => Kind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Vec<(Value, Value)>> {
        match self {
            Value::Map(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Element count of an array or pair count of a map; `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(items) => Some(items.len()),
            Value::Map(pairs) => Some(pairs.len()),
            _ => None,
        }
    }

    /// `Some(true)` for an empty array or map; `None` for scalars.
    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|n| n == 0)
    }

    /// Looks up a map entry by key equality. Returns `None` for non-maps.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &Value) -> Option<&mut Value> {
        self.as_map_mut()?
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Inserts into a map, replacing the value of an equal key in place and
    /// returning the old value.
    pub fn insert(&mut self, key: Value, value: Value) -> Result<Option<Value>> {
        let found = self.kind();
        let pairs = self.as_map_mut().ok_or(MsgPackError::TypeMismatch {
            expected: "map",
            found,
        })?;
        if let Some((_, slot)) = pairs.iter_mut().find(|(k, _)| *k == key) {
            return Ok(Some(std::mem::replace(slot, value)));
        }
        pairs.push((key, value));
        Ok(None)
    }

    /// Removes a map entry by key, preserving the order of the rest.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        let pairs = self.as_map_mut()?;
        let idx = pairs.iter().position(|(k, _)| k == key)?;
        Some(pairs.remove(idx).1)
    }

    /// Appends to an array.
    pub fn push(&mut self, value: Value) -> Result<()> {
        let found = self.kind();
        let items = self.as_array_mut().ok_or(MsgPackError::TypeMismatch {
            expected: "array",
            found,
        })?;
        items.push(value);
        Ok(())
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        }
    )*};
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::from_u64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Binary(v.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl TryFrom<i128> for Value {
    type Error = MsgPackError;

    fn try_from(v: i128) -> Result<Self> {
        if let Ok(signed) = i64::try_from(v) {
            return Ok(Value::Int(signed));
        }
        u64::try_from(v).map(Value::UInt).map_err(|_| {
            MsgPackError::UnsupportedConstruction(format!("{v} does not fit in 64 bits"))
        })
    }
}

impl TryFrom<u128> for Value {
    type Error = MsgPackError;

    fn try_from(v: u128) -> Result<Self> {
        u64::try_from(v).map(Value::from_u64).map_err(|_| {
            MsgPackError::UnsupportedConstruction(format!("{v} does not fit in 64 bits"))
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}u"),
            Value::F32(x) => write!(f, "{x:?}f32"),
            Value::F64(x) => write!(f, "{x:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Binary(bytes) => {
                f.write_str("h'")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                f.write_str("'")
            }
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
