//! MessagePack encoder — walks a [`Value`] tree and writes its wire form.
//!
//! Every scalar is written with the narrowest tag its value allows, and every
//! composite gets the narrowest length prefix its size allows:
//!
//! - **Integers**: fixint when inline, otherwise the width ladder described on
//!   [`Encoder::write_int`]; `UInt` nodes always use the full uint64 form
//! - **Floats**: float32 and float64 stay distinct, no widening or narrowing
//! - **Strings / binary**: fixstr, then 8/16/32-bit length prefixes
//! - **Arrays / maps**: fixarray/fixmap, then 16/32-bit count prefixes
//!
//! All multi-byte fields are big-endian.
//!
//! # Example
//! ```
//! use mpack_core::{encode, Value};
//! let bytes = encode(&Value::from(255)).unwrap();
//! assert_eq!(bytes, [0xcc, 0xff]);
//! ```

use crate::error::{MsgPackError, Result};
use crate::tag;
use crate::value::Value;
use std::io::Write;

/// Encode a value tree into a freshly allocated buffer.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(Vec::new());
    encoder.write_value(value)?;
    let bytes = encoder.into_inner();
    tracing::trace!(kind = %value.kind(), len = bytes.len(), "encoded value");
    Ok(bytes)
}

/// Encode a value tree into any byte sink.
pub fn encode_to<W: Write>(value: &Value, writer: W) -> Result<()> {
    Encoder::new(writer).write_value(value)
}

/// Streaming encoder over a byte sink. Several values may be written in
/// sequence; a decoder reads them back one at a time.
#[derive(Debug)]
pub struct Encoder<W> {
    writer: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write one value and, recursively, all of its children.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.put(&[tag::NIL]),
            Value::Bool(false) => self.put(&[tag::FALSE]),
            Value::Bool(true) => self.put(&[tag::TRUE]),
            Value::Int(n) => self.write_int(*n),
            Value::UInt(n) => self.write_uint(*n),
            Value::F32(x) => self.write_f32(*x),
            Value::F64(x) => self.write_f64(*x),
            Value::String(s) => self.write_str(s),
            Value::Binary(bytes) => self.write_bin(bytes),
            Value::Array(items) => {
                self.write_array_len(items.len())?;
                for item in items {
                    self.write_value(item)?;
                }
                Ok(())
            }
            Value::Map(pairs) => {
                self.write_map_len(pairs.len())?;
                for (k, v) in pairs {
                    self.write_value(k)?;
                    self.write_value(v)?;
                }
                Ok(())
            }
        }
    }

    /// Write a signed integer.
    ///
    /// Non-negative values walk an interleaved ladder: fixint up to 127, then
    /// uint8, int16, uint16, int32, uint32 and finally int64, each rung taken
    /// as soon as the value fits. Negative values use negative fixint down to
    /// -32, then int8/int16/int32 while the value is strictly greater than
    /// that type's minimum, and int64 below that.
    pub fn write_int(&mut self, n: i64) -> Result<()> {
        if n >= 0 {
            if n <= i64::from(tag::POSITIVE_FIXINT_MAX) {
                return self.put(&[n as u8]);
            }
            if n <= i64::from(u8::MAX) {
                return self.put(&[tag::UINT8, n as u8]);
            }
            if n <= i64::from(i16::MAX) {
                return self.put_with(tag::INT16, &(n as i16).to_be_bytes());
            }
            if n <= i64::from(u16::MAX) {
                return self.put_with(tag::UINT16, &(n as u16).to_be_bytes());
            }
            if n <= i64::from(i32::MAX) {
                return self.put_with(tag::INT32, &(n as i32).to_be_bytes());
            }
            if n <= i64::from(u32::MAX) {
                return self.put_with(tag::UINT32, &(n as u32).to_be_bytes());
            }
            return self.put_with(tag::INT64, &n.to_be_bytes());
        }

        if n >= -32 {
            return self.put(&[n as i8 as u8]);
        }
        if n > i64::from(i8::MIN) {
            return self.put(&[tag::INT8, n as i8 as u8]);
        }
        if n > i64::from(i16::MIN) {
            return self.put_with(tag::INT16, &(n as i16).to_be_bytes());
        }
        if n > i64::from(i32::MIN) {
            return self.put_with(tag::INT32, &(n as i32).to_be_bytes());
        }
        self.put_with(tag::INT64, &n.to_be_bytes())
    }

    /// Write an unsigned integer. Always the 9-byte uint64 form.
    pub fn write_uint(&mut self, n: u64) -> Result<()> {
        self.put_with(tag::UINT64, &n.to_be_bytes())
    }

    pub fn write_f32(&mut self, x: f32) -> Result<()> {
        self.put_with(tag::FLOAT32, &x.to_bits().to_be_bytes())
    }

    pub fn write_f64(&mut self, x: f64) -> Result<()> {
        self.put_with(tag::FLOAT64, &x.to_bits().to_be_bytes())
    }

    pub fn write_str(&mut self, s: &str) -> Result<()> {
        let len = s.len();
        if len <= tag::FIXSTR_MAX_LEN {
            self.put(&[tag::FIXSTR | len as u8])?;
        } else if len <= usize::from(u8::MAX) {
            self.put(&[tag::STR8, len as u8])?;
        } else if len <= usize::from(u16::MAX) {
            self.put_with(tag::STR16, &(len as u16).to_be_bytes())?;
        } else {
            self.put_with(tag::STR32, &frame_len(len)?.to_be_bytes())?;
        }
        self.put(s.as_bytes())
    }

    pub fn write_bin(&mut self, bytes: &[u8]) -> Result<()> {
        let len = bytes.len();
        if len <= usize::from(u8::MAX) {
            self.put(&[tag::BIN8, len as u8])?;
        } else if len <= usize::from(u16::MAX) {
            self.put_with(tag::BIN16, &(len as u16).to_be_bytes())?;
        } else {
            self.put_with(tag::BIN32, &frame_len(len)?.to_be_bytes())?;
        }
        self.put(bytes)
    }

    /// Write an array header; the caller writes `len` elements after it.
    pub fn write_array_len(&mut self, len: usize) -> Result<()> {
        self.write_collection_len(len, tag::FIXARRAY, tag::ARRAY16, tag::ARRAY32)
    }

    /// Write a map header; the caller writes `len` key/value pairs after it.
    pub fn write_map_len(&mut self, len: usize) -> Result<()> {
        self.write_collection_len(len, tag::FIXMAP, tag::MAP16, tag::MAP32)
    }

    fn write_collection_len(&mut self, len: usize, fix: u8, w16: u8, w32: u8) -> Result<()> {
        if len <= tag::FIXCOLLECTION_MAX_LEN {
            self.put(&[fix | len as u8])
        } else if len <= usize::from(u16::MAX) {
            self.put_with(w16, &(len as u16).to_be_bytes())
        } else {
            self.put_with(w32, &frame_len(len)?.to_be_bytes())
        }
    }

    fn put_with(&mut self, selector: u8, payload: &[u8]) -> Result<()> {
        self.put(&[selector])?;
        self.put(payload)
    }

    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }
}

fn frame_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| MsgPackError::LengthOverflow(len))
}
