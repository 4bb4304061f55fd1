//! MessagePack decoder — rebuilds a [`Value`] tree from a byte source.
//!
//! Decoding reads one selector byte, resolves it through the dispatch table in
//! [`crate::tag`], then reads whatever length and payload bytes that selector
//! implies. Composites recurse once per child. Exactly the bytes belonging to
//! one value are consumed, so concatenated values decode one after another.
//!
//! # Key design decisions
//!
//! - **No trust in declared lengths**: payloads are read through `Read::take`
//!   and element vectors are pre-sized with a cap, so a forged 4 GiB length
//!   fails with [`MsgPackError::Truncated`] instead of allocating up front.
//! - **Shared length routine**: every sized family (str, bin, array, map)
//!   reads its prefix through one length routine, keyed by the table's
//!   [`LenWidth`].
//! - **Bounded recursion**: nesting deeper than [`MAX_DEPTH`] is rejected.
//!   The depth counter unwinds on errors too, so a long-lived [`Decoder`]
//!   can keep reading after a rejected value.

use crate::error::{MsgPackError, Result};
use crate::tag::{self, LenWidth, Rule, Width};
use crate::value::Value;
use std::io::{self, Read};

/// Maximum nesting of arrays and maps accepted while decoding.
pub const MAX_DEPTH: usize = 256;

/// Upper bound on speculative pre-allocation for declared element counts.
const PREALLOC_LIMIT: usize = 4096;

/// Decode the first value in `bytes`. Trailing bytes are left unread.
pub fn decode(bytes: &[u8]) -> Result<Value> {
    Decoder::new(bytes).read_value()
}

/// Decode one value from any byte source.
pub fn decode_from<R: Read>(reader: R) -> Result<Value> {
    Decoder::new(reader).read_value()
}

/// Decode every value in a buffer of concatenated encodings.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<Value>> {
    Decoder::new(bytes).collect()
}

/// Streaming decoder over a byte source.
#[derive(Debug)]
pub struct Decoder<R> {
    reader: R,
    depth: usize,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, depth: 0 }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read exactly one value. An empty source is a truncated stream.
    pub fn read_value(&mut self) -> Result<Value> {
        let selector = self.read_u8()?;
        self.dispatch(selector)
    }

    /// Read the next value, or `None` when the source ends cleanly on a
    /// value boundary.
    pub fn next_value(&mut self) -> Result<Option<Value>> {
        let mut selector = [0u8; 1];
        loop {
            match self.reader.read(&mut selector) {
                Ok(0) => return Ok(None),
                Ok(_) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        let value = self.dispatch(selector[0])?;
        tracing::trace!(kind = %value.kind(), "decoded value");
        Ok(Some(value))
    }

    fn dispatch(&mut self, selector: u8) -> Result<Value> {
        match tag::rule_for(selector) {
            Rule::PositiveFixInt => Ok(Value::Int(i64::from(selector))),
            Rule::NegativeFixInt => Ok(Value::Int(i64::from(selector as i8))),
            Rule::Nil => Ok(Value::Null),
            Rule::False => Ok(Value::Bool(false)),
            Rule::True => Ok(Value::Bool(true)),
            Rule::Float32 => {
                let bits = u32::from_be_bytes(self.read_array()?);
                Ok(Value::F32(f32::from_bits(bits)))
            }
            Rule::Float64 => {
                let bits = u64::from_be_bytes(self.read_array()?);
                Ok(Value::F64(f64::from_bits(bits)))
            }
            Rule::UInt(width) => self.read_uint(width),
            Rule::Int(width) => self.read_int(width),
            Rule::FixStr => self.read_str(usize::from(selector & 0x1f)),
            Rule::Str(width) => {
                let len = self.read_len(width)?;
                self.read_str(len)
            }
            Rule::Bin(width) => {
                let len = self.read_len(width)?;
                Ok(Value::Binary(self.read_payload(len)?))
            }
            Rule::FixArray => self.read_array_items(usize::from(selector & 0x0f)),
            Rule::Array(width) => {
                let len = self.read_len(width)?;
                self.read_array_items(len)
            }
            Rule::FixMap => self.read_map_pairs(usize::from(selector & 0x0f)),
            Rule::Map(width) => {
                let len = self.read_len(width)?;
                self.read_map_pairs(len)
            }
            Rule::Invalid => {
                tracing::debug!(selector, "rejecting selector with no handler");
                Err(MsgPackError::InvalidTag(selector))
            }
        }
    }

    /// uint8/16/32 fit `i64` and become signed nodes; uint64 stays unsigned.
    fn read_uint(&mut self, width: Width) -> Result<Value> {
        Ok(match width {
            Width::W8 => Value::Int(i64::from(self.read_u8()?)),
            Width::W16 => Value::Int(i64::from(u16::from_be_bytes(self.read_array()?))),
            Width::W32 => Value::Int(i64::from(u32::from_be_bytes(self.read_array()?))),
            Width::W64 => Value::UInt(u64::from_be_bytes(self.read_array()?)),
        })
    }

    fn read_int(&mut self, width: Width) -> Result<Value> {
        let n = match width {
            Width::W8 => i64::from(self.read_u8()? as i8),
            Width::W16 => i64::from(i16::from_be_bytes(self.read_array()?)),
            Width::W32 => i64::from(i32::from_be_bytes(self.read_array()?)),
            Width::W64 => i64::from_be_bytes(self.read_array()?),
        };
        Ok(Value::Int(n))
    }

    /// Read the big-endian length prefix that follows a sized selector.
    fn read_len(&mut self, width: LenWidth) -> Result<usize> {
        let len = match width {
            LenWidth::L8 => usize::from(self.read_u8()?),
            LenWidth::L16 => usize::from(u16::from_be_bytes(self.read_array()?)),
            LenWidth::L32 => u32::from_be_bytes(self.read_array()?) as usize,
        };
        Ok(len)
    }

    fn read_str(&mut self, len: usize) -> Result<Value> {
        let bytes = self.read_payload(len)?;
        String::from_utf8(bytes)
            .map(Value::String)
            .map_err(|_| MsgPackError::InvalidUtf8)
    }

    fn read_array_items(&mut self, len: usize) -> Result<Value> {
        self.nested(|this| {
            let mut items = Vec::with_capacity(len.min(PREALLOC_LIMIT));
            for _ in 0..len {
                items.push(this.read_value()?);
            }
            Ok(Value::Array(items))
        })
    }

    /// Pairs are kept exactly as they appear on the wire, duplicates included.
    fn read_map_pairs(&mut self, len: usize) -> Result<Value> {
        self.nested(|this| {
            let mut pairs = Vec::with_capacity(len.min(PREALLOC_LIMIT));
            for _ in 0..len {
                let key = this.read_value()?;
                let value = this.read_value()?;
                pairs.push((key, value));
            }
            Ok(Value::Map(pairs))
        })
    }

    /// Run `body` one nesting level down. The level is released on every
    /// exit, so a failed composite leaves the decoder reusable.
    fn nested(&mut self, body: impl FnOnce(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth >= MAX_DEPTH {
            return Err(MsgPackError::DepthLimitExceeded(MAX_DEPTH));
        }
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }

    fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        let mut filled = 0;
        while filled < N {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => return Err(truncated(N - filled)),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(buf)
    }

    fn read_payload(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        let got = (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        if got < len {
            return Err(truncated(len - got));
        }
        Ok(buf)
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_value().transpose()
    }
}

fn truncated(needed: usize) -> MsgPackError {
    tracing::debug!(needed, "byte source exhausted mid-value");
    MsgPackError::Truncated { needed }
}
