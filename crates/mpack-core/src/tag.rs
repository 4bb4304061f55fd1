//! Selector bytes and the decode dispatch table.
//!
//! Every possible first byte of an encoded value maps to exactly one [`Rule`].
//! The table is built by a `const fn` at compile time, so it is immutable
//! process-wide data that any number of decoders can read concurrently.
//! Inline families (fixint, fixmap, fixarray, fixstr) share one rule each; the
//! handler recovers the embedded value or length from the selector itself.

pub const NIL: u8 = 0xc0;
pub const NEVER_USED: u8 = 0xc1;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;
pub const BIN8: u8 = 0xc4;
pub const BIN16: u8 = 0xc5;
pub const BIN32: u8 = 0xc6;
pub const FLOAT32: u8 = 0xca;
pub const FLOAT64: u8 = 0xcb;
pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;
pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;
pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;
pub const ARRAY16: u8 = 0xdc;
pub const ARRAY32: u8 = 0xdd;
pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;

pub const POSITIVE_FIXINT_MAX: u8 = 0x7f;
pub const FIXMAP: u8 = 0x80;
pub const FIXARRAY: u8 = 0x90;
pub const FIXSTR: u8 = 0xa0;
pub const NEGATIVE_FIXINT: u8 = 0xe0;

/// Largest length that fits in a fixstr selector.
pub const FIXSTR_MAX_LEN: usize = 31;
/// Largest count that fits in a fixmap/fixarray selector.
pub const FIXCOLLECTION_MAX_LEN: usize = 15;

/// Width of a big-endian numeric field following an int/uint selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

/// Width of the length prefix of str, bin, array and map. No family has a
/// 64-bit prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LenWidth {
    L8,
    L16,
    L32,
}

/// How the decoder handles a given selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The selector is the value (0x00-0x7f).
    PositiveFixInt,
    /// The selector is a two's-complement i8 (0xe0-0xff).
    NegativeFixInt,
    /// Low nibble is the pair count.
    FixMap,
    /// Low nibble is the element count.
    FixArray,
    /// Low five bits are the byte length.
    FixStr,
    Nil,
    False,
    True,
    Bin(LenWidth),
    Float32,
    Float64,
    UInt(Width),
    Int(Width),
    Str(LenWidth),
    Array(LenWidth),
    Map(LenWidth),
    /// No handler: 0xc1 and the ext family this codec does not implement.
    Invalid,
}

const fn build_table() -> [Rule; 256] {
    let mut table = [Rule::Invalid; 256];
    let mut b = 0usize;
    while b < 256 {
        table[b] = match b as u8 {
            0x00..=0x7f => Rule::PositiveFixInt,
            0x80..=0x8f => Rule::FixMap,
            0x90..=0x9f => Rule::FixArray,
            0xa0..=0xbf => Rule::FixStr,
            NIL => Rule::Nil,
            FALSE => Rule::False,
            TRUE => Rule::True,
            BIN8 => Rule::Bin(LenWidth::L8),
            BIN16 => Rule::Bin(LenWidth::L16),
            BIN32 => Rule::Bin(LenWidth::L32),
            FLOAT32 => Rule::Float32,
            FLOAT64 => Rule::Float64,
            UINT8 => Rule::UInt(Width::W8),
            UINT16 => Rule::UInt(Width::W16),
            UINT32 => Rule::UInt(Width::W32),
            UINT64 => Rule::UInt(Width::W64),
            INT8 => Rule::Int(Width::W8),
            INT16 => Rule::Int(Width::W16),
            INT32 => Rule::Int(Width::W32),
            INT64 => Rule::Int(Width::W64),
            STR8 => Rule::Str(LenWidth::L8),
            STR16 => Rule::Str(LenWidth::L16),
            STR32 => Rule::Str(LenWidth::L32),
            ARRAY16 => Rule::Array(LenWidth::L16),
            ARRAY32 => Rule::Array(LenWidth::L32),
            MAP16 => Rule::Map(LenWidth::L16),
            MAP32 => Rule::Map(LenWidth::L32),
            0xe0..=0xff => Rule::NegativeFixInt,
            // 0xc1, ext 0xc7-0xc9, fixext 0xd4-0xd8
            _ => Rule::Invalid,
        };
        b += 1;
    }
    table
}

static DISPATCH: [Rule; 256] = build_table();

/// Resolve a selector byte to its decode rule.
#[inline]
pub fn rule_for(selector: u8) -> Rule {
    DISPATCH[selector as usize]
}
