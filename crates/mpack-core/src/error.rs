//! Error types for MessagePack encoding, decoding and value projection.

use crate::value::Kind;
use thiserror::Error;

/// Errors that can occur while encoding, decoding or inspecting a [`Value`](crate::Value).
#[derive(Error, Debug)]
pub enum MsgPackError {
    /// The byte source ran out before a declared length was satisfied.
    #[error("truncated stream: expected {needed} more byte(s)")]
    Truncated { needed: usize },

    /// The selector byte has no handler (0xC1, or a reserved ext tag).
    #[error("invalid tag byte 0x{0:02x}")]
    InvalidTag(u8),

    /// A str-family payload was not valid UTF-8.
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,

    /// Composite values nested deeper than [`MAX_DEPTH`](crate::decoder::MAX_DEPTH).
    #[error("nesting depth exceeds limit of {0}")]
    DepthLimitExceeded(usize),

    /// A string, binary, array or map is too long to be framed with a u32 length.
    #[error("length {0} exceeds the 32-bit framing limit")]
    LengthOverflow(usize),

    /// A projection asked for a representation incompatible with the node kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: Kind },

    /// A numeric projection whose value does not fit the requested type.
    #[error("value {value} is out of range for {target}")]
    OutOfRange { target: &'static str, value: String },

    /// Ordering requested between kinds that have no defined order.
    #[error("cannot order {left} against {right}")]
    UnsupportedComparison { left: Kind, right: Kind },

    /// A host value that the value tree does not model.
    #[error("unsupported construction: {0}")]
    UnsupportedConstruction(String),

    /// A JSON document could not be parsed or rendered.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O failure from the underlying sink or source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MsgPackError {
    /// True for the failures a defaulting projection is allowed to absorb.
    pub fn is_conversion(&self) -> bool {
        matches!(
            self,
            MsgPackError::TypeMismatch { .. }
                | MsgPackError::OutOfRange { .. }
                | MsgPackError::UnsupportedConstruction(_)
        )
    }
}

/// Convenience alias used throughout mpack-core.
pub type Result<T> = std::result::Result<T, MsgPackError>;
