//! # mpack-core
//!
//! Pure-Rust encoder and decoder for **MessagePack** over an owned value tree.
//!
//! MessagePack is a compact, self-describing binary encoding of JSON's data
//! model plus binary blobs and unsigned 64-bit integers. This crate keeps the
//! wire types visible in [`Value`] (signed vs. unsigned integers, float32 vs.
//! float64, string vs. binary) so that encoding is deterministic and every
//! canonical encoding survives a decode/encode cycle byte for byte.
//!
//! ## Quick start
//!
//! ```rust
//! use mpack_core::{decode, encode, Value};
//!
//! let value = Value::map([
//!     (Value::from("name"), Value::from("Alice")),
//!     (Value::from("scores"), Value::array(vec![95.into(), 87.into()])),
//! ]);
//! let bytes = encode(&value).unwrap();
//! assert_eq!(bytes[0], 0x82);
//!
//! let back = decode(&bytes).unwrap();
//! assert_eq!(back, value);
//! assert_eq!(back.get(&"name".into()).unwrap().to::<String>().unwrap(), "Alice");
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the `Value` tree and its constructors
//! - [`encoder`] — `Value` → bytes
//! - [`decoder`] — bytes → `Value`
//! - [`tag`] — selector constants and the decode dispatch table
//! - [`convert`] — `to::<T>()` / `try_to::<T>(default)` projections
//! - [`ordering`] — structural equality and key ordering
//! - [`json`] — `serde_json` bridge
//! - [`error`] — error taxonomy

pub mod convert;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
pub mod ordering;
pub mod tag;
pub mod value;

pub use convert::{array_of, FromValue};
pub use decoder::{decode, decode_all, decode_from, Decoder};
pub use encoder::{encode, encode_to, Encoder};
pub use error::{MsgPackError, Result};
pub use ordering::sort_values;
pub use value::{Kind, Value};
