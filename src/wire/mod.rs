//! Wire module - the MessagePack binary codec.
//!
//! This module implements the byte-level half of the crate:
//! - canonical (shortest-form) encoding of a [`Value`](crate::Value)
//! - prefix-dispatched, streaming-capable decoding
//! - the format-prefix constants shared by both sides
//!
//! # Example
//!
//! ```
//! use wirepack::{pack, unpack_exact, Value};
//!
//! let bytes = pack(&Value::Integer(128)).unwrap();
//! assert_eq!(&bytes[..], &[0xcc, 0x80]);
//! assert_eq!(unpack_exact(&bytes).unwrap(), Value::Integer(128));
//! ```

mod decoder;
mod encoder;

use bytes::Bytes;

use crate::error::{DecodeError, DecodeResult, EncodeResult};
use crate::value::Value;

/// Format prefix bytes, as assigned by the MessagePack specification.
///
/// Single-byte "fix" formats occupy prefix ranges instead and are handled
/// by range guards in the decoder.
pub mod marker {
    /// Nil.
    pub const NIL: u8 = 0xc0;
    /// Reserved, never valid.
    pub const RESERVED: u8 = 0xc1;
    /// Boolean false.
    pub const FALSE: u8 = 0xc2;
    /// Boolean true.
    pub const TRUE: u8 = 0xc3;
    /// Binary, 8-bit length.
    pub const BIN8: u8 = 0xc4;
    /// Binary, 16-bit length.
    pub const BIN16: u8 = 0xc5;
    /// Binary, 32-bit length.
    pub const BIN32: u8 = 0xc6;
    /// Extension, 8-bit length.
    pub const EXT8: u8 = 0xc7;
    /// Extension, 16-bit length.
    pub const EXT16: u8 = 0xc8;
    /// Extension, 32-bit length.
    pub const EXT32: u8 = 0xc9;
    /// 32-bit IEEE-754 float (decode only; the encoder always emits float64).
    pub const FLOAT32: u8 = 0xca;
    /// 64-bit IEEE-754 float.
    pub const FLOAT64: u8 = 0xcb;
    /// Unsigned 8-bit integer.
    pub const UINT8: u8 = 0xcc;
    /// Unsigned 16-bit integer.
    pub const UINT16: u8 = 0xcd;
    /// Unsigned 32-bit integer.
    pub const UINT32: u8 = 0xce;
    /// Unsigned 64-bit integer.
    pub const UINT64: u8 = 0xcf;
    /// Signed 8-bit integer.
    pub const INT8: u8 = 0xd0;
    /// Signed 16-bit integer.
    pub const INT16: u8 = 0xd1;
    /// Signed 32-bit integer.
    pub const INT32: u8 = 0xd2;
    /// Signed 64-bit integer.
    pub const INT64: u8 = 0xd3;
    /// Extension, fixed 1-byte payload.
    pub const FIXEXT1: u8 = 0xd4;
    /// Extension, fixed 2-byte payload.
    pub const FIXEXT2: u8 = 0xd5;
    /// Extension, fixed 4-byte payload.
    pub const FIXEXT4: u8 = 0xd6;
    /// Extension, fixed 8-byte payload.
    pub const FIXEXT8: u8 = 0xd7;
    /// Extension, fixed 16-byte payload.
    pub const FIXEXT16: u8 = 0xd8;
    /// String, 8-bit length.
    pub const STR8: u8 = 0xd9;
    /// String, 16-bit length.
    pub const STR16: u8 = 0xda;
    /// String, 32-bit length.
    pub const STR32: u8 = 0xdb;
    /// Array, 16-bit count.
    pub const ARRAY16: u8 = 0xdc;
    /// Array, 32-bit count.
    pub const ARRAY32: u8 = 0xdd;
    /// Map, 16-bit pair count.
    pub const MAP16: u8 = 0xde;
    /// Map, 32-bit pair count.
    pub const MAP32: u8 = 0xdf;
}

/// Encode a value to its canonical MessagePack bytes.
///
/// Identical values produce identical byte sequences, and the output is
/// always the shortest valid encoding.
///
/// # Errors
///
/// Returns the matching `*TooLong` error when a string, binary, array,
/// map, or extension payload exceeds its 32-bit wire limit.
///
/// # Example
///
/// ```
/// use wirepack::{pack, Value};
///
/// let bytes = pack(&Value::Map(vec![
///     (Value::string("a"), Value::Integer(1)),
/// ]))
/// .unwrap();
/// assert_eq!(&bytes[..], &[0x81, 0xa1, 0x61, 0x01]);
/// ```
pub fn pack(value: &Value) -> EncodeResult<Bytes> {
    let bytes = encoder::encode_value(value)?;
    tracing::trace!(len = bytes.len(), kind = %value.kind(), "packed value");
    Ok(bytes)
}

/// Decode the first value from `input`, returning it with the unread
/// suffix.
///
/// The decoder consumes exactly one complete value; callers streaming
/// concatenated values feed the returned suffix back in. Non-canonical
/// encodings (e.g. a small integer carried in a uint16) are accepted.
///
/// # Errors
///
/// - [`DecodeError::UnexpectedEof`] when the input ends mid-value
/// - [`DecodeError::ReservedFormat`] on the reserved prefix `0xc1`
/// - [`DecodeError::InvalidUtf8`] on a malformed string payload
/// - [`DecodeError::IntegerOverflow`] on a uint64 payload above
///   `i64::MAX` (the value model is signed 64-bit; see [`Value::Integer`])
pub fn unpack(input: &[u8]) -> DecodeResult<(Value, &[u8])> {
    let (value, rest) = decoder::decode_value(input)?;
    tracing::trace!(
        consumed = input.len() - rest.len(),
        remaining = rest.len(),
        "unpacked value"
    );
    Ok((value, rest))
}

/// Decode exactly one value from `input`.
///
/// # Errors
///
/// As [`unpack`], plus [`DecodeError::TrailingBytes`] when input remains
/// after the first complete value.
pub fn unpack_exact(input: &[u8]) -> DecodeResult<Value> {
    let (value, rest) = unpack(input)?;
    if rest.is_empty() {
        Ok(value)
    } else {
        Err(DecodeError::TrailingBytes(rest.len()))
    }
}
