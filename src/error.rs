//! Error types for wirepack.
//!
//! Two orthogonal taxonomies: [`EncodeError`] is flat, one kind per
//! wire-limit violation; [`DecodeError`] is recursive, with wire-level
//! leaves, codec-level leaves, and the wrapper variants that carry the
//! structural location of a failure ([`DecodeError::Field`],
//! [`DecodeError::Index`], [`DecodeError::AllFailed`]).
//!
//! The `Display` impls here render a flat, nested one-liner. For the
//! path-aware form (`at $.users[2].email: expected String, got Nil`) use
//! [`crate::format_error`].

use thiserror::Error;

/// Errors produced while encoding a [`crate::Value`] to bytes.
///
/// Each variant carries the offending quantity. All length limits come
/// from the MessagePack 32-bit width fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Integer outside the encodable range.
    ///
    /// Cannot occur for `i64` payloads (every `i64` has a canonical
    /// format); kept because the taxonomy is part of the wire contract.
    #[error("integer {0} outside the encodable range")]
    IntegerTooLarge(i64),

    /// String payload longer than 2^32 - 1 bytes.
    #[error("string of {0} bytes exceeds the str32 limit")]
    StringTooLong(usize),

    /// Binary payload longer than 2^32 - 1 bytes.
    #[error("binary of {0} bytes exceeds the bin32 limit")]
    BinaryTooLong(usize),

    /// Array with more than 2^32 - 1 elements.
    #[error("array of {0} elements exceeds the array32 limit")]
    ArrayTooLong(usize),

    /// Map with more than 2^32 - 1 pairs.
    #[error("map of {0} pairs exceeds the map32 limit")]
    MapTooLong(usize),

    /// Extension type code outside [-128, 127].
    ///
    /// Unrepresentable with an `i8` code; kept for taxonomy parity.
    #[error("invalid extension type code {0}")]
    InvalidExtensionTypeCode(i64),

    /// Extension payload longer than 2^32 - 1 bytes.
    #[error("extension payload of {0} bytes exceeds the ext32 limit")]
    ExtensionDataTooLong(usize),
}

/// Errors produced while decoding bytes or mapping a [`crate::Value`]
/// through a codec.
///
/// Wire-level variants come out of [`crate::unpack`]; codec-level variants
/// out of [`Codec::decode`](crate::codec::Codec::decode). The wrapper
/// variants never lose the original leaf: [`crate::format_error`] derives
/// the failure path from the nested chain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Input ended before the current value was complete.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// First byte of a value is not a known format prefix.
    #[error("invalid format prefix 0x{0:02x}")]
    InvalidFormat(u8),

    /// String payload is not valid UTF-8.
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,

    /// A uint64 payload does not fit the signed 64-bit value model.
    #[error("unsigned integer does not fit in 64-bit signed range")]
    IntegerOverflow,

    /// The reserved prefix 0xc1 (never valid MessagePack).
    #[error("reserved format prefix 0x{0:02x}")]
    ReservedFormat(u8),

    /// [`crate::unpack_exact`] found bytes after the first complete value.
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    /// A codec met a value of the wrong kind.
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        /// What the codec wanted, e.g. `"Integer"`.
        expected: String,
        /// What it found, e.g. `"String"`.
        actual: String,
    },

    /// An object codec found no entry for a required field name.
    #[error("missing field \"{0}\"")]
    MissingField(String),

    /// An extension codec met a payload with a different type code.
    #[error("expected extension type {expected}, got {actual}")]
    ExtensionTypeMismatch {
        /// The type code the codec was built for.
        expected: i8,
        /// The type code found on the value.
        actual: i8,
    },

    /// A constrained codec rejected an in-kind but out-of-bounds value.
    #[error("{0}")]
    OutOfRange(String),

    /// A user codec (`fail`, `try_map`, `custom`) rejected the value.
    #[error("{0}")]
    Custom(String),

    /// Failure inside a named map entry.
    #[error("at field \"{name}\": {source}")]
    Field {
        /// Wire name of the map entry.
        name: String,
        /// The failure inside it.
        #[source]
        source: Box<DecodeError>,
    },

    /// Failure inside an array element.
    #[error("at index [{index}]: {source}")]
    Index {
        /// Zero-based element position.
        index: usize,
        /// The failure inside it.
        #[source]
        source: Box<DecodeError>,
    },

    /// Every alternative of a `one_of` codec failed.
    #[error("all alternatives failed")]
    AllFailed(Vec<DecodeError>),
}

impl DecodeError {
    /// Wrap an error as occurring inside the map entry `name`.
    pub fn in_field(self, name: impl Into<String>) -> Self {
        DecodeError::Field {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// Wrap an error as occurring inside the array element `index`.
    pub fn at_index(self, index: usize) -> Self {
        DecodeError::Index {
            index,
            source: Box::new(self),
        }
    }

    /// Build a `TypeMismatch` from the expected kind name and the value met.
    pub fn mismatch(expected: impl Into<String>, actual: &crate::Value) -> Self {
        DecodeError::TypeMismatch {
            expected: expected.into(),
            actual: actual.kind().to_string(),
        }
    }
}

/// Result alias for encode operations.
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

/// Result alias for decode operations.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
