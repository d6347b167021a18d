//! The MessagePack value tree.
//!
//! [`Value`] is the pivot of the crate: the wire layer converts between
//! `Value` and bytes, the codec layer converts between `Value` and domain
//! types. Values are immutable finite trees; equality is structural and,
//! for maps, pair-sequence equality (two maps with the same pairs in a
//! different order are distinct values).
//!
//! # Example
//!
//! ```
//! use wirepack::Value;
//!
//! let v = Value::Map(vec![
//!     (Value::string("id"), Value::Integer(7)),
//!     (Value::string("tags"), Value::Array(vec![Value::string("a")])),
//! ]);
//!
//! assert_eq!(v.kind().to_string(), "Map");
//! ```

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Any MessagePack value.
///
/// Exactly nine variants, one per wire kind. `Map` is an ordered pair
/// list, never a hash container: wire round-trips preserve entry order
/// and keys of any kind (duplicates included) are representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// The nil value (`0xc0`).
    Nil,
    /// A boolean (`0xc2` / `0xc3`).
    Boolean(bool),
    /// A signed 64-bit integer.
    ///
    /// The wire format admits unsigned values up to 2^64 - 1; this crate
    /// models integers as `i64`, so every value in `[-2^63, 2^63 - 1]`
    /// round-trips losslessly and decoding a larger uint64 payload fails
    /// with [`crate::DecodeError::IntegerOverflow`].
    Integer(i64),
    /// A 64-bit IEEE-754 float. Always encoded as float64; float32
    /// payloads are widened on decode.
    Float(f64),
    /// UTF-8 text, at most 2^32 - 1 bytes.
    String(String),
    /// An opaque byte sequence, at most 2^32 - 1 bytes.
    Binary(Bytes),
    /// An ordered sequence of values, at most 2^32 - 1 elements.
    Array(Vec<Value>),
    /// An ordered sequence of key-value pairs, at most 2^32 - 1 pairs.
    /// Duplicate keys are permitted; order is preserved.
    Map(Vec<(Value, Value)>),
    /// A tagged byte payload. Codes 0..=127 are application-defined,
    /// -128..=-1 are reserved by the format (-1 is Timestamp).
    Extension(i8, Bytes),
}

/// The kind of a [`Value`], without its payload.
///
/// The `Display` names are the vocabulary of `TypeMismatch` diagnostics
/// ("expected Integer, got String").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// See [`Value::Nil`].
    Nil,
    /// See [`Value::Boolean`].
    Boolean,
    /// See [`Value::Integer`].
    Integer,
    /// See [`Value::Float`].
    Float,
    /// See [`Value::String`].
    String,
    /// See [`Value::Binary`].
    Binary,
    /// See [`Value::Array`].
    Array,
    /// See [`Value::Map`].
    Map,
    /// See [`Value::Extension`].
    Extension,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Nil => "Nil",
            ValueKind::Boolean => "Boolean",
            ValueKind::Integer => "Integer",
            ValueKind::Float => "Float",
            ValueKind::String => "String",
            ValueKind::Binary => "Binary",
            ValueKind::Array => "Array",
            ValueKind::Map => "Map",
            ValueKind::Extension => "Extension",
        };
        f.write_str(name)
    }
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Binary(_) => ValueKind::Binary,
            Value::Array(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Map,
            Value::Extension(_, _) => ValueKind::Extension,
        }
    }

    /// Build a `String` value.
    pub fn string(s: impl Into<String>) -> Value {
        Value::String(s.into())
    }

    /// Build a `Binary` value.
    pub fn binary(data: impl Into<Bytes>) -> Value {
        Value::Binary(data.into())
    }

    /// Build an `Extension` value.
    pub fn extension(type_code: i8, data: impl Into<Bytes>) -> Value {
        Value::Extension(type_code, data.into())
    }

    /// `true` if this is `Nil`.
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// The boolean payload, if this is a `Boolean`.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer payload, if this is an `Integer`.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The float payload, if this is a `Float`.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The text payload, if this is a `String`.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The byte payload, if this is a `Binary`.
    #[inline]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// The elements, if this is an `Array`.
    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The pairs, if this is a `Map`.
    #[inline]
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// The `(type_code, data)` pair, if this is an `Extension`.
    #[inline]
    pub fn as_extension(&self) -> Option<(i8, &Bytes)> {
        match self {
            Value::Extension(code, data) => Some((*code, data)),
            _ => None,
        }
    }

    /// Look up the first map entry whose key is `String(name)`.
    ///
    /// Returns `None` when this is not a map or no entry matches. On
    /// duplicate keys the first occurrence wins, matching the decode
    /// semantics of the object codecs.
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.as_map()?.iter().find_map(|(k, v)| match k {
            Value::String(s) if s == name => Some(v),
            _ => None,
        })
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Value {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::Array(items)
    }
}
