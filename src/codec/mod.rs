//! Codec module - typed bidirectional mapping onto the value tree.
//!
//! A [`Codec<T>`] pairs two pure functions: `encode: &T -> Value` and
//! `decode: &Value -> Result<T, DecodeError>`. Codecs are values: build
//! them from the primitives here, compose them with the container and
//! combinator functions, and share them freely (cloning is an `Arc` bump,
//! and a codec is safe to use from any thread).
//!
//! # Example
//!
//! ```
//! use wirepack::codec::{self, Codec};
//!
//! #[derive(Debug, PartialEq, Clone)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! let point: Codec<Point> = codec::object2(
//!     |x, y| Point { x, y },
//!     codec::field("x", codec::int(), |p: &Point| p.x),
//!     codec::field("y", codec::int(), |p: &Point| p.y),
//! );
//!
//! let p = Point { x: 3, y: -4 };
//! let value = point.encode(&p);
//! assert_eq!(point.decode(&value).unwrap(), p);
//! ```

mod combinator;
mod constrained;
mod container;
mod object;
mod primitive;

use std::sync::Arc;

use bytes::Bytes;

use crate::error::{DecodeResult, EncodeResult};
use crate::value::Value;
use crate::wire::{pack, unpack_exact};

pub use combinator::{fail, lazy, map, one_of, succeed, timestamp, try_map, with_default};
pub use constrained::{int_range, non_empty_list, non_empty_string};
pub use container::{
    any_extension, dict, extension, list, nullable, string_dict, tuple2, tuple3, tuple4,
};
pub use object::{object1, object2, object3, object4, object5, object6, object7, object8};
pub use primitive::{binary, boolean, float, float_strict, int, raw_value, string};

/// A bidirectional, pure mapping between `T` and [`Value`].
///
/// Both halves are shared closures, so `Codec<T>` is `Clone` for any `T`
/// and a single instance can serve concurrent callers; codecs own no
/// state.
pub struct Codec<T> {
    encode_fn: Arc<dyn Fn(&T) -> Value + Send + Sync>,
    decode_fn: Arc<dyn Fn(&Value) -> DecodeResult<T> + Send + Sync>,
}

impl<T> Clone for Codec<T> {
    fn clone(&self) -> Self {
        Codec {
            encode_fn: Arc::clone(&self.encode_fn),
            decode_fn: Arc::clone(&self.decode_fn),
        }
    }
}

impl<T> Codec<T> {
    /// Build a codec from raw encode and decode functions.
    ///
    /// This is the base constructor every combinator in this module is
    /// built on, and the escape hatch for shapes the library does not
    /// provide first-class - notably tagged unions, which the MessagePack
    /// convention spells as a map with a `"type"` discriminator field
    /// (see the crate docs for the pattern).
    pub fn custom<E, D>(encode: E, decode: D) -> Codec<T>
    where
        E: Fn(&T) -> Value + Send + Sync + 'static,
        D: Fn(&Value) -> DecodeResult<T> + Send + Sync + 'static,
    {
        Codec {
            encode_fn: Arc::new(encode),
            decode_fn: Arc::new(decode),
        }
    }

    /// Map `value` onto the value tree.
    pub fn encode(&self, value: &T) -> Value {
        (self.encode_fn)(value)
    }

    /// Map a value tree back to a `T`.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`](crate::DecodeError); container and object
    /// codecs wrap sub-errors in `Field`/`Index` so the failure path
    /// survives to [`crate::format_error`].
    pub fn decode(&self, value: &Value) -> DecodeResult<T> {
        (self.decode_fn)(value)
    }

    /// Encode `value` straight to canonical MessagePack bytes.
    pub fn to_bytes(&self, value: &T) -> EncodeResult<Bytes> {
        pack(&self.encode(value))
    }

    /// Decode a `T` from exactly one MessagePack value.
    ///
    /// # Errors
    ///
    /// Wire-level errors from [`crate::unpack_exact`], then codec-level
    /// errors from [`Codec::decode`].
    pub fn from_bytes(&self, bytes: &[u8]) -> DecodeResult<T> {
        self.decode(&unpack_exact(bytes)?)
    }
}

/// Build a codec from raw encode and decode functions.
///
/// Free-function spelling of [`Codec::custom`].
pub fn custom<T, E, D>(encode: E, decode: D) -> Codec<T>
where
    E: Fn(&T) -> Value + Send + Sync + 'static,
    D: Fn(&Value) -> DecodeResult<T> + Send + Sync + 'static,
{
    Codec::custom(encode, decode)
}

/// One field of an object codec: a wire name, the field's codec, and the
/// accessor that reads the field out of the record on encode.
pub struct Field<R, F> {
    name: String,
    codec: Codec<F>,
    get: Arc<dyn Fn(&R) -> F + Send + Sync>,
}

impl<R, F> Clone for Field<R, F> {
    fn clone(&self) -> Self {
        Field {
            name: self.name.clone(),
            codec: self.codec.clone(),
            get: Arc::clone(&self.get),
        }
    }
}

/// Bind a wire name, a codec, and an accessor into a [`Field`] for the
/// `objectN` builders.
pub fn field<R, F>(
    name: impl Into<String>,
    codec: Codec<F>,
    get: impl Fn(&R) -> F + Send + Sync + 'static,
) -> Field<R, F> {
    Field {
        name: name.into(),
        codec,
        get: Arc::new(get),
    }
}
