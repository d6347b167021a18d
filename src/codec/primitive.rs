//! Primitive codecs, one per scalar value kind.

use bytes::Bytes;

use super::Codec;
use crate::error::DecodeError;
use crate::value::Value;

/// Codec for `bool` ↔ `Boolean`.
pub fn boolean() -> Codec<bool> {
    Codec::custom(
        |b: &bool| Value::Boolean(*b),
        |value| match value {
            Value::Boolean(b) => Ok(*b),
            other => Err(DecodeError::mismatch("Boolean", other)),
        },
    )
}

/// Codec for `i64` ↔ `Integer`.
pub fn int() -> Codec<i64> {
    Codec::custom(
        |n: &i64| Value::Integer(*n),
        |value| match value {
            Value::Integer(n) => Ok(*n),
            other => Err(DecodeError::mismatch("Integer", other)),
        },
    )
}

/// Codec for `f64` ↔ `Float`.
///
/// Accepts an `Integer` on decode, widening it numerically; use
/// [`float_strict`] to reject integers.
pub fn float() -> Codec<f64> {
    Codec::custom(
        |f: &f64| Value::Float(*f),
        |value| match value {
            Value::Float(f) => Ok(*f),
            Value::Integer(n) => Ok(*n as f64),
            other => Err(DecodeError::mismatch("Float", other)),
        },
    )
}

/// Codec for `f64` ↔ `Float` that rejects `Integer` on decode.
pub fn float_strict() -> Codec<f64> {
    Codec::custom(
        |f: &f64| Value::Float(*f),
        |value| match value {
            Value::Float(f) => Ok(*f),
            other => Err(DecodeError::mismatch("Float", other)),
        },
    )
}

/// Codec for `String` ↔ `String`.
pub fn string() -> Codec<String> {
    Codec::custom(
        |s: &String| Value::String(s.clone()),
        |value| match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(DecodeError::mismatch("String", other)),
        },
    )
}

/// Codec for `Bytes` ↔ `Binary`.
pub fn binary() -> Codec<Bytes> {
    Codec::custom(
        |data: &Bytes| Value::Binary(data.clone()),
        |value| match value {
            Value::Binary(data) => Ok(data.clone()),
            other => Err(DecodeError::mismatch("Binary", other)),
        },
    )
}

/// The identity codec on [`Value`]. Decoding never fails.
pub fn raw_value() -> Codec<Value> {
    Codec::custom(|value: &Value| value.clone(), |value| Ok(value.clone()))
}
