//! Container codecs: options, sequences, mappings, extensions, tuples.

use std::collections::BTreeMap;

use bytes::Bytes;

use super::Codec;
use crate::error::{DecodeError, DecodeResult};
use crate::value::Value;

/// Codec for `Option<T>`: `None` ↔ `Nil`, `Some(x)` via `inner`.
///
/// On decode, `Nil` wins before `inner` sees the value, so an inner codec
/// that itself accepts `Nil` never gets the chance.
pub fn nullable<T: 'static>(inner: Codec<T>) -> Codec<Option<T>> {
    let encode_inner = inner.clone();
    Codec::custom(
        move |opt: &Option<T>| match opt {
            Some(x) => encode_inner.encode(x),
            None => Value::Nil,
        },
        move |value| match value {
            Value::Nil => Ok(None),
            other => inner.decode(other).map(Some),
        },
    )
}

/// Codec for `Vec<T>` ↔ `Array`, element failures wrapped in
/// `IndexError`.
pub fn list<T: 'static>(inner: Codec<T>) -> Codec<Vec<T>> {
    let encode_inner = inner.clone();
    Codec::custom(
        move |items: &Vec<T>| Value::Array(items.iter().map(|x| encode_inner.encode(x)).collect()),
        move |value| match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| inner.decode(item).map_err(|e| e.at_index(i)))
                .collect(),
            other => Err(DecodeError::mismatch("Array", other)),
        },
    )
}

/// Codec for a string-keyed mapping ↔ `Map` with `String` keys.
///
/// Encode order is the map's iteration order. On decode every key must be
/// a `String` (else `TypeMismatch("String key", ...)`), value failures are
/// wrapped in `FieldError(key, ...)`, and on duplicate keys the first
/// occurrence wins.
pub fn string_dict<V: 'static>(values: Codec<V>) -> Codec<BTreeMap<String, V>> {
    let encode_values = values.clone();
    Codec::custom(
        move |map: &BTreeMap<String, V>| {
            Value::Map(
                map.iter()
                    .map(|(k, v)| (Value::String(k.clone()), encode_values.encode(v)))
                    .collect(),
            )
        },
        move |value| match value {
            Value::Map(pairs) => {
                let mut out = BTreeMap::new();
                for (key, val) in pairs {
                    let name = match key {
                        Value::String(s) => s,
                        other => return Err(DecodeError::mismatch("String key", other)),
                    };
                    if out.contains_key(name) {
                        continue;
                    }
                    let decoded = values
                        .decode(val)
                        .map_err(|e| e.in_field(name.clone()))?;
                    out.insert(name.clone(), decoded);
                }
                Ok(out)
            }
            other => Err(DecodeError::mismatch("Map", other)),
        },
    )
}

/// Codec for a general-keyed mapping ↔ `Map`.
///
/// The carrier is a pair list, preserving arbitrary key order and
/// admitting non-`Ord` keys. Key and value failures are both wrapped in
/// `IndexError(pair_index, ...)`.
pub fn dict<K: 'static, V: 'static>(keys: Codec<K>, values: Codec<V>) -> Codec<Vec<(K, V)>> {
    let encode_keys = keys.clone();
    let encode_values = values.clone();
    Codec::custom(
        move |pairs: &Vec<(K, V)>| {
            Value::Map(
                pairs
                    .iter()
                    .map(|(k, v)| (encode_keys.encode(k), encode_values.encode(v)))
                    .collect(),
            )
        },
        move |value| match value {
            Value::Map(pairs) => pairs
                .iter()
                .enumerate()
                .map(|(i, (k, v))| {
                    let key = keys.decode(k).map_err(|e| e.at_index(i))?;
                    let val = values.decode(v).map_err(|e| e.at_index(i))?;
                    Ok((key, val))
                })
                .collect(),
            other => Err(DecodeError::mismatch("Map", other)),
        },
    )
}

/// Codec for the payload of a specific extension type.
///
/// Decode demands the exact type code, failing with
/// `ExtensionTypeMismatch` on any other.
pub fn extension(type_code: i8) -> Codec<Bytes> {
    Codec::custom(
        move |data: &Bytes| Value::Extension(type_code, data.clone()),
        move |value| match value {
            Value::Extension(code, data) if *code == type_code => Ok(data.clone()),
            Value::Extension(code, _) => Err(DecodeError::ExtensionTypeMismatch {
                expected: type_code,
                actual: *code,
            }),
            other => Err(DecodeError::mismatch("Extension", other)),
        },
    )
}

/// Codec exposing any extension as its `(type_code, data)` pair.
pub fn any_extension() -> Codec<(i8, Bytes)> {
    Codec::custom(
        |(code, data): &(i8, Bytes)| Value::Extension(*code, data.clone()),
        |value| match value {
            Value::Extension(code, data) => Ok((*code, data.clone())),
            other => Err(DecodeError::mismatch("Extension", other)),
        },
    )
}

fn expect_tuple(value: &Value, len: usize) -> DecodeResult<&[Value]> {
    match value {
        Value::Array(items) if items.len() == len => Ok(items),
        Value::Array(items) => Err(DecodeError::TypeMismatch {
            expected: format!("array of {len} elements"),
            actual: format!("array of {} elements", items.len()),
        }),
        other => Err(DecodeError::mismatch("Array", other)),
    }
}

/// Codec for a pair ↔ a two-element `Array`. Decode demands the exact
/// length.
pub fn tuple2<A: 'static, B: 'static>(first: Codec<A>, second: Codec<B>) -> Codec<(A, B)> {
    let encode_a = first.clone();
    let encode_b = second.clone();
    Codec::custom(
        move |(a, b): &(A, B)| Value::Array(vec![encode_a.encode(a), encode_b.encode(b)]),
        move |value| {
            let items = expect_tuple(value, 2)?;
            Ok((
                first.decode(&items[0]).map_err(|e| e.at_index(0))?,
                second.decode(&items[1]).map_err(|e| e.at_index(1))?,
            ))
        },
    )
}

/// Codec for a triple ↔ a three-element `Array`.
pub fn tuple3<A: 'static, B: 'static, C: 'static>(
    first: Codec<A>,
    second: Codec<B>,
    third: Codec<C>,
) -> Codec<(A, B, C)> {
    let encode_a = first.clone();
    let encode_b = second.clone();
    let encode_c = third.clone();
    Codec::custom(
        move |(a, b, c): &(A, B, C)| {
            Value::Array(vec![
                encode_a.encode(a),
                encode_b.encode(b),
                encode_c.encode(c),
            ])
        },
        move |value| {
            let items = expect_tuple(value, 3)?;
            Ok((
                first.decode(&items[0]).map_err(|e| e.at_index(0))?,
                second.decode(&items[1]).map_err(|e| e.at_index(1))?,
                third.decode(&items[2]).map_err(|e| e.at_index(2))?,
            ))
        },
    )
}

/// Codec for a quadruple ↔ a four-element `Array`.
pub fn tuple4<A: 'static, B: 'static, C: 'static, D: 'static>(
    first: Codec<A>,
    second: Codec<B>,
    third: Codec<C>,
    fourth: Codec<D>,
) -> Codec<(A, B, C, D)> {
    let encode_a = first.clone();
    let encode_b = second.clone();
    let encode_c = third.clone();
    let encode_d = fourth.clone();
    Codec::custom(
        move |(a, b, c, d): &(A, B, C, D)| {
            Value::Array(vec![
                encode_a.encode(a),
                encode_b.encode(b),
                encode_c.encode(c),
                encode_d.encode(d),
            ])
        },
        move |value| {
            let items = expect_tuple(value, 4)?;
            Ok((
                first.decode(&items[0]).map_err(|e| e.at_index(0))?,
                second.decode(&items[1]).map_err(|e| e.at_index(1))?,
                third.decode(&items[2]).map_err(|e| e.at_index(2))?,
                fourth.decode(&items[3]).map_err(|e| e.at_index(3))?,
            ))
        },
    )
}
