//! Combinators over existing codecs.

use std::sync::Arc;

use super::Codec;
use crate::error::{DecodeError, DecodeResult};
use crate::timestamp::Timestamp;
use crate::value::Value;

/// Bijective transform: encode through `from`, decode through `to`.
pub fn map<A, B>(
    inner: Codec<A>,
    from: impl Fn(&B) -> A + Send + Sync + 'static,
    to: impl Fn(A) -> B + Send + Sync + 'static,
) -> Codec<B>
where
    A: 'static,
    B: 'static,
{
    let encode_inner = inner.clone();
    Codec::custom(
        move |b: &B| encode_inner.encode(&from(b)),
        move |value| inner.decode(value).map(&to),
    )
}

/// Decoder-fallible transform: like [`map`], but `to` may reject the
/// intermediate value.
pub fn try_map<A, B>(
    inner: Codec<A>,
    from: impl Fn(&B) -> A + Send + Sync + 'static,
    to: impl Fn(A) -> DecodeResult<B> + Send + Sync + 'static,
) -> Codec<B>
where
    A: 'static,
    B: 'static,
{
    let encode_inner = inner.clone();
    Codec::custom(
        move |b: &B| encode_inner.encode(&from(b)),
        move |value| inner.decode(value).and_then(&to),
    )
}

/// First-success alternation.
///
/// The encoder always uses the first codec; no attempt is made to pick
/// the alternative that would re-decode most faithfully. The decoder
/// tries each in order and returns the first success, or
/// `AllFailed` carrying every failure in try order. An empty list
/// encodes `Nil` and decodes to `AllFailed([])`.
pub fn one_of<T: 'static>(alternatives: Vec<Codec<T>>) -> Codec<T> {
    let encode_alternatives = alternatives.clone();
    Codec::custom(
        move |value: &T| match encode_alternatives.first() {
            Some(first) => first.encode(value),
            None => Value::Nil,
        },
        move |value| {
            let mut failures = Vec::with_capacity(alternatives.len());
            for alternative in &alternatives {
                match alternative.decode(value) {
                    Ok(decoded) => return Ok(decoded),
                    Err(failure) => failures.push(failure),
                }
            }
            Err(DecodeError::AllFailed(failures))
        },
    )
}

/// Decode recovery: any failure (including on `Nil`) yields `default`
/// instead. The encoder is unchanged.
pub fn with_default<T>(inner: Codec<T>, default: T) -> Codec<T>
where
    T: Clone + Send + Sync + 'static,
{
    let decode_inner = inner.clone();
    Codec::custom(
        move |value: &T| inner.encode(value),
        move |value| {
            Ok(decode_inner
                .decode(value)
                .unwrap_or_else(|_| default.clone()))
        },
    )
}

/// Codec that carries nothing on the wire: encodes `Nil`, decodes to a
/// clone of `value` whatever the input.
pub fn succeed<T>(value: T) -> Codec<T>
where
    T: Clone + Send + Sync + 'static,
{
    Codec::custom(|_| Value::Nil, move |_| Ok(value.clone()))
}

/// Codec whose decoder always fails with `CustomError(message)`. The
/// encoder emits `Nil`; there is nothing sensible to emit.
pub fn fail<T: 'static>(message: impl Into<String>) -> Codec<T> {
    let message = message.into();
    Codec::custom(
        |_| Value::Nil,
        move |_| Err(DecodeError::Custom(message.clone())),
    )
}

/// Deferred construction, breaking the definition cycle of
/// self-referential codecs.
///
/// `make` is re-invoked on each use; for pure codecs this is
/// observationally equivalent to memoizing the first result.
pub fn lazy<T: 'static>(make: impl Fn() -> Codec<T> + Send + Sync + 'static) -> Codec<T> {
    let make = Arc::new(make);
    let make_decode = Arc::clone(&make);
    Codec::custom(
        move |value: &T| make().encode(value),
        move |value| make_decode().decode(value),
    )
}

/// Codec for [`Timestamp`] ↔ the `-1` extension.
pub fn timestamp() -> Codec<Timestamp> {
    Codec::custom(|ts: &Timestamp| ts.encode(), |value| Timestamp::decode(value))
}
