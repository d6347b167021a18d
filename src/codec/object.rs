//! Record builders: `object1` through `object8`.
//!
//! An object codec encodes a record as a `Map` with one `String`-keyed
//! entry per field, in declaration order, and decodes by name lookup:
//! order-independent, first occurrence wins on duplicates, unknown extra
//! entries ignored. A missing field fails with `MissingField`; a field
//! body failure is wrapped in `FieldError(name, ...)`.

use super::{Codec, Field};
use crate::error::{DecodeError, DecodeResult};
use crate::value::Value;

fn decode_field<R, F>(field: &Field<R, F>, pairs: &[(Value, Value)]) -> DecodeResult<F> {
    let entry = pairs.iter().find_map(|(k, v)| match k {
        Value::String(s) if *s == field.name => Some(v),
        _ => None,
    });
    match entry {
        Some(v) => field
            .codec
            .decode(v)
            .map_err(|e| e.in_field(field.name.clone())),
        None => Err(DecodeError::MissingField(field.name.clone())),
    }
}

macro_rules! object_codec {
    ($(#[$doc:meta])* $name:ident, $($field:ident : $ty:ident),+) => {
        $(#[$doc])*
        pub fn $name<R, $($ty),+>(
            constructor: impl Fn($($ty),+) -> R + Send + Sync + 'static,
            $($field: Field<R, $ty>,)+
        ) -> Codec<R>
        where
            R: 'static,
            $($ty: 'static,)+
        {
            let encode_fields = ($($field.clone(),)+);
            let decode_fields = ($($field,)+);
            Codec::custom(
                move |record: &R| {
                    let ($($field,)+) = &encode_fields;
                    Value::Map(vec![
                        $(
                            (
                                Value::String($field.name.clone()),
                                $field.codec.encode(&($field.get)(record)),
                            ),
                        )+
                    ])
                },
                move |value: &Value| {
                    let pairs = match value {
                        Value::Map(pairs) => pairs,
                        other => return Err(DecodeError::mismatch("Map", other)),
                    };
                    let ($($field,)+) = &decode_fields;
                    Ok(constructor($(decode_field($field, pairs)?),+))
                },
            )
        }
    };
}

object_codec!(
    /// Record codec with one named field.
    object1, f1: F1
);
object_codec!(
    /// Record codec with two named fields.
    object2, f1: F1, f2: F2
);
object_codec!(
    /// Record codec with three named fields.
    object3, f1: F1, f2: F2, f3: F3
);
object_codec!(
    /// Record codec with four named fields.
    object4, f1: F1, f2: F2, f3: F3, f4: F4
);
object_codec!(
    /// Record codec with five named fields.
    object5, f1: F1, f2: F2, f3: F3, f4: F4, f5: F5
);
object_codec!(
    /// Record codec with six named fields.
    object6, f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6
);
object_codec!(
    /// Record codec with seven named fields.
    object7, f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6, f7: F7
);
object_codec!(
    /// Record codec with eight named fields.
    object8, f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6, f7: F7, f8: F8
);
