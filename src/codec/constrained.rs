//! Codecs that narrow a primitive to a validated subset.

use super::{int, list, string, try_map, Codec};
use crate::error::DecodeError;

/// Integer codec accepting only `[min, max]`; anything else fails with
/// `OutOfRange`.
pub fn int_range(min: i64, max: i64) -> Codec<i64> {
    try_map(
        int(),
        |n: &i64| *n,
        move |n| {
            if (min..=max).contains(&n) {
                Ok(n)
            } else {
                Err(DecodeError::OutOfRange(format!(
                    "integer {n} out of range [{min}, {max}]"
                )))
            }
        },
    )
}

/// String codec rejecting the empty string.
pub fn non_empty_string() -> Codec<String> {
    try_map(
        string(),
        |s: &String| s.clone(),
        |s| {
            if s.is_empty() {
                Err(DecodeError::OutOfRange(
                    "string must not be empty".to_string(),
                ))
            } else {
                Ok(s)
            }
        },
    )
}

/// List codec rejecting the empty list.
pub fn non_empty_list<T: Clone + 'static>(inner: Codec<T>) -> Codec<Vec<T>> {
    try_map(
        list(inner),
        |items: &Vec<T>| items.clone(),
        |items| {
            if items.is_empty() {
                Err(DecodeError::OutOfRange(
                    "list must not be empty".to_string(),
                ))
            } else {
                Ok(items)
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_int_range_bounds_inclusive() {
        let c = int_range(0, 10);
        assert_eq!(c.decode(&Value::Integer(0)).unwrap(), 0);
        assert_eq!(c.decode(&Value::Integer(10)).unwrap(), 10);
        assert_eq!(
            c.decode(&Value::Integer(11)).unwrap_err(),
            DecodeError::OutOfRange("integer 11 out of range [0, 10]".to_string())
        );
        assert_eq!(
            c.decode(&Value::Integer(-1)).unwrap_err(),
            DecodeError::OutOfRange("integer -1 out of range [0, 10]".to_string())
        );
    }

    #[test]
    fn test_int_range_still_checks_kind() {
        let c = int_range(0, 10);
        assert!(matches!(
            c.decode(&Value::string("5")).unwrap_err(),
            DecodeError::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_non_empty_string() {
        let c = non_empty_string();
        assert_eq!(c.decode(&Value::string("x")).unwrap(), "x");
        assert_eq!(
            c.decode(&Value::string("")).unwrap_err(),
            DecodeError::OutOfRange("string must not be empty".to_string())
        );
    }

    #[test]
    fn test_non_empty_list() {
        let c = non_empty_list(int());
        let one = Value::Array(vec![Value::Integer(1)]);
        assert_eq!(c.decode(&one).unwrap(), vec![1]);
        assert_eq!(c.encode(&vec![1]), one);
        assert_eq!(
            c.decode(&Value::Array(vec![])).unwrap_err(),
            DecodeError::OutOfRange("list must not be empty".to_string())
        );
    }
}
