//! Path-aware decode-error reporting.
//!
//! [`DecodeError`] wrappers record where a failure happened; this module
//! walks the wrapper chain, spells the location as a JSON-Pointer-like
//! path rooted at `$`, and prints the leaf in one line:
//!
//! ```text
//! at $.users[2].email: expected String, got Nil
//! ```

use crate::error::DecodeError;

/// Render a decode error as a one-line, path-prefixed diagnostic.
///
/// The path is derived from the `Field`/`Index` wrapper chain; when the
/// error has no wrappers there is no `at ...:` prefix, just the leaf
/// message.
///
/// # Example
///
/// ```
/// use wirepack::{format_error, DecodeError};
///
/// let err = DecodeError::MissingField("id".to_string())
///     .at_index(2)
///     .in_field("users");
/// assert_eq!(format_error(&err), "at $.users[2]: missing field \"id\"");
/// ```
pub fn format_error(error: &DecodeError) -> String {
    let mut path = String::new();
    let mut current = error;
    loop {
        match current {
            DecodeError::Field { name, source } => {
                path.push('.');
                path.push_str(name);
                current = source;
            }
            DecodeError::Index { index, source } => {
                path.push_str(&format!("[{index}]"));
                current = source;
            }
            leaf => {
                let message = leaf_message(leaf);
                return if path.is_empty() {
                    message
                } else {
                    format!("at ${path}: {message}")
                };
            }
        }
    }
}

/// Leaf rendering: `AllFailed` lists each alternative (with its own
/// relative path); everything else uses its `Display` form.
fn leaf_message(error: &DecodeError) -> String {
    match error {
        DecodeError::AllFailed(failures) => {
            let parts: Vec<String> = failures.iter().map(format_error).collect();
            format!("all alternatives failed: [{}]", parts.join(", "))
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch(expected: &str, actual: &str) -> DecodeError {
        DecodeError::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    #[test]
    fn test_bare_leaf_has_no_prefix() {
        assert_eq!(
            format_error(&mismatch("Integer", "String")),
            "expected Integer, got String"
        );
        assert_eq!(format_error(&DecodeError::UnexpectedEof), "unexpected end of input");
    }

    #[test]
    fn test_field_path() {
        let err = mismatch("Integer", "String").in_field("age");
        assert_eq!(format_error(&err), "at $.age: expected Integer, got String");
    }

    #[test]
    fn test_deep_mixed_path() {
        let err = mismatch("String", "Nil")
            .in_field("email")
            .at_index(2)
            .in_field("users");
        assert_eq!(
            format_error(&err),
            "at $.users[2].email: expected String, got Nil"
        );
    }

    #[test]
    fn test_index_at_root() {
        let err = DecodeError::MissingField("id".to_string()).at_index(0);
        assert_eq!(format_error(&err), "at $[0]: missing field \"id\"");
    }

    #[test]
    fn test_out_of_range_and_custom_verbatim() {
        let err = DecodeError::OutOfRange("integer 11 out of range [0, 10]".to_string())
            .in_field("age");
        assert_eq!(format_error(&err), "at $.age: integer 11 out of range [0, 10]");

        assert_eq!(
            format_error(&DecodeError::Custom("boom".to_string())),
            "boom"
        );
    }

    #[test]
    fn test_extension_mismatch_leaf() {
        let err = DecodeError::ExtensionTypeMismatch {
            expected: -1,
            actual: 4,
        };
        assert_eq!(format_error(&err), "expected extension type -1, got 4");
    }

    #[test]
    fn test_all_failed_lists_alternatives() {
        let err = DecodeError::AllFailed(vec![
            mismatch("Integer", "Map"),
            DecodeError::MissingField("type".to_string()).in_field("shape"),
        ]);
        assert_eq!(
            format_error(&err),
            "all alternatives failed: [expected Integer, got Map, at $.shape: missing field \"type\"]"
        );
    }

    #[test]
    fn test_all_failed_under_a_path() {
        let err = DecodeError::AllFailed(vec![mismatch("Integer", "Nil")]).in_field("value");
        assert_eq!(
            format_error(&err),
            "at $.value: all alternatives failed: [expected Integer, got Nil]"
        );
    }
}
