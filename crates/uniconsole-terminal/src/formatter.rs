//! Rendering command results as display text.

use uniconsole_types::error::{ConsoleError, Result};

use crate::value::Value;

/// Render `value` for display.
///
/// `Void` renders as `void_feedback`; one-dimensional arrays are joined
/// with `separator`; arrays of arrays are rejected.
pub fn format_value(value: &Value, void_feedback: &str, separator: &str) -> Result<String> {
    match value {
        Value::Void => Ok(void_feedback.to_string()),
        Value::Str(s) => Ok(s.clone()),
        Value::Array(items) => {
            if value.is_multidimensional() {
                return Err(ConsoleError::UnsupportedShape(
                    "multi-dimensional arrays cannot be displayed".to_string(),
                ));
            }
            let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
            Ok(parts.join(separator))
        },
        other => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEEDBACK: &str = "Command executed successfully";

    #[test]
    fn void_uses_feedback() {
        assert_eq!(format_value(&Value::Void, FEEDBACK, ", ").unwrap(), FEEDBACK);
    }

    #[test]
    fn string_verbatim() {
        let v = Value::from("  spaced  ");
        assert_eq!(format_value(&v, FEEDBACK, ", ").unwrap(), "  spaced  ");
    }

    #[test]
    fn scalars() {
        assert_eq!(format_value(&Value::Int(9), FEEDBACK, ", ").unwrap(), "9");
        assert_eq!(format_value(&Value::Float(2.5), FEEDBACK, ", ").unwrap(), "2.5");
        assert_eq!(format_value(&Value::Bool(false), FEEDBACK, ", ").unwrap(), "false");
        assert_eq!(
            format_value(&Value::Enum("Red".into()), FEEDBACK, ", ").unwrap(),
            "Red"
        );
    }

    #[test]
    fn collection_joined() {
        let v = Value::from(vec![1i64, 2, 3]);
        assert_eq!(format_value(&v, FEEDBACK, ", ").unwrap(), "1, 2, 3");
        assert_eq!(format_value(&v, FEEDBACK, "|").unwrap(), "1|2|3");
    }

    #[test]
    fn empty_collection() {
        let v = Value::Array(Vec::new());
        assert_eq!(format_value(&v, FEEDBACK, ", ").unwrap(), "");
    }

    #[test]
    fn multidimensional_rejected() {
        let v = Value::from(vec![vec![1i64, 2], vec![3, 4]]);
        let err = format_value(&v, FEEDBACK, ", ").unwrap_err();
        assert!(matches!(err, ConsoleError::UnsupportedShape(_)));
    }

    #[test]
    fn opaque_uses_its_text() {
        let v = Value::from((3i64, 2i64));
        assert_eq!(format_value(&v, FEEDBACK, ", ").unwrap(), "(3, 2)");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn void_is_never_empty(feedback in "[a-zA-Z !.]{1,40}", sep in "[,;| ]{0,3}") {
                let out = format_value(&Value::Void, &feedback, &sep).unwrap();
                prop_assert_eq!(&out, &feedback);
                prop_assert!(!out.is_empty());
            }
        }
    }
}
