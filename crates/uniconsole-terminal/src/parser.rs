//! Argument coercion: raw tokens to typed values.

use uniconsole_types::error::{ConsoleError, Result};

use crate::value::{EnumType, TypeTag, Value};

/// Coerce `tokens` positionally into the declared `params`.
///
/// Array parameters are split on `delimiter` and each piece is parsed
/// with the scalar rules.
pub fn parse_args(tokens: &[&str], params: &[TypeTag], delimiter: char) -> Result<Vec<Value>> {
    if tokens.len() != params.len() {
        return Err(ConsoleError::Argument(format!(
            "expected {} argument(s), got {}",
            params.len(),
            tokens.len()
        )));
    }
    tokens
        .iter()
        .zip(params)
        .enumerate()
        .map(|(i, (token, tag))| {
            parse_one(token, tag, delimiter).map_err(|e| match e {
                ConsoleError::Argument(reason) => {
                    ConsoleError::Argument(format!("argument {}: {reason}", i + 1))
                },
                other => other,
            })
        })
        .collect()
}

fn parse_one(token: &str, tag: &TypeTag, delimiter: char) -> Result<Value> {
    match tag {
        TypeTag::Array(elem) => {
            if tag.is_multidimensional() {
                return Err(ConsoleError::UnsupportedShape(format!(
                    "multi-dimensional array parameter {tag}"
                )));
            }
            token
                .split(delimiter)
                .map(|piece| parse_scalar(piece, elem))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        },
        scalar => parse_scalar(token, scalar),
    }
}

/// Parse a single non-array token.
pub fn parse_scalar(token: &str, tag: &TypeTag) -> Result<Value> {
    match tag {
        TypeTag::String => Ok(Value::Str(token.to_string())),
        TypeTag::Boolean => parse_bool(token).map(Value::Bool),
        TypeTag::Integer => token
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid(token, tag)),
        TypeTag::Float => token
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid(token, tag)),
        TypeTag::Enum(e) => parse_enum(token, e),
        TypeTag::Array(_) => Err(ConsoleError::UnsupportedShape(format!(
            "nested array element {tag}"
        ))),
        TypeTag::Tuple(_) => Err(ConsoleError::UnsupportedShape(format!(
            "tuple parameter {tag}"
        ))),
        TypeTag::Void => Err(ConsoleError::Argument(
            "void is not a valid parameter type".to_string(),
        )),
    }
}

fn parse_bool(token: &str) -> Result<bool> {
    if token.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if token.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(invalid(token, &TypeTag::Boolean))
    }
}

/// Member name, or a decimal ordinal within range.
fn parse_enum(token: &str, e: &EnumType) -> Result<Value> {
    if let Some(member) = e.member_named(token) {
        return Ok(Value::Enum(member.to_string()));
    }
    if let Ok(ordinal) = token.parse::<usize>() {
        return e
            .members()
            .get(ordinal)
            .map(|m| Value::Enum(m.clone()))
            .ok_or_else(|| {
                ConsoleError::Argument(format!(
                    "{ordinal} is out of range for {} (0..{})",
                    e.name(),
                    e.members().len()
                ))
            });
    }
    Err(ConsoleError::Argument(format!(
        "'{token}' is not a member of {} ({})",
        e.name(),
        e.members().join(", ")
    )))
}

fn invalid(token: &str, tag: &TypeTag) -> ConsoleError {
    ConsoleError::Argument(format!("'{token}' is not a valid {tag}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode() -> TypeTag {
        TypeTag::Enum(EnumType::new("Mode", ["Fast", "Slow"]))
    }

    #[test]
    fn primitives() {
        let values = parse_args(
            &["42", "-1.5", "TRUE", "hello"],
            &[TypeTag::Integer, TypeTag::Float, TypeTag::Boolean, TypeTag::String],
            ',',
        )
        .unwrap();
        assert_eq!(
            values,
            vec![
                Value::Int(42),
                Value::Float(-1.5),
                Value::Bool(true),
                Value::Str("hello".into())
            ]
        );
    }

    #[test]
    fn float_uses_invariant_decimal_point() {
        assert!(parse_args(&["1,5"], &[TypeTag::Float], ';').is_err());
        assert_eq!(
            parse_args(&["1.5"], &[TypeTag::Float], ';').unwrap(),
            vec![Value::Float(1.5)]
        );
    }

    #[test]
    fn malformed_integer() {
        let err = parse_args(&["abc"], &[TypeTag::Integer], ',').unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("argument 1"));
        assert!(msg.contains("'abc' is not a valid int"));
    }

    #[test]
    fn integer_overflow_is_error() {
        assert!(parse_args(&["99999999999999999999"], &[TypeTag::Integer], ',').is_err());
    }

    #[test]
    fn enum_by_name_ignores_case() {
        assert_eq!(
            parse_args(&["slow"], &[mode()], ',').unwrap(),
            vec![Value::Enum("Slow".into())]
        );
    }

    #[test]
    fn enum_by_ordinal() {
        assert_eq!(
            parse_args(&["0"], &[mode()], ',').unwrap(),
            vec![Value::Enum("Fast".into())]
        );
        let err = parse_args(&["7"], &[mode()], ',').unwrap_err();
        assert!(format!("{err}").contains("out of range"));
    }

    #[test]
    fn enum_unknown_member() {
        let err = parse_args(&["medium"], &[mode()], ',').unwrap_err();
        assert!(matches!(err, ConsoleError::Argument(_)));
    }

    #[test]
    fn array_of_ints() {
        assert_eq!(
            parse_args(&["1,2,3"], &[TypeTag::array(TypeTag::Integer)], ',').unwrap(),
            vec![Value::from(vec![1i64, 2, 3])]
        );
    }

    #[test]
    fn array_with_custom_delimiter() {
        assert_eq!(
            parse_args(&["a;b"], &[TypeTag::array(TypeTag::String)], ';').unwrap(),
            vec![Value::from(vec!["a", "b"])]
        );
    }

    #[test]
    fn array_of_enums() {
        assert_eq!(
            parse_args(&["fast,SLOW"], &[TypeTag::array(mode())], ',').unwrap(),
            vec![Value::Array(vec![
                Value::Enum("Fast".into()),
                Value::Enum("Slow".into())
            ])]
        );
    }

    #[test]
    fn array_bad_element() {
        let err = parse_args(&["1,x,3"], &[TypeTag::array(TypeTag::Integer)], ',').unwrap_err();
        assert!(matches!(err, ConsoleError::Argument(_)));
    }

    #[test]
    fn array_empty_piece_is_error() {
        assert!(parse_args(&["1,,3"], &[TypeTag::array(TypeTag::Integer)], ',').is_err());
    }

    #[test]
    fn multidimensional_parameter_unsupported() {
        let tag = TypeTag::array(TypeTag::array(TypeTag::Integer));
        let err = parse_args(&["1,2"], &[tag], ',').unwrap_err();
        assert!(matches!(err, ConsoleError::UnsupportedShape(_)));
    }

    #[test]
    fn tuple_parameter_unsupported() {
        let tag = TypeTag::Tuple(vec![TypeTag::Integer, TypeTag::Integer]);
        let err = parse_args(&["1,2"], &[tag], ',').unwrap_err();
        assert!(matches!(err, ConsoleError::UnsupportedShape(_)));
    }

    #[test]
    fn count_mismatch() {
        let err = parse_args(&["1"], &[TypeTag::Integer, TypeTag::Integer], ',').unwrap_err();
        assert!(format!("{err}").contains("expected 2 argument(s), got 1"));
    }

    #[test]
    fn string_is_identity() {
        assert_eq!(
            parse_args(&["Some,Thing"], &[TypeTag::String], ',').unwrap(),
            vec![Value::Str("Some,Thing".into())]
        );
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn int_array_roundtrips(
                items in proptest::collection::vec(any::<i64>(), 1..20),
                delimiter in proptest::sample::select(vec![',', ';', '|']),
            ) {
                let text = items
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(&delimiter.to_string());
                let parsed = parse_args(&[text.as_str()], &[TypeTag::array(TypeTag::Integer)], delimiter).unwrap();
                prop_assert_eq!(parsed, vec![Value::from(items)]);
            }
        }
    }
}
