//! Typed values flowing in and out of commands.
//!
//! [`TypeTag`] describes a declared parameter or return shape and [`Value`]
//! carries a runtime value of one of those shapes. Both are closed sets so
//! the parser and formatter match on them exhaustively.

use std::fmt;

/// A named enumeration with ordered member names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumType {
    name: String,
    members: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Canonical member name matching `token`, ignoring case.
    pub fn member_named(&self, token: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.to_lowercase() == token.to_lowercase())
            .map(String::as_str)
    }
}

/// Declared shape of a parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Void,
    Boolean,
    Integer,
    Float,
    String,
    Enum(EnumType),
    Array(Box<TypeTag>),
    /// Fixed-size group of values; only valid as a return type.
    Tuple(Vec<TypeTag>),
}

impl TypeTag {
    /// One-dimensional array of `elem`.
    pub fn array(elem: TypeTag) -> Self {
        Self::Array(Box::new(elem))
    }

    /// `true` for arrays whose elements are themselves arrays.
    pub fn is_multidimensional(&self) -> bool {
        matches!(self, Self::Array(elem) if matches!(**elem, Self::Array(_)))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Boolean => f.write_str("bool"),
            Self::Integer => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::String => f.write_str("string"),
            Self::Enum(e) => f.write_str(e.name()),
            Self::Array(elem) => write!(f, "{elem}[]"),
            Self::Tuple(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "({})", parts.join(", "))
            },
        }
    }
}

/// A runtime argument or return value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value; the command returns nothing.
    Void,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Canonical member name of an enum value.
    Enum(String),
    Array(Vec<Value>),
    /// Textual form of a shape with no native representation (tuples, structs).
    Opaque(String),
}

impl Value {
    /// Wrap anything displayable as an opaque value.
    pub fn opaque(value: impl fmt::Display) -> Self {
        Self::Opaque(value.to_string())
    }

    /// `true` for arrays holding at least one array.
    pub fn is_multidimensional(&self) -> bool {
        matches!(self, Self::Array(items) if items.iter().any(|i| matches!(i, Self::Array(_))))
    }

    /// Short name of this value's shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Enum(_) => "enum",
            Self::Array(_) => "array",
            Self::Opaque(_) => "opaque",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// String or enum member text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) | Self::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) | Self::Enum(s) | Self::Opaque(s) => f.write_str(s),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Void
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Self::Float(f64::from(x))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Void, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Self::opaque(format_args!("({}, {})", a.into(), b.into()))
    }
}
