//! Parsed value types.

use std::borrow::Cow;
use std::fmt;

/// A value decoded from a `print_r()` dump.
///
/// Scalars borrow from the input text; use [`Value::into_owned`] to detach
/// a tree from its source.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value<'a> {
    /// A scalar with empty textual content (`[key] =>`).
    #[default]
    EmptyString,

    /// An unsigned decimal integer literal.
    Integer(u64),

    /// A `digits?.digits` literal.
    Float(f64),

    /// Any other scalar, trimmed of surrounding whitespace.
    String(Cow<'a, str>),

    /// A container whose keys were exactly `0..N-1` in encounter order.
    Sequence(Vec<Value<'a>>),

    /// Any other container, in key insertion order. Keys are unique.
    Mapping(Vec<(Cow<'a, str>, Value<'a>)>),
}

impl<'a> Value<'a> {
    /// Check if the value is an empty string.
    #[inline]
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Value::EmptyString)
    }

    /// Check if the value is an integer.
    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Check if the value is a float.
    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Check if the value is a non-empty string.
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if the value is a sequence.
    #[inline]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Check if the value is a mapping.
    #[inline]
    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// Check if the value is a container of either shape.
    #[inline]
    pub fn is_container(&self) -> bool {
        self.is_sequence() || self.is_mapping()
    }

    /// Get the value as an integer.
    #[inline]
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float. Integers widen.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get the value as a string slice. `EmptyString` yields `""`.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::EmptyString => Some(""),
            Value::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Get the value as a sequence.
    #[inline]
    pub fn as_sequence(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Get the value as a mapping.
    #[inline]
    pub fn as_mapping(&self) -> Option<&[(Cow<'a, str>, Value<'a>)]> {
        match self {
            Value::Mapping(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    /// Look up a child by key.
    ///
    /// Mappings match the key string exactly. Sequences accept the canonical
    /// decimal form of an index, the same form the dump used for it.
    pub fn get(&self, key: &str) -> Option<&Value<'a>> {
        match self {
            Value::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Value::Sequence(items) => {
                let index: usize = key.parse().ok()?;
                if index.to_string() != key {
                    return None;
                }
                items.get(index)
            }
            _ => None,
        }
    }

    /// Number of children of a container, `None` for scalars.
    #[inline]
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Sequence(items) => Some(items.len()),
            Value::Mapping(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Whether a container has no children. Scalars are never empty containers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Convert to an owned value that doesn't borrow from the input.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::EmptyString => Value::EmptyString,
            Value::Integer(i) => Value::Integer(i),
            Value::Float(f) => Value::Float(f),
            Value::String(s) => Value::String(Cow::Owned(s.into_owned())),
            Value::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::into_owned).collect())
            }
            Value::Mapping(entries) => Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (Cow::Owned(k.into_owned()), v.into_owned()))
                    .collect(),
            ),
        }
    }

    /// Get a type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::EmptyString => "empty string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::EmptyString => write!(f, "\"\""),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Mapping(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} => {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}
