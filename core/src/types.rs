//! Typed values produced by the parsing engine.
//!
//! Options and positional arguments declare a [`ValueType`]; the converter
//! turns raw tokens into [`Value`]s of that type. Both types round-trip
//! through [`serde`] so a fully-parsed invocation can be serialized.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Target type for an option or positional argument value.
///
/// # Examples
///
/// ```
/// use argot_core::ValueType;
///
/// let vt = ValueType::default();
/// assert_eq!(vt, ValueType::String);
/// assert_eq!(ValueType::Integer.name(), "integer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ValueType {
    /// Boolean flag or explicit `true`/`false` value.
    Bool,
    /// Arbitrary string (the default).
    #[default]
    String,
    /// Signed integer.
    Integer,
    /// Floating-point number.
    Float,
    /// Filesystem path.
    Path,
}

impl ValueType {
    /// Human-readable type name, used in conversion diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Path => "path",
        }
    }
}

/// A typed value bound to an option or argument during parsing.
///
/// Flags (arity 0) record `Value::Bool(true)`. Options with arity greater
/// than one record a single `Value::List` per occurrence.
///
/// # Examples
///
/// ```
/// use argot_core::Value;
///
/// let v = Value::Integer(42);
/// assert_eq!(v.as_integer(), Some(42));
/// assert_eq!(v.as_str(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    String(String),
    Integer(i64),
    Float(f64),
    Path(PathBuf),
    /// Values of a single multi-arity option occurrence, in token order.
    List(Vec<Value>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathBuf> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values.as_slice()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::String("x".into()).as_str(), Some("x"));
        assert_eq!(Value::Integer(-3).as_integer(), Some(-3));
        assert_eq!(Value::Bool(true).as_str(), None);
    }

    #[test]
    fn test_value_serde_round_trip() {
        let value = Value::List(vec![Value::Integer(1), Value::String("two".into())]);
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
