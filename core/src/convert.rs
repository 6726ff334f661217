//! Raw-token to typed-value conversion.
//!
//! The parser never interprets token text itself; every value token goes
//! through a [`ValueConverter`]. The engine ships [`DefaultConverter`], a
//! `FromStr`-based implementation, and callers may plug their own (e.g. to
//! support custom value syntaxes) without touching the parsing machinery.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Value, ValueType};

/// A token could not be converted to the declared target type.
///
/// Carries the field title, the offending raw value and the type name so the
/// caller can render a precise diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{title}: can not convert \"{value}\" to a {type_name}")]
pub struct ConversionError {
    /// Title of the option or argument being converted.
    pub title: String,
    /// The raw token that failed to convert.
    pub value: String,
    /// Name of the declared target type.
    pub type_name: String,
}

impl ConversionError {
    pub fn new(title: &str, value: &str, target: &ValueType) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            type_name: target.name().to_string(),
        }
    }
}

/// Converts a raw string token into a typed [`Value`].
///
/// Implementations must be stateless (or hold only immutable configuration)
/// so a single converter can serve concurrent parses.
pub trait ValueConverter: Send + Sync {
    /// Converts `raw` to a value of type `target`.
    ///
    /// `title` identifies the option or argument for diagnostics; it must be
    /// carried into any returned [`ConversionError`].
    fn convert(&self, title: &str, target: &ValueType, raw: &str)
    -> Result<Value, ConversionError>;
}

/// Standard converter backed by `FromStr` parsing.
///
/// # Examples
///
/// ```
/// use argot_core::{DefaultConverter, Value, ValueConverter, ValueType};
///
/// let converter = DefaultConverter;
/// let v = converter.convert("count", &ValueType::Integer, "17").unwrap();
/// assert_eq!(v, Value::Integer(17));
///
/// let err = converter.convert("count", &ValueType::Integer, "many").unwrap_err();
/// assert_eq!(err.value, "many");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConverter;

impl ValueConverter for DefaultConverter {
    fn convert(
        &self,
        title: &str,
        target: &ValueType,
        raw: &str,
    ) -> Result<Value, ConversionError> {
        let fail = || ConversionError::new(title, raw, target);
        match target {
            ValueType::Bool => raw
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|_| fail()),
            ValueType::String => Ok(Value::String(raw.to_string())),
            ValueType::Integer => raw
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| fail()),
            ValueType::Float => raw.parse::<f64>().map(Value::Float).map_err(|_| fail()),
            ValueType::Path => Ok(Value::Path(PathBuf::from(raw))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_converter_accepts_valid_tokens() {
        let c = DefaultConverter;
        assert_eq!(
            c.convert("f", &ValueType::String, "hello").unwrap(),
            Value::String("hello".into())
        );
        assert_eq!(
            c.convert("f", &ValueType::Bool, "true").unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            c.convert("f", &ValueType::Float, "2.5").unwrap(),
            Value::Float(2.5)
        );
        assert_eq!(
            c.convert("f", &ValueType::Path, "/tmp/x").unwrap(),
            Value::Path("/tmp/x".into())
        );
    }

    #[test]
    fn test_default_converter_reports_field_identity() {
        let err = DefaultConverter
            .convert("threads", &ValueType::Integer, "lots")
            .unwrap_err();
        assert_eq!(err.title, "threads");
        assert_eq!(err.type_name, "integer");
        assert_eq!(
            err.to_string(),
            "threads: can not convert \"lots\" to a integer"
        );
    }
}
