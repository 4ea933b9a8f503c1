//! Conversion between source values and destination property kinds.
//!
//! Sources produce loosely typed [`Value`]s; view properties and model
//! properties declare the [`ValueKind`] they accept. Conversion is lenient
//! where markup needs it (literal `"3"` into an `Int` property, `Null` into an
//! empty string) and fails with [`ConversionError`] otherwise.

use crate::error::ConversionError;
use crate::model::Value;

/// The kind of value a property accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Accepts anything, unchanged.
    Any,
    Bool,
    Int,
    Float,
    String,
    Object,
    List,
    Document,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Any => "Any",
            ValueKind::Bool => "Bool",
            ValueKind::Int => "Int",
            ValueKind::Float => "Float",
            ValueKind::String => "String",
            ValueKind::Object => "Object",
            ValueKind::List => "List",
            ValueKind::Document => "Document",
        }
    }

    /// The kind that `value` already has, used to convert `*case` values to
    /// the type of the `*switch` value.
    pub fn of(value: &Value) -> ValueKind {
        match value {
            Value::Null | Value::Any(_) => ValueKind::Any,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Object(_) => ValueKind::Object,
            Value::List(_) => ValueKind::List,
            Value::Document(_) => ValueKind::Document,
        }
    }

    /// Convert `value` to this kind.
    pub fn convert(self, value: Value) -> Result<Value, ConversionError> {
        let fail = |value: &Value| ConversionError {
            value: format!("{value:?}"),
            target: self.name(),
        };
        let converted = match (self, value) {
            (ValueKind::Any, value) => value,
            (ValueKind::Bool, Value::Null) => Value::Bool(false),
            (ValueKind::Int, Value::Null) => Value::Int(0),
            (ValueKind::Float, Value::Null) => Value::Float(0.0),
            (ValueKind::String, Value::Null) => Value::String(String::new()),
            (_, Value::Null) => Value::Null,

            (ValueKind::Bool, Value::Bool(b)) => Value::Bool(b),
            (ValueKind::Bool, Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.eq_ignore_ascii_case("true") {
                    Value::Bool(true)
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Value::Bool(false)
                } else {
                    return Err(fail(&Value::String(s)));
                }
            }
            (ValueKind::Bool, Value::Int(n)) => Value::Bool(n != 0),

            (ValueKind::Int, Value::Int(n)) => Value::Int(n),
            (ValueKind::Int, Value::Float(n)) => Value::Int(n as i64),
            (ValueKind::Int, Value::Bool(b)) => Value::Int(i64::from(b)),
            (ValueKind::Int, Value::String(s)) => match s.trim().parse::<i64>() {
                Ok(n) => Value::Int(n),
                Err(_) => return Err(fail(&Value::String(s))),
            },

            (ValueKind::Float, Value::Float(n)) => Value::Float(n),
            (ValueKind::Float, Value::Int(n)) => Value::Float(n as f64),
            (ValueKind::Float, Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(n) => Value::Float(n),
                Err(_) => return Err(fail(&Value::String(s))),
            },

            (ValueKind::String, Value::Any(payload)) => {
                return Err(fail(&Value::Any(payload)));
            }
            (ValueKind::String, other) => Value::String(other.to_string()),

            (ValueKind::Object, v @ Value::Object(_)) => v,
            (ValueKind::List, v @ Value::List(_)) => v,
            (ValueKind::Document, v @ Value::Document(_)) => v,

            (_, other) => return Err(fail(&other)),
        };
        Ok(converted)
    }
}
