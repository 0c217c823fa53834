//! Resolved operand values

use serde_json::Value;
use std::fmt;

/// Dynamic category of an operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Number,
    Boolean,
    Opaque,
    Missing,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Opaque => "opaque",
            Kind::Missing => "missing",
        };
        f.write_str(name)
    }
}

/// Numeric payload as decoded; every comparison happens in `f64`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Integer(i64),
    Float(f64),
}

impl Numeric {
    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Integer(i) => i as f64,
            Numeric::Float(f) => f,
        }
    }
}

impl From<&serde_json::Number> for Numeric {
    fn from(n: &serde_json::Number) -> Self {
        match n.as_i64() {
            Some(i) => Numeric::Integer(i),
            // u64 beyond i64::MAX and real floats
            None => Numeric::Float(n.as_f64().unwrap_or(f64::NAN)),
        }
    }
}

/// A value resolved from a path, ready for comparison
#[derive(Debug, Clone, PartialEq)]
pub enum OperandValue {
    String(String),
    Number(Numeric),
    Boolean(bool),
    /// Matched, but not a string, number or boolean (object, array, null)
    Opaque(Value),
    /// Nothing matched
    Missing,
}

impl OperandValue {
    pub fn kind(&self) -> Kind {
        match self {
            OperandValue::String(_) => Kind::String,
            OperandValue::Number(_) => Kind::Number,
            OperandValue::Boolean(_) => Kind::Boolean,
            OperandValue::Opaque(_) => Kind::Opaque,
            OperandValue::Missing => Kind::Missing,
        }
    }

    /// Replace an opaque value with its compact JSON text
    pub fn into_textual(self) -> Self {
        match self {
            OperandValue::Opaque(value) => OperandValue::String(value.to_string()),
            other => other,
        }
    }
}

impl From<&Value> for OperandValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => OperandValue::String(s.clone()),
            Value::Number(n) => OperandValue::Number(Numeric::from(n)),
            Value::Bool(b) => OperandValue::Boolean(*b),
            other => OperandValue::Opaque(other.clone()),
        }
    }
}

impl From<Option<&Value>> for OperandValue {
    fn from(value: Option<&Value>) -> Self {
        value.map(OperandValue::from).unwrap_or(OperandValue::Missing)
    }
}
