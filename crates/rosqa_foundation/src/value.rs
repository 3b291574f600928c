//! Literal values carried by parameter defaults and assignments.
//!
//! A [`Value`] is produced by the parser wherever the grammar allows a
//! literal and flows unchanged through graph construction, resolution,
//! and question rendering.

use crate::types::ParamType;
use std::fmt;

/// A literal value from a ROSpec source file.
#[derive(Debug, Clone)]
pub enum Value {
    /// A boolean literal.
    Bool(bool),
    /// A signed 64-bit integer literal.
    Int(i64),
    /// A 64-bit floating point literal.
    Double(f64),
    /// A string literal, stored without its surrounding quotes.
    Str(String),
}

impl Value {
    /// The parameter type this value naturally carries.
    #[must_use]
    pub fn param_type(&self) -> ParamType {
        match self {
            Value::Bool(_) => ParamType::Bool,
            Value::Int(_) => ParamType::Int,
            Value::Double(_) => ParamType::Double,
            Value::Str(_) => ParamType::Str,
        }
    }

    /// Returns the boolean payload, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the floating point payload, widening integers.
    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            #[allow(clippy::cast_precision_loss)]
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Renders the value in its canonical answer form.
    ///
    /// Strings render without quotes, booleans as `true`/`false`, and
    /// doubles always carry a decimal point so they stay visually
    /// distinct from integers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Double(d) => {
                if d.fract() == 0.0 && d.is_finite() {
                    write!(f, "{d:.1}")
                } else {
                    write!(f, "{d}")
                }
            }
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

impl PartialEq for Value {
    /// Compares values structurally.
    ///
    /// Doubles compare by bit pattern, so `NaN == NaN` holds and
    /// `0.0 != -0.0`.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

// ============================================================================
// Tests
// ============================================================================
