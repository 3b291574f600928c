//! Parameter types for ROSpec declarations.
//!
//! Every parameter a node type declares carries one of four scalar
//! types. Assignments from any scope must carry a value the declared
//! type accepts; the only implicit conversion is integer to double.

use crate::value::Value;
use std::fmt;

/// The declared type of a node-type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Boolean parameter (`true` or `false`).
    Bool,
    /// Signed 64-bit integer parameter.
    Int,
    /// 64-bit floating point parameter.
    Double,
    /// String parameter.
    Str,
}

impl ParamType {
    /// All parameter types, in declaration-surface order.
    pub const ALL: [ParamType; 4] = [
        ParamType::Bool,
        ParamType::Int,
        ParamType::Double,
        ParamType::Str,
    ];

    /// Parses the surface name of a parameter type.
    ///
    /// Returns `None` for names outside `bool`, `int`, `double`, and
    /// `string`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(ParamType::Bool),
            "int" => Some(ParamType::Int),
            "double" => Some(ParamType::Double),
            "string" => Some(ParamType::Str),
            _ => None,
        }
    }

    /// The surface name of this type as it appears in declarations.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ParamType::Bool => "bool",
            ParamType::Int => "int",
            ParamType::Double => "double",
            ParamType::Str => "string",
        }
    }

    /// Returns true when a value may be assigned to a parameter of
    /// this type.
    ///
    /// Integer values widen to `double`; no other conversion applies.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ParamType::Bool, Value::Bool(_))
            | (ParamType::Int, Value::Int(_))
            | (ParamType::Double, Value::Double(_) | Value::Int(_))
            | (ParamType::Str, Value::Str(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Tests
// ============================================================================
