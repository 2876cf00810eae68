use std::fmt::{self, Display};

use crate::ast::Number;

/// A runtime value: one of the four kinds spec'd for this language.
/// Booleans only ever arise from [`crate::ast::Comparison`] evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(Number),
    Text(String),
    Boolean(bool),
}

impl Value {
    /// The operand-kind label used in error messages ("integer" and
    /// "fraction" are distinct kinds, matching the runtime value's tag).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Number(Number::Int(_)) => "integer",
            Value::Number(Number::Frac(_)) => "fraction",
            Value::Text(_) => "text",
            Value::Boolean(_) => "boolean",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Boolean(b) => write!(f, "{b}"),
        }
    }
}
