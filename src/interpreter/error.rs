use std::error::Error;
use std::fmt::{self, Display};

use crate::lexer::Position;

/// A failure raised while evaluating the AST: type mismatch, unbound
/// variable, division by zero, loop iteration cap, or a failed module
/// load. Always carries a position, when no single token is to blame
/// (e.g. division by zero deep in an expression), the enclosing
/// statement's position is used instead of omitting one.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub position: Position,
    pub message: String,
}

impl RuntimeError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

impl Error for RuntimeError {}
