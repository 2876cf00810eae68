use std::error::Error;
use std::fmt::{self, Display};

use crate::lexer::Position;

/// Unexpected token kind for the current grammar production. Parsing is
/// aborted on the first mismatch; there is no error recovery.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub position: Position,
    pub expected: String,
    pub actual: String,
}

impl ParseError {
    pub fn new(position: Position, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            position,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.position, self.expected, self.actual
        )
    }
}

impl Error for ParseError {}
