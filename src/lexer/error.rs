use std::error::Error;
use std::fmt::{self, Display};

use super::token::Position;

/// A malformed token, an unterminated string, an unknown escape sequence,
/// or an unrecognised character.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub position: Position,
    pub message: String,
}

impl LexError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

impl Error for LexError {}
