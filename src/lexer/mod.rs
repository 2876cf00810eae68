//! Character-by-character scanner turning source text into a stream of
//! [`Token`]s. Whitespace and comments are skipped internally; every other
//! character produces exactly one token carrying its source [`Position`].
mod error;
mod keywords;
mod token;

pub use error::LexError;
pub use keywords::Keywords;
pub use token::{Number, Position, Token, TokenKind};

use std::iter::Peekable;
use std::rc::Rc;
use std::str::Chars;

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    file: Rc<str>,
    line: usize,
    column: usize,
    keywords: Keywords,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: impl Into<String>) -> Self {
        Self::with_keywords(source, file, Keywords::default())
    }

    pub fn with_keywords(source: &'a str, file: impl Into<String>, keywords: Keywords) -> Self {
        Self {
            chars: source.chars().peekable(),
            file: Rc::from(file.into()),
            line: 1,
            column: 1,
            keywords,
        }
    }

    /// Scan the whole input into a token vector, ending in `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = vec![];

        loop {
            let at_eof = matches!(tokens.last().map(|t: &Token| &t.kind), Some(TokenKind::Eof));
            if at_eof {
                break;
            }
            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    fn pos(&self) -> Position {
        Position::new(self.file.clone(), self.line, self.column)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let next = self.chars.next()?;
        if next == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(next)
    }

    fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('#') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            self.advance();
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Produce the next token. Once the input is exhausted this keeps
    /// returning `Eof` forever, so callers can poll without bookkeeping.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();

        let position = self.pos();

        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", position));
        };

        match c {
            '"' => self.scan_string(position),
            '0'..='9' => self.scan_number(position),
            c if c.is_alphabetic() || c == '_' => Ok(self.scan_identifier(position)),
            ';' => self.single(TokenKind::Semicolon, position),
            '(' => self.single(TokenKind::LParen, position),
            ')' => self.single(TokenKind::RParen, position),
            '{' => self.single(TokenKind::LBrace, position),
            '}' => self.single(TokenKind::RBrace, position),
            '+' => self.single(TokenKind::Plus, position),
            '-' => self.single(TokenKind::Minus, position),
            '*' => self.single(TokenKind::Star, position),
            '/' => self.single(TokenKind::Slash, position),
            '=' => {
                self.advance();
                if self.advance_if('=') {
                    Ok(Token::new(TokenKind::Comparison("==".into()), "==", position))
                } else {
                    Ok(Token::new(TokenKind::Assign, "=", position))
                }
            }
            // `!` alone is accepted here and left for the parser to reject:
            // the grammar never gives it meaning outside `!=`.
            '<' | '>' | '!' => {
                self.advance();
                let mut lexeme = String::from(c);
                if self.advance_if('=') {
                    lexeme.push('=');
                }
                Ok(Token::new(TokenKind::Comparison(lexeme.clone()), lexeme, position))
            }
            other => {
                self.advance();
                Err(LexError::new(
                    position,
                    format!("unrecognised character '{other}'"),
                ))
            }
        }
    }

    fn single(&mut self, kind: TokenKind, position: Position) -> Result<Token, LexError> {
        let lexeme = self.advance().expect("caller peeked a character");
        Ok(Token::new(kind, lexeme.to_string(), position))
    }

    fn scan_string(&mut self, position: Position) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let mut decoded = String::new();

        loop {
            match self.peek() {
                None => return Err(LexError::new(position, "unterminated string literal")),
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_pos = self.pos();
                    self.advance();
                    let escaped = self
                        .peek()
                        .ok_or_else(|| LexError::new(escape_pos.clone(), "unterminated string literal"))?;
                    let decoded_char = match escaped {
                        'n' => '\n',
                        't' => '\t',
                        '"' => '"',
                        '\\' => '\\',
                        other => {
                            return Err(LexError::new(
                                escape_pos,
                                format!("unknown escape sequence '\\{other}'"),
                            ))
                        }
                    };
                    self.advance();
                    decoded.push(decoded_char);
                }
                Some(c) => {
                    decoded.push(c);
                    self.advance();
                }
            }
        }

        Ok(Token::new(TokenKind::String(decoded.clone()), decoded, position))
    }

    fn scan_number(&mut self, position: Position) -> Result<Token, LexError> {
        let mut lexeme = String::new();

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                lexeme.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let mut is_fraction = false;
        if self.peek() == Some('.') {
            is_fraction = true;
            lexeme.push('.');
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    lexeme.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        let number = if is_fraction {
            Number::Frac(lexeme.parse().expect("scanned only digits and one dot"))
        } else {
            let value = lexeme
                .parse()
                .map_err(|_| LexError::new(position.clone(), "integer literal out of range"))?;
            Number::Int(value)
        };

        Ok(Token::new(TokenKind::Number(number), lexeme, position))
    }

    fn scan_identifier(&mut self, position: Position) -> Token {
        let mut lexeme = String::new();

        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                lexeme.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = self
            .keywords
            .lookup(&lexeme)
            .unwrap_or_else(|| TokenKind::Identifier(lexeme.clone()));

        Token::new(kind, lexeme, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source, "<test>")
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_lex_numbers() {
        assert_eq!(
            kinds("42 3.14"),
            vec![
                TokenKind::Number(Number::Int(42)),
                TokenKind::Number(Number::Frac(3.14)),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lex_integer_overflow_errors() {
        let err = Lexer::new("99999999999999999999999", "<test>")
            .tokenize()
            .unwrap_err();
        assert!(err.message.contains("out of range"));
    }

    #[test]
    fn test_lex_string_escapes() {
        let tokens = Lexer::new(r#""a\nb\t\"c\\""#, "<test>").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String("a\nb\t\"c\\".to_string()));
    }

    #[test]
    fn test_lex_unterminated_string_errors() {
        let err = Lexer::new("\"abc", "<test>").tokenize().unwrap_err();
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn test_lex_unknown_escape_errors() {
        let err = Lexer::new(r#""\q""#, "<test>").tokenize().unwrap_err();
        assert!(err.message.contains("unknown escape"));
    }

    #[test]
    fn test_lex_comment_is_skipped() {
        assert_eq!(
            kinds("1 # a comment\n2"),
            vec![
                TokenKind::Number(Number::Int(1)),
                TokenKind::Number(Number::Int(2)),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lex_keywords_and_identifier() {
        assert_eq!(
            kinds("打印 foo"),
            vec![TokenKind::Print, TokenKind::Identifier("foo".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_lex_comparison_operators() {
        assert_eq!(
            kinds("== != < <= > >="),
            vec![
                TokenKind::Comparison("==".into()),
                TokenKind::Comparison("!=".into()),
                TokenKind::Comparison("<".into()),
                TokenKind::Comparison("<=".into()),
                TokenKind::Comparison(">".into()),
                TokenKind::Comparison(">=".into()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lex_bare_bang_lexes_as_comparison_token() {
        // `!` alone lexes fine; the parser is what rejects it (see the
        // open question on bare `!` in the grammar).
        assert_eq!(kinds("!"), vec![TokenKind::Comparison("!".into()), TokenKind::Eof]);
    }

    #[test]
    fn test_lex_unrecognised_character_errors() {
        let err = Lexer::new("`", "<test>").tokenize().unwrap_err();
        assert!(err.message.contains("unrecognised"));
    }

    #[test]
    fn test_lex_tracks_line_and_column() {
        let tokens = Lexer::new("1\n22", "<test>").tokenize().unwrap();
        assert_eq!(tokens[0].position.line, 1);
        assert_eq!(tokens[1].position.line, 2);
        assert_eq!(tokens[1].position.column, 1);
    }
}
