use std::io;

use thiserror::Error;

/// Error raised by the [`Lexer`](super::Lexer), with the position at which
/// it was detected.
#[derive(Error, Debug)]
#[error("{source} at {line}:{column}")]
pub struct LexError {
    pub(crate) source: ErrorSource,
    /// 1-based line of the offending character.
    pub line: usize,
    /// 1-based column of the offending character.
    pub column: usize,
}

impl LexError {
    /// The syntax error, if this is one.
    #[must_use]
    pub fn syntax_error(&self) -> Option<&SyntaxError> {
        match &self.source {
            ErrorSource::Syntax(err) => Some(err),
            ErrorSource::Io(_) => None,
        }
    }

    /// Whether the error came from the underlying reader.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self.source, ErrorSource::Io(_))
    }
}

/// Where a [`LexError`] originated.
#[derive(Error, Debug)]
pub enum ErrorSource {
    /// Reading the input failed, or it was not valid UTF-8.
    #[error("read error: {0}")]
    Io(#[from] io::Error),
    /// The input is not well-formed JSON.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

/// Ways JSON text can be malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A character that cannot appear here.
    #[error("invalid character '{}'", .0.escape_debug())]
    InvalidCharacter(char),
    /// A backslash followed by something other than a JSON escape.
    #[error("invalid escape sequence '\\{}'", .0.escape_debug())]
    InvalidEscape(char),
    /// A `\u` escape with a non-hexadecimal digit.
    #[error("invalid unicode escape sequence at character: '{}'", .0.escape_debug())]
    InvalidUnicodeEscapeChar(char),
    /// A number whose text could not be converted.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    /// Input ended inside a token.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// More content after a complete value while only one value is allowed.
    #[error("unexpected character '{}' after the end of the JSON value", .0.escape_debug())]
    TrailingContent(char),
}
