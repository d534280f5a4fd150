//! Pull-based JSON lexer.
//!
//! The lexer turns JSON text into [`JsonToken`]s one at a time. It tracks
//! just enough structure to enforce token order (a `:` after every key, a `,`
//! between members, no trailing commas) and reports positions as 1-based
//! line and column.
//!
//! Balance is left to the consumer: when the input ends between tokens the
//! lexer reports end of input even if containers are still open, so the
//! [`Transducer`](crate::Transducer) can tell a truncated document apart from
//! a malformed one. Input ending inside a token is a
//! [`SyntaxError::UnexpectedEndOfInput`].
//!
//! # Examples
//!
//! ```rust
//! use json2xml::{JsonNumber, JsonToken, Lexer, LexerOptions};
//!
//! let tokens: Vec<_> = Lexer::for_str(r#"{"n": 1e3}"#, LexerOptions::default())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(
//!     tokens,
//!     vec![
//!         JsonToken::ObjectBegin,
//!         JsonToken::String("n".into()),
//!         JsonToken::Number(JsonNumber::Lexeme("1e3".into())),
//!         JsonToken::ObjectEnd,
//!     ]
//! );
//! ```
mod error;
mod escape_buffer;
mod input;
mod literal_buffer;
mod options;


use std::{io, mem};

pub use error::{ErrorSource, LexError, SyntaxError};
use escape_buffer::UnicodeEscapeBuffer;
pub use input::{CharRead, ReadInput, StrInput};
use literal_buffer::{ExpectedLiteralBuffer, Step};
pub use options::LexerOptions;

use crate::{JsonNumber, JsonToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    BeforePropertyName { first: bool },
    AfterPropertyName,
    BeforePropertyValue,
    BeforeArrayValue { first: bool },
    AfterPropertyValue,
    AfterArrayValue,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    Start,
    Sign,
    Zero,
    Integer,
    Point,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentInteger,
}

/// Result of one backslash escape.
enum Escaped {
    Char(char),
    /// A `\u` code unit, possibly half of a surrogate pair.
    Unit(u16),
}

/// The JSON lexer.
///
/// Implements [`Iterator`], and so [`TokenSource`](crate::TokenSource). The
/// iterator ends at end of input or right after the first error.
#[derive(Debug)]
pub struct Lexer<R> {
    input: R,
    /// One character of lookahead; `Some(None)` is a peeked end of input.
    peeked: Option<Option<char>>,
    line: usize,
    column: usize,

    state: ParseState,
    containers: Vec<Container>,

    /// Reused for strings and numbers.
    buffer: String,
    unicode_escape_buffer: UnicodeEscapeBuffer,

    options: LexerOptions,
    finished: bool,
}

impl<'a> Lexer<StrInput<'a>> {
    /// Creates a lexer over a string slice.
    #[must_use]
    pub fn for_str(text: &'a str, options: LexerOptions) -> Self {
        Self::new(StrInput::new(text), options)
    }
}

impl<R: io::Read> Lexer<ReadInput<R>> {
    /// Creates a lexer decoding UTF-8 from a reader.
    pub fn for_reader(reader: R, options: LexerOptions) -> Self {
        Self::new(ReadInput::new(reader), options)
    }
}

impl<R: CharRead> Lexer<R> {
    /// Creates a lexer over any character input.
    pub fn new(input: R, options: LexerOptions) -> Self {
        Self {
            input,
            peeked: None,
            line: 1,
            column: 1,
            state: ParseState::Start,
            containers: Vec::with_capacity(16),
            buffer: String::new(),
            unicode_escape_buffer: UnicodeEscapeBuffer::new(),
            options,
            finished: false,
        }
    }

    /// Current 1-based line and column.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    fn lex(&mut self) -> Result<Option<JsonToken>, LexError> {
        loop {
            self.skip_whitespace()?;
            let Some(c) = self.peek()? else {
                return Ok(None);
            };

            match self.state {
                ParseState::Start | ParseState::BeforePropertyValue => {
                    return self.value(c).map(Some);
                }
                ParseState::End if self.options.allow_multiple_json_values => {
                    return self.value(c).map(Some);
                }
                ParseState::End => return Err(self.syntax_error(SyntaxError::TrailingContent(c))),

                ParseState::BeforePropertyName { first } => match c {
                    '}' if first => return Ok(Some(self.close(JsonToken::ObjectEnd))),
                    '"' => {
                        self.advance();
                        let key = self.string()?;
                        self.state = ParseState::AfterPropertyName;
                        return Ok(Some(JsonToken::String(key)));
                    }
                    c => return Err(self.invalid_char(c)),
                },

                ParseState::AfterPropertyName => match c {
                    ':' => {
                        self.advance();
                        self.state = ParseState::BeforePropertyValue;
                    }
                    c => return Err(self.invalid_char(c)),
                },

                ParseState::BeforeArrayValue { first } => match c {
                    ']' if first => return Ok(Some(self.close(JsonToken::ArrayEnd))),
                    c => return self.value(c).map(Some),
                },

                ParseState::AfterPropertyValue => match c {
                    ',' => {
                        self.advance();
                        self.state = ParseState::BeforePropertyName { first: false };
                    }
                    '}' => return Ok(Some(self.close(JsonToken::ObjectEnd))),
                    c => return Err(self.invalid_char(c)),
                },

                ParseState::AfterArrayValue => match c {
                    ',' => {
                        self.advance();
                        self.state = ParseState::BeforeArrayValue { first: false };
                    }
                    ']' => return Ok(Some(self.close(JsonToken::ArrayEnd))),
                    c => return Err(self.invalid_char(c)),
                },
            }
        }
    }

    // --------------------------------------------------------------------------------------------
    // Values
    // --------------------------------------------------------------------------------------------

    fn value(&mut self, c: char) -> Result<JsonToken, LexError> {
        let token = match c {
            '{' => {
                self.advance();
                self.containers.push(Container::Object);
                self.state = ParseState::BeforePropertyName { first: true };
                return Ok(JsonToken::ObjectBegin);
            }
            '[' => {
                self.advance();
                self.containers.push(Container::Array);
                self.state = ParseState::BeforeArrayValue { first: true };
                return Ok(JsonToken::ArrayBegin);
            }
            '"' => {
                self.advance();
                JsonToken::String(self.string()?)
            }
            '-' | '0'..='9' => JsonToken::Number(self.number()?),
            c => match ExpectedLiteralBuffer::new(c) {
                Some(expected) => {
                    self.advance();
                    self.literal(expected)?
                }
                None => return Err(self.invalid_char(c)),
            },
        };
        self.after_value();
        Ok(token)
    }

    fn close(&mut self, token: JsonToken) -> JsonToken {
        self.advance();
        self.containers.pop();
        self.after_value();
        token
    }

    fn after_value(&mut self) {
        self.state = match self.containers.last() {
            None => ParseState::End,
            Some(Container::Object) => ParseState::AfterPropertyValue,
            Some(Container::Array) => ParseState::AfterArrayValue,
        };
    }

    fn literal(&mut self, mut expected: ExpectedLiteralBuffer) -> Result<JsonToken, LexError> {
        loop {
            let c = self.expect_char()?;
            match expected.step(c) {
                Step::NeedMore => self.advance(),
                Step::Done(token) => {
                    self.advance();
                    return Ok(token);
                }
                Step::Reject => return Err(self.invalid_char(c)),
            }
        }
    }

    #[allow(clippy::enum_glob_use)]
    fn number(&mut self) -> Result<JsonNumber, LexError> {
        use NumberState::*;

        self.buffer.clear();
        let mut state = Start;
        loop {
            let c = self.peek()?;
            state = match (state, c) {
                (Start, Some('-')) => Sign,
                (Start | Sign, Some('0')) => Zero,
                (Start | Sign | Integer, Some('0'..='9')) => Integer,
                (Zero | Integer, Some('.')) => Point,
                (Point | Fraction, Some('0'..='9')) => Fraction,
                (Zero | Integer | Fraction, Some('e' | 'E')) => Exponent,
                (Exponent, Some('+' | '-')) => ExponentSign,
                (Exponent | ExponentSign | ExponentInteger, Some('0'..='9')) => ExponentInteger,
                // Complete; the next character belongs to whatever follows.
                (Zero | Integer | Fraction | ExponentInteger, _) => break,
                (_, Some(c)) => return Err(self.invalid_char(c)),
                (_, None) => return Err(self.syntax_error(SyntaxError::UnexpectedEndOfInput)),
            };
            if let Some(c) = c {
                self.buffer.push(c);
            }
            self.advance();
        }

        let lexeme = mem::take(&mut self.buffer);
        if !self.options.normalize_numbers {
            return Ok(JsonNumber::Lexeme(lexeme));
        }
        // Out-of-range lexemes parse to an infinity, which has no decimal form.
        match lexeme.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(JsonNumber::Float(value)),
            _ => Err(self.syntax_error(SyntaxError::InvalidNumber(lexeme))),
        }
    }

    /// Reads the rest of a string after its opening quote.
    fn string(&mut self) -> Result<String, LexError> {
        self.buffer.clear();
        // High surrogate still waiting for its low half.
        let mut high: Option<u16> = None;
        loop {
            let ch = match self.expect_char()? {
                '"' => {
                    self.advance();
                    if high.is_some() {
                        self.buffer.push(char::REPLACEMENT_CHARACTER);
                    }
                    return Ok(mem::take(&mut self.buffer));
                }
                '\\' => {
                    self.advance();
                    match self.escape()? {
                        Escaped::Char(ch) => ch,
                        Escaped::Unit(unit) => match (high.take(), unit) {
                            (Some(lead), 0xDC00..=0xDFFF) => {
                                let ch = char::decode_utf16([lead, unit])
                                    .next()
                                    .and_then(Result::ok)
                                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                                self.buffer.push(ch);
                                continue;
                            }
                            (previous, 0xD800..=0xDBFF) => {
                                if previous.is_some() {
                                    self.buffer.push(char::REPLACEMENT_CHARACTER);
                                }
                                high = Some(unit);
                                continue;
                            }
                            (previous, _) => {
                                if previous.is_some() {
                                    self.buffer.push(char::REPLACEMENT_CHARACTER);
                                }
                                char::from_u32(u32::from(unit))
                                    .unwrap_or(char::REPLACEMENT_CHARACTER)
                            }
                        },
                    }
                }
                c @ '\0'..='\x1F' => return Err(self.invalid_char(c)),
                c => {
                    self.advance();
                    c
                }
            };
            if high.take().is_some() {
                self.buffer.push(char::REPLACEMENT_CHARACTER);
            }
            self.buffer.push(ch);
        }
    }

    /// Reads one escape after its backslash.
    fn escape(&mut self) -> Result<Escaped, LexError> {
        let ch = match self.expect_char()? {
            c @ ('"' | '\\' | '/') => c,
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                self.advance();
                return self.unicode_escape().map(Escaped::Unit);
            }
            c => return Err(self.syntax_error(SyntaxError::InvalidEscape(c))),
        };
        self.advance();
        Ok(Escaped::Char(ch))
    }

    fn unicode_escape(&mut self) -> Result<u16, LexError> {
        self.unicode_escape_buffer.reset();
        loop {
            let c = self.expect_char()?;
            match self.unicode_escape_buffer.feed(c) {
                Ok(unit) => {
                    self.advance();
                    if let Some(unit) = unit {
                        return Ok(unit);
                    }
                }
                Err(c) => return Err(self.syntax_error(SyntaxError::InvalidUnicodeEscapeChar(c))),
            }
        }
    }

    // --------------------------------------------------------------------------------------------
    // Input
    // --------------------------------------------------------------------------------------------

    fn peek(&mut self) -> Result<Option<char>, LexError> {
        if let Some(peeked) = self.peeked {
            return Ok(peeked);
        }
        let next = self.input.read_char().map_err(|err| self.io_error(err))?;
        self.peeked = Some(next);
        Ok(next)
    }

    /// Peeks a character that must be there.
    fn expect_char(&mut self) -> Result<char, LexError> {
        match self.peek()? {
            Some(c) => Ok(c),
            None => Err(self.syntax_error(SyntaxError::UnexpectedEndOfInput)),
        }
    }

    fn advance(&mut self) {
        if let Some(Some(ch)) = self.peeked.take() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), LexError> {
        while let Some(c) = self.peek()? {
            let skip = matches!(c, ' ' | '\t' | '\n' | '\r')
                || (self.options.allow_unicode_whitespace && c.is_whitespace());
            if !skip {
                break;
            }
            self.advance();
        }
        Ok(())
    }

    // --------------------------------------------------------------------------------------------
    // Errors
    // --------------------------------------------------------------------------------------------

    fn invalid_char(&self, c: char) -> LexError {
        self.syntax_error(SyntaxError::InvalidCharacter(c))
    }

    fn syntax_error(&self, err: SyntaxError) -> LexError {
        LexError {
            source: err.into(),
            line: self.line,
            column: self.column,
        }
    }

    fn io_error(&self, err: io::Error) -> LexError {
        LexError {
            source: err.into(),
            line: self.line,
            column: self.column,
        }
    }
}

impl<R: CharRead> Iterator for Lexer<R> {
    type Item = Result<JsonToken, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = self.lex().transpose();
        if !matches!(item, Some(Ok(_))) {
            self.finished = true;
        }
        item
    }
}

impl<R: CharRead> core::iter::FusedIterator for Lexer<R> {}
