//! Tokens consumed by the transducer and the seam it reads them through.
//!
//! A [`TokenSource`] is anything that can hand out [`JsonToken`]s one at a
//! time, in document order. The bundled [`Lexer`](crate::Lexer) is one; any
//! iterator of `Result<JsonToken, E>` is another, which is how hand-built token
//! streams are fed in tests.
//!
//! ```
//! use std::convert::Infallible;
//! use json2xml::{JsonToken, TokenSource};
//!
//! let mut source = vec![Ok::<_, Infallible>(JsonToken::Null)].into_iter();
//! assert_eq!(source.next_token(), Ok(Some(JsonToken::Null)));
//! assert_eq!(source.next_token(), Ok(None));
//! ```
use std::fmt;

/// A numeric JSON value, either as it was spelled in the input or as a parsed
/// float.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNumber {
    /// The original numeric text, e.g. `1e10` or `-0.50`.
    Lexeme(String),
    /// A parsed value, formatted on output.
    Float(f64),
}

impl JsonNumber {
    /// Returns the character data written for this number.
    ///
    /// Lexemes are returned verbatim. Floats use the shortest representation
    /// that round-trips, without an exponent and without a forced fraction.
    /// A non-finite float has no such representation and comes out as `inf`,
    /// `-inf` or `NaN`; the [`Transducer`](crate::Transducer) rejects those
    /// before they get here.
    ///
    /// ```
    /// use json2xml::JsonNumber;
    ///
    /// assert_eq!(JsonNumber::Lexeme("1e10".into()).into_text(), "1e10");
    /// assert_eq!(JsonNumber::Float(1e10).into_text(), "10000000000");
    /// assert_eq!(JsonNumber::Float(123.456).into_text(), "123.456");
    /// assert_eq!(JsonNumber::Float(1.0).into_text(), "1");
    /// ```
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            JsonNumber::Lexeme(text) => text,
            JsonNumber::Float(value) => value.to_string(),
        }
    }
}

impl From<f64> for JsonNumber {
    fn from(value: f64) -> Self {
        JsonNumber::Float(value)
    }
}

impl From<&str> for JsonNumber {
    fn from(lexeme: &str) -> Self {
        JsonNumber::Lexeme(lexeme.to_string())
    }
}

/// One token of a JSON document.
///
/// Object member names arrive as plain [`JsonToken::String`]s; the transducer
/// decides from context whether a string is a key or a value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonToken {
    /// `{`
    ObjectBegin,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayBegin,
    /// `]`
    ArrayEnd,
    /// `true` or `false`
    Boolean(bool),
    /// A number.
    Number(JsonNumber),
    /// A string, already unescaped.
    String(String),
    /// `null`
    Null,
}

impl fmt::Display for JsonToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonToken::ObjectBegin => f.write_str("'{'"),
            JsonToken::ObjectEnd => f.write_str("'}'"),
            JsonToken::ArrayBegin => f.write_str("'['"),
            JsonToken::ArrayEnd => f.write_str("']'"),
            JsonToken::Boolean(b) => write!(f, "boolean {b}"),
            JsonToken::Number(JsonNumber::Lexeme(n)) => write!(f, "number {n}"),
            JsonToken::Number(JsonNumber::Float(n)) => write!(f, "number {n}"),
            JsonToken::String(s) => write!(f, "string {s:?}"),
            JsonToken::Null => f.write_str("null"),
        }
    }
}

/// A pull-based supply of JSON tokens.
///
/// `Ok(None)` means end of input. Once returned, every later call must return
/// `Ok(None)` again (or an error) without side effects.
pub trait TokenSource {
    /// Error raised when a token cannot be produced, e.g. malformed input or a
    /// failed read.
    type Error;

    /// Reads the next token.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when the underlying input is malformed or cannot
    /// be read.
    fn next_token(&mut self) -> Result<Option<JsonToken>, Self::Error>;
}

impl<I, E> TokenSource for I
where
    I: Iterator<Item = Result<JsonToken, E>>,
{
    type Error = E;

    fn next_token(&mut self) -> Result<Option<JsonToken>, E> {
        self.next().transpose()
    }
}
