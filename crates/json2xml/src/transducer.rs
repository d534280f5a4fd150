//! The JSON → XML token transducer.
//!
//! The transducer pulls JSON tokens from a [`TokenSource`] and yields one XML
//! token per call. It never holds more than the chain of currently open
//! elements plus the character data of the innermost scalar, so documents of
//! any size stream through in constant memory per nesting level.
//!
//! Each JSON value becomes one element named after its kind. Members of an
//! object carry their key in a `name` attribute; array items and top-level
//! values carry no attribute.
//!
//! # Examples
//!
//! ```
//! use json2xml::{Kind, Lexer, LexerOptions, Transducer, XmlToken};
//!
//! let lexer = Lexer::for_str(r#"{"a":[true]}"#, LexerOptions::default());
//! let tokens: Vec<_> = Transducer::new(lexer).collect::<Result<_, _>>().unwrap();
//! assert_eq!(
//!     tokens,
//!     vec![
//!         XmlToken::Start { kind: Kind::Object, name: None },
//!         XmlToken::Start { kind: Kind::Array, name: Some("a".into()) },
//!         XmlToken::Start { kind: Kind::Boolean, name: None },
//!         XmlToken::CharData("true".into()),
//!         XmlToken::End(Kind::Boolean),
//!         XmlToken::End(Kind::Array),
//!         XmlToken::End(Kind::Object),
//!     ]
//! );
//! ```
use std::mem;

use crate::{ConvertError, JsonNumber, JsonToken, Kind, TokenSource, XmlToken};

/// What an open scalar element emits next.
#[derive(Debug, Clone, PartialEq)]
enum ScalarStep {
    /// Its character data has not been written yet.
    CharData(String),
    /// Only the end tag is left.
    Close,
}

/// One open element.
#[derive(Debug, Clone, PartialEq)]
enum Frame {
    Object,
    Array,
    Scalar { kind: Kind, next: ScalarStep },
}

impl Frame {
    fn kind(&self) -> Kind {
        match self {
            Frame::Object => Kind::Object,
            Frame::Array => Kind::Array,
            Frame::Scalar { kind, .. } => *kind,
        }
    }
}

/// Single-pass state machine turning JSON tokens into XML tokens.
///
/// Drive it with [`Transducer::next_token`] or as an [`Iterator`]. A single
/// instance is meant to be driven by one caller; it holds no locks.
#[derive(Debug)]
pub struct Transducer<S> {
    source: S,
    frames: Vec<Frame>,
    done: bool,
}

impl<S: TokenSource> Transducer<S> {
    /// Creates a transducer reading from `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            frames: Vec::with_capacity(16),
            done: false,
        }
    }

    /// Number of elements currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Gives back the token source.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Produces the next XML token.
    ///
    /// Returns `Ok(None)` once the source is exhausted with no element left
    /// open. Scalar character data and scalar end tags are produced from
    /// buffered state without reading from the source; everything else reads
    /// as many JSON tokens as needed to decide, which is two for an object
    /// member (key, then value).
    ///
    /// # Errors
    ///
    /// * [`ConvertError::Source`] when the source fails.
    /// * [`ConvertError::Truncated`] when the source ends while elements are
    ///   still open.
    /// * [`ConvertError::Unbalanced`] when a closing delimiter does not match
    ///   the innermost open container, or directly follows a member key.
    /// * [`ConvertError::NonFiniteNumber`] when the source hands over an
    ///   infinite or NaN float.
    pub fn next_token(&mut self) -> Result<Option<XmlToken>, ConvertError<S::Error>> {
        if let Some(Frame::Scalar { kind, next }) = self.frames.last_mut() {
            let kind = *kind;
            if let ScalarStep::CharData(text) = mem::replace(next, ScalarStep::Close) {
                return Ok(Some(XmlToken::CharData(text)));
            }
            self.frames.pop();
            return Ok(Some(XmlToken::End(kind)));
        }

        // Key of the member being read; only lives for this call.
        let mut key: Option<String> = None;
        loop {
            let Some(token) = self.source.next_token().map_err(ConvertError::Source)? else {
                return if self.frames.is_empty() {
                    Ok(None)
                } else {
                    Err(ConvertError::Truncated {
                        depth: self.frames.len(),
                    })
                };
            };

            let (kind, next) = match token {
                JsonToken::ObjectBegin => return Ok(Some(self.open(Frame::Object, key))),
                JsonToken::ArrayBegin => return Ok(Some(self.open(Frame::Array, key))),
                JsonToken::ObjectEnd | JsonToken::ArrayEnd => {
                    return self.close(token, key.is_some()).map(Some);
                }
                JsonToken::String(text) if key.is_none() && self.awaiting_key() => {
                    key = Some(text);
                    continue;
                }
                JsonToken::String(text) => (Kind::String, ScalarStep::CharData(text)),
                JsonToken::Boolean(value) => {
                    let text = if value { "true" } else { "false" };
                    (Kind::Boolean, ScalarStep::CharData(text.to_owned()))
                }
                JsonToken::Number(JsonNumber::Float(value)) if !value.is_finite() => {
                    return Err(ConvertError::NonFiniteNumber(value));
                }
                JsonToken::Number(number) => {
                    (Kind::Number, ScalarStep::CharData(number.into_text()))
                }
                JsonToken::Null => (Kind::Null, ScalarStep::Close),
            };
            return Ok(Some(self.open(Frame::Scalar { kind, next }, key)));
        }
    }

    /// Directly inside an object, the next string is a member key.
    fn awaiting_key(&self) -> bool {
        matches!(self.frames.last(), Some(Frame::Object))
    }

    fn open(&mut self, frame: Frame, name: Option<String>) -> XmlToken {
        let kind = frame.kind();
        self.frames.push(frame);
        XmlToken::Start { kind, name }
    }

    fn close(
        &mut self,
        token: JsonToken,
        after_key: bool,
    ) -> Result<XmlToken, ConvertError<S::Error>> {
        let closes = match (&token, self.frames.last()) {
            (JsonToken::ObjectEnd, Some(Frame::Object)) => Kind::Object,
            (JsonToken::ArrayEnd, Some(Frame::Array)) => Kind::Array,
            _ => return Err(ConvertError::Unbalanced(token)),
        };
        if after_key {
            return Err(ConvertError::Unbalanced(token));
        }
        self.frames.pop();
        Ok(XmlToken::End(closes))
    }
}

impl<S: TokenSource> Iterator for Transducer<S> {
    type Item = Result<XmlToken, ConvertError<S::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_token().transpose();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}

impl<S: TokenSource> core::iter::FusedIterator for Transducer<S> {}
