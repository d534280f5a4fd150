//! Streaming conversion of JSON documents to XML.
//!
//! A [`Transducer`] consumes JSON tokens one at a time and yields XML tokens,
//! keeping only the chain of open elements in memory. Every JSON value maps
//! to one element named after its kind (`object`, `array`, `boolean`,
//! `number`, `string`, `null`), and object members carry their key in a `name`
//! attribute:
//!
//! ```rust
//! use json2xml::{LexerOptions, json_to_xml};
//!
//! let xml = json_to_xml(r#"{"id": 7, "tags": ["a", null]}"#, LexerOptions::default()).unwrap();
//! assert_eq!(
//!     xml,
//!     concat!(
//!         r#"<object><number name="id">7</number>"#,
//!         r#"<array name="tags"><string>a</string><null></null></array></object>"#,
//!     )
//! );
//! ```
//!
//! The pieces are pluggable: any [`TokenSource`] can feed the transducer (the
//! bundled [`Lexer`] reads JSON text from strings or readers), and any
//! [`XmlSink`] can receive its output (`quick_xml::Writer` serializes markup,
//! `Vec<XmlToken>` collects tokens). [`convert`] connects the two.

mod convert;
mod error;
mod lexer;
mod token;
mod transducer;
mod xml;

#[cfg(test)]
mod tests;

pub use convert::{convert, json_to_xml};
pub use error::ConvertError;
pub use lexer::{
    CharRead, ErrorSource, LexError, Lexer, LexerOptions, ReadInput, StrInput, SyntaxError,
};
pub use token::{JsonNumber, JsonToken, TokenSource};
pub use transducer::Transducer;
pub use xml::{Kind, XmlSink, XmlToken};
