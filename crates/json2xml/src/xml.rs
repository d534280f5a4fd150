//! Tokens produced by the transducer and the sinks that accept them.
use std::{borrow::Cow, convert::Infallible, fmt, io};

use quick_xml::{
    Writer,
    escape::escape,
    events::{BytesEnd, BytesStart, BytesText, Event, attributes::Attribute},
};

/// The kind of JSON value an XML element stands for.
///
/// Every kind maps to exactly one lowercase element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A JSON object, `<object>`.
    Object,
    /// A JSON array, `<array>`.
    Array,
    /// `true` or `false`, `<boolean>`.
    Boolean,
    /// A JSON number, `<number>`.
    Number,
    /// A JSON string, `<string>`.
    String,
    /// `null`, `<null>`.
    Null,
}

impl Kind {
    /// Name of the element written for this kind.
    #[must_use]
    pub const fn element_name(self) -> &'static str {
        match self {
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Null => "null",
        }
    }

    /// Whether elements of this kind hold character data rather than child
    /// elements.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        !matches!(self, Kind::Object | Kind::Array)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// One token of the XML output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlToken {
    /// `<kind>` or `<kind name="...">`.
    Start {
        /// Element kind.
        kind: Kind,
        /// Value of the `name` attribute: the member key when the element is a
        /// direct member of an object.
        name: Option<String>,
    },
    /// Unescaped character data of a scalar element.
    CharData(String),
    /// `</kind>`.
    End(Kind),
}

impl XmlToken {
    /// Element name of a start or end token, `None` for character data.
    #[must_use]
    pub fn element_name(&self) -> Option<&'static str> {
        match self {
            XmlToken::Start { kind, .. } | XmlToken::End(kind) => Some(kind.element_name()),
            XmlToken::CharData(_) => None,
        }
    }
}

/// Accepts XML tokens in document order.
pub trait XmlSink {
    /// Error raised when a token cannot be written.
    type Error;

    /// Writes one token.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the sink rejects the token or fails to write
    /// it.
    fn write_token(&mut self, token: XmlToken) -> Result<(), Self::Error>;
}

impl<T: XmlSink + ?Sized> XmlSink for &mut T {
    type Error = T::Error;

    fn write_token(&mut self, token: XmlToken) -> Result<(), T::Error> {
        (**self).write_token(token)
    }
}

/// Collects tokens in memory.
impl XmlSink for Vec<XmlToken> {
    type Error = Infallible;

    fn write_token(&mut self, token: XmlToken) -> Result<(), Infallible> {
        self.push(token);
        Ok(())
    }
}

/// Whether `c` may appear in an XML 1.0 document at all.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

/// Escapes `text` for character data, or for an attribute value when
/// `attribute` is set.
///
/// On top of the five predefined entities, `\r` and `\t` (and `\n` inside
/// attributes) become character references so parsers do not normalize them
/// away, and characters XML cannot carry become U+FFFD.
fn escape_markup(text: &str, attribute: bool) -> Cow<'_, str> {
    let escaped = escape(text);
    let needs_rewrite = |c: char| {
        !is_xml_char(c) || matches!(c, '\r' | '\t') || (attribute && c == '\n')
    };
    if !escaped.chars().any(needs_rewrite) {
        return escaped;
    }
    let mut out = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\r' => out.push_str("&#xD;"),
            '\t' => out.push_str("&#x9;"),
            '\n' if attribute => out.push_str("&#xA;"),
            c if is_xml_char(c) => out.push(c),
            _ => out.push(char::REPLACEMENT_CHARACTER),
        }
    }
    Cow::Owned(out)
}

/// Serializes tokens as markup.
impl<W: io::Write> XmlSink for Writer<W> {
    type Error = quick_xml::Error;

    fn write_token(&mut self, token: XmlToken) -> Result<(), quick_xml::Error> {
        let event = match &token {
            XmlToken::Start { kind, name } => {
                let mut start = BytesStart::new(kind.element_name());
                if let Some(name) = name {
                    let value = escape_markup(name, true);
                    // Already escaped; the byte-pair conversion keeps it as is.
                    start.push_attribute(Attribute::from((&b"name"[..], value.as_bytes())));
                }
                Event::Start(start)
            }
            XmlToken::CharData(text) => {
                Event::Text(BytesText::from_escaped(escape_markup(text, false)))
            }
            XmlToken::End(kind) => Event::End(BytesEnd::new(kind.element_name())),
        };
        self.write_event(event).map_err(quick_xml::Error::from)
    }
}
