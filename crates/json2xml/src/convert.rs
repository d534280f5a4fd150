//! Drivers connecting a token source, the transducer and a sink.
use quick_xml::Writer;

use crate::{ConvertError, LexError, Lexer, LexerOptions, TokenSource, Transducer, XmlSink};

/// Converts every token of `source` and writes the result to `sink`.
///
/// Stops at the first error from either side; tokens written before the
/// error stay written.
///
/// # Errors
///
/// * [`ConvertError::Source`] if the source fails.
/// * [`ConvertError::Truncated`] if the source ends inside a container.
/// * [`ConvertError::Unbalanced`] if the source closes a container that is not
///   open.
/// * [`ConvertError::NonFiniteNumber`] if the source yields an infinite or NaN
///   float.
/// * [`ConvertError::Sink`] if the sink fails.
///
/// # Examples
///
/// ```
/// use json2xml::{Lexer, LexerOptions, convert};
/// use quick_xml::Writer;
///
/// let mut writer = Writer::new(Vec::new());
/// convert(
///     Lexer::for_str(r#"["Name1","String1"]"#, LexerOptions::default()),
///     &mut writer,
/// )
/// .unwrap();
/// assert_eq!(
///     writer.into_inner(),
///     b"<array><string>Name1</string><string>String1</string></array>"
/// );
/// ```
pub fn convert<S, K>(source: S, mut sink: K) -> Result<(), ConvertError<S::Error, K::Error>>
where
    S: TokenSource,
    K: XmlSink,
{
    let mut transducer = Transducer::new(source);
    let mut written = 0usize;
    log::debug!("converting JSON tokens to XML");
    loop {
        let token = match transducer.next_token() {
            Ok(Some(token)) => token,
            Ok(None) => break,
            Err(err) => {
                log::debug!(
                    "conversion aborted after {written} token(s) at depth {}",
                    transducer.depth()
                );
                return Err(err.with_sink());
            }
        };
        log::trace!("{token:?}");
        if let Err(err) = sink.write_token(token) {
            log::debug!("sink rejected token {}", written + 1);
            return Err(ConvertError::Sink(err));
        }
        written += 1;
    }
    log::debug!("converted {written} XML token(s)");
    Ok(())
}

/// Converts a JSON document held in a string to XML markup.
///
/// # Errors
///
/// Returns whatever [`convert`] returns for this input.
///
/// # Examples
///
/// ```
/// use json2xml::{LexerOptions, json_to_xml};
///
/// let xml = json_to_xml(r#"{"Name1":"String1"}"#, LexerOptions::default()).unwrap();
/// assert_eq!(xml, r#"<object><string name="Name1">String1</string></object>"#);
/// ```
pub fn json_to_xml(
    json: &str,
    options: LexerOptions,
) -> Result<String, ConvertError<LexError, quick_xml::Error>> {
    let mut writer = Writer::new(Vec::with_capacity(json.len() * 2));
    convert(Lexer::for_str(json, options), &mut writer)?;
    // Everything written came from `&str`s, so this never replaces anything.
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}
