#![allow(missing_docs)]

mod common;

use json2xml::{Lexer, LexerOptions, convert, json_to_xml};
use quick_xml::{Reader, Writer, events::Event};
use serde_json::{Map, Value};

use crate::common::{ORIGINAL, SCALARS};

enum Open {
    Object(Map<String, Value>),
    Array(Vec<Value>),
    Scalar { element: String, text: String },
}

/// Parses converted markup back into a JSON value.
fn parse_markup(xml: &str) -> Value {
    let mut reader = Reader::from_str(xml);
    // Each open element with the `name` attribute it was written with.
    let mut stack: Vec<(Open, Option<String>)> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(start) => {
                let element = String::from_utf8(start.name().as_ref().to_vec()).unwrap();
                let name = start
                    .try_get_attribute("name")
                    .unwrap()
                    .map(|attr| attr.unescape_value().unwrap().into_owned());
                let open = match element.as_str() {
                    "object" => Open::Object(Map::new()),
                    "array" => Open::Array(Vec::new()),
                    _ => Open::Scalar {
                        element,
                        text: String::new(),
                    },
                };
                stack.push((open, name));
            }
            Event::Text(text) => match stack.last_mut() {
                Some((Open::Scalar { text: buf, .. }, _)) => {
                    buf.push_str(&text.unescape().unwrap());
                }
                _ => panic!("character data outside a scalar"),
            },
            Event::End(_) => {
                let (open, name) = stack.pop().expect("end tag without start tag");
                let value = match open {
                    Open::Object(map) => Value::Object(map),
                    Open::Array(items) => Value::Array(items),
                    Open::Scalar { element, text } => match element.as_str() {
                        "string" => Value::String(text),
                        "null" => {
                            assert!(text.is_empty());
                            Value::Null
                        }
                        "boolean" | "number" => serde_json::from_str(&text).unwrap(),
                        other => panic!("unexpected element {other:?}"),
                    },
                };
                match (stack.last_mut(), name) {
                    (Some((Open::Object(map), _)), Some(name)) => {
                        map.insert(name, value);
                    }
                    (Some((Open::Array(items), _)), None) => items.push(value),
                    (None, None) => root = Some(value),
                    _ => panic!("misplaced name attribute"),
                }
            }
            Event::Eof => break,
            other => panic!("unexpected event {other:?}"),
        }
    }

    assert!(stack.is_empty());
    root.expect("empty document")
}

#[test]
fn document_survives_xml_roundtrip() {
    let xml = json_to_xml(ORIGINAL, LexerOptions::default()).unwrap();
    let expected: Value = serde_json::from_str(ORIGINAL).unwrap();
    assert_eq!(parse_markup(&xml), expected);
}

#[test]
fn scalars_survive_xml_roundtrip() {
    for json in SCALARS {
        let xml = json_to_xml(json, LexerOptions::default()).unwrap();
        let expected: Value = serde_json::from_str(json).unwrap();
        assert_eq!(parse_markup(&xml), expected, "{json}");
    }
}

#[test]
fn escaped_text_survives_xml_roundtrip() {
    let json = r#"{"a<b":"x & y","q":"\"'\"","ctl":"tab\there","uni":"é😀é"}"#;
    let xml = json_to_xml(json, LexerOptions::default()).unwrap();
    let expected: Value = serde_json::from_str(json).unwrap();
    assert_eq!(parse_markup(&xml), expected);
}

#[test]
fn carriage_returns_survive_xml_roundtrip() {
    let json = r#"{"a\rb":"a\rb","crlf":"x\r\ny\r"}"#;
    let xml = json_to_xml(json, LexerOptions::default()).unwrap();
    assert!(!xml.contains('\r'), "{xml:?}");
    let expected: Value = serde_json::from_str(json).unwrap();
    assert_eq!(parse_markup(&xml), expected);
}

#[test]
fn control_characters_become_replacement_characters() {
    let xml = json_to_xml(r#"["\u0001","a\rb","\u0000"]"#, LexerOptions::default()).unwrap();
    assert_eq!(
        xml,
        concat!(
            "<array><string>\u{FFFD}</string>",
            "<string>a&#xD;b</string><string>\u{FFFD}</string></array>"
        )
    );
    assert_eq!(
        parse_markup(&xml),
        serde_json::json!(["\u{FFFD}", "a\rb", "\u{FFFD}"])
    );
}

#[test]
fn reader_input_matches_string_input() {
    let mut writer = Writer::new(Vec::new());
    convert(
        Lexer::for_reader(ORIGINAL.as_bytes(), LexerOptions::default()),
        &mut writer,
    )
    .unwrap();
    let from_reader = String::from_utf8(writer.into_inner()).unwrap();
    assert_eq!(
        from_reader,
        json_to_xml(ORIGINAL, LexerOptions::default()).unwrap()
    );
}
