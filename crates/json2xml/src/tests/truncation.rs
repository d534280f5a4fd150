use std::convert::Infallible;

use rstest::rstest;

use crate::{ConvertError, JsonToken, Kind, Transducer, XmlToken, convert};

fn string(s: &str) -> JsonToken {
    JsonToken::String(s.into())
}

fn run(tokens: Vec<JsonToken>) -> Result<Vec<XmlToken>, ConvertError<Infallible>> {
    Transducer::new(tokens.into_iter().map(Ok::<_, Infallible>)).collect()
}

#[rstest]
#[case(vec![JsonToken::ObjectBegin], 1)]
#[case(vec![JsonToken::ArrayBegin], 1)]
#[case(vec![JsonToken::ObjectBegin, string("k")], 1)]
#[case(vec![JsonToken::ArrayBegin, JsonToken::ArrayBegin, JsonToken::ArrayEnd], 1)]
#[case(vec![JsonToken::ObjectBegin, string("k"), JsonToken::ArrayBegin], 2)]
#[case(vec![JsonToken::ArrayBegin, JsonToken::ObjectBegin, string("k"), JsonToken::Null], 2)]
fn open_containers_at_end_of_input(#[case] tokens: Vec<JsonToken>, #[case] depth: usize) {
    match run(tokens) {
        Err(ConvertError::Truncated { depth: got }) => assert_eq!(got, depth),
        other => panic!("expected truncation, got {other:?}"),
    }
}

#[test]
fn scalars_finish_before_truncation_is_reported() {
    let mut transducer = Transducer::new(
        vec![JsonToken::ArrayBegin, JsonToken::Boolean(true)]
            .into_iter()
            .map(Ok::<_, Infallible>),
    );
    let mut produced = Vec::new();
    let err = loop {
        match transducer.next_token() {
            Ok(Some(token)) => produced.push(token),
            Ok(None) => panic!("truncated input ended cleanly"),
            Err(err) => break err,
        }
    };
    assert!(matches!(err, ConvertError::Truncated { depth: 1 }));
    assert_eq!(
        produced,
        vec![
            XmlToken::Start {
                kind: Kind::Array,
                name: None
            },
            XmlToken::Start {
                kind: Kind::Boolean,
                name: None
            },
            XmlToken::CharData("true".into()),
            XmlToken::End(Kind::Boolean),
        ]
    );
}

#[test]
fn end_of_input_keeps_being_reported() {
    let mut transducer = Transducer::new(std::iter::empty::<Result<JsonToken, Infallible>>());
    assert!(matches!(transducer.next_token(), Ok(None)));
    assert!(matches!(transducer.next_token(), Ok(None)));
}

#[rstest]
#[case(vec![JsonToken::ObjectEnd])]
#[case(vec![JsonToken::ArrayBegin, JsonToken::ObjectEnd])]
#[case(vec![JsonToken::ObjectBegin, JsonToken::ArrayEnd])]
#[case(vec![JsonToken::ObjectBegin, string("k"), JsonToken::ObjectEnd])]
fn mismatched_closers_are_unbalanced(#[case] tokens: Vec<JsonToken>) {
    let err = convert(
        tokens.into_iter().map(Ok::<_, Infallible>),
        Vec::<XmlToken>::new(),
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::Unbalanced(_)), "{err:?}");
}
