#![no_main]
//! Converts fuzzed JSON text from both a reader and a `&str` and checks that
//! the markup stays balanced, that both inputs agree, and that cutting a valid
//! document short never converts cleanly.

use arbitrary::{Arbitrary, Unstructured};
use json2xml::{Lexer, LexerOptions, ReadInput, TokenSource, Transducer, XmlToken};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::{Rng, RngCore, SeedableRng, rngs::SmallRng};
use serde_json::Value;

/// Lexer flags, reader capacity and an optional cut point, ahead of the text.
#[derive(Arbitrary, Debug)]
struct Setup {
    allow_multiple_json_values: bool,
    allow_unicode_whitespace: bool,
    normalize_numbers: bool,
    truncate: bool,
    capacity: u16,
    cut: u16,
}

/// Bytes `Setup` consumes.
const HEADER: usize = 8;

// String fragments that exercise escaping on the markup side.
const FRAGMENTS: &[&str] = &[
    "k",
    "<",
    ">",
    "&",
    "'",
    "\\\"",
    "]]>",
    "\\r",
    "\\r\\n",
    "\\t",
    "\\u0000",
    "\\u0001",
    "\\u001f",
    "\\ud83d\\ude00",
    "\\ud800",
    "\\udc00x",
    "\\/",
    "é",
    "\u{FFFE}",
];

const NUMBERS: &[&str] = &[
    "0",
    "-0",
    "-0.0",
    "1.50",
    "1e10",
    "1E-3",
    "-12",
    "1e400",
    "-1e400",
    "4.9e-324",
    "123456789012345678901234567890",
];

const WHITESPACE: &[&str] = &[" ", "\t", "\n", "\r", "\u{00A0}", "\u{2028}", "\u{3000}"];

/// Writes random JSON-ish text biased towards what the converter escapes.
struct Generator {
    rng: SmallRng,
    out: String,
    budget: usize,
}

impl Generator {
    fn pick(&mut self, table: &[&str]) {
        let item = table[self.rng.random_range(0..table.len())];
        self.out.push_str(item);
    }

    fn whitespace(&mut self) {
        if self.rng.random_bool(0.25) {
            self.pick(WHITESPACE);
        }
    }

    fn string(&mut self) {
        self.out.push('"');
        for _ in 0..self.rng.random_range(0..4) {
            self.pick(FRAGMENTS);
        }
        self.out.push('"');
    }

    fn value(&mut self, depth: u8) {
        self.whitespace();
        let kinds = if depth == 0 || self.out.len() >= self.budget {
            4
        } else {
            6
        };
        match self.rng.random_range(0..kinds) {
            0 => self.pick(&["null", "true", "false"]),
            1 => self.pick(NUMBERS),
            2 | 3 => self.string(),
            4 => {
                self.out.push('[');
                for i in 0..self.rng.random_range(0..4) {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.value(depth - 1);
                }
                self.out.push(']');
            }
            _ => {
                self.out.push('{');
                for i in 0..self.rng.random_range(0..4) {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.whitespace();
                    self.string();
                    self.whitespace();
                    self.out.push(':');
                    self.value(depth - 1);
                }
                self.out.push('}');
            }
        }
        self.whitespace();
    }
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if max_size < HEADER || (size >= HEADER && seed % 3 != 0) {
        return fuzzer_mutate(data, size, max_size);
    }

    let mut rng = SmallRng::seed_from_u64(u64::from(seed));
    rng.fill_bytes(&mut data[..HEADER]);
    let mut generator = Generator {
        rng,
        out: String::new(),
        budget: max_size - HEADER,
    };
    generator.value(4);

    let text = generator.out.as_bytes();
    let len = text.len().min(max_size - HEADER);
    data[HEADER..HEADER + len].copy_from_slice(&text[..len]);
    HEADER + len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// Drains a transducer, checking that open elements never go negative.
/// Returns the tokens and whether the stream ended cleanly.
fn drain<S: TokenSource>(transducer: Transducer<S>) -> (Vec<XmlToken>, bool) {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    for token in transducer {
        let Ok(token) = token else {
            return (tokens, false);
        };
        match &token {
            XmlToken::Start { .. } => depth += 1,
            XmlToken::End(_) => depth = depth.checked_sub(1).expect("end tag without start tag"),
            XmlToken::CharData(_) => assert!(depth > 0, "character data outside an element"),
        }
        tokens.push(token);
    }
    assert_eq!(depth, 0, "clean end of stream with open elements");
    (tokens, true)
}

/// Converts `data` both ways and returns whether it converted cleanly.
fn check(data: &[u8], options: LexerOptions, capacity: usize) -> bool {
    let (reader_tokens, reader_ok) = drain(Transducer::new(Lexer::new(
        ReadInput::with_capacity(capacity, data),
        options,
    )));

    let Ok(text) = std::str::from_utf8(data) else {
        assert!(!reader_ok, "invalid UTF-8 converted cleanly");
        return false;
    };

    let (str_tokens, str_ok) = drain(Transducer::new(Lexer::for_str(text, options)));
    assert_eq!(str_ok, reader_ok, "reader and str inputs disagree on {text:?}");
    assert_eq!(str_tokens, reader_tokens, "reader and str inputs disagree on {text:?}");

    // serde_json rounds some huge literals to a finite float that the lexer
    // treats as out of range, so this only holds for verbatim numbers.
    if !options.allow_multiple_json_values
        && !options.normalize_numbers
        && serde_json::from_str::<Value>(text).is_ok()
    {
        assert!(str_ok, "valid JSON failed to convert: {text:?}");
    }
    str_ok
}

/// Whether `cut` falls strictly inside the value of a valid document. A
/// top-level number is left out since its prefixes are numbers too.
fn cuts_inside_value(text: &str, cut: usize) -> bool {
    let Ok(value) = serde_json::from_str::<Value>(text) else {
        return false;
    };
    let json_ws = |c: char| matches!(c, ' ' | '\t' | '\n' | '\r');
    let start = text.len() - text.trim_start_matches(json_ws).len();
    let end = text.trim_end_matches(json_ws).len();
    !value.is_number() && start < cut && cut < end
}

fn run(data: &[u8]) {
    let mut u = Unstructured::new(data);
    let Ok(setup) = Setup::arbitrary(&mut u) else {
        return;
    };
    let body = u.take_rest();
    let options = LexerOptions {
        allow_multiple_json_values: setup.allow_multiple_json_values,
        allow_unicode_whitespace: setup.allow_unicode_whitespace,
        normalize_numbers: setup.normalize_numbers,
    };
    let capacity = usize::from(setup.capacity);

    if !setup.truncate {
        check(body, options, capacity);
        return;
    }

    let cut = usize::from(setup.cut) % (body.len() + 1);
    let converted = check(&body[..cut], options, capacity);
    if let Ok(text) = std::str::from_utf8(body) {
        if cuts_inside_value(text, cut) {
            assert!(!converted, "prefix {:?} of valid JSON converted cleanly", &body[..cut]);
        }
    }
}

fuzz_target!(|data: &[u8]| run(data));
