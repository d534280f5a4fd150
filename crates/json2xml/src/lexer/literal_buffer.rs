use crate::JsonToken;

/// What happened after feeding one more character into the literal matcher?
#[derive(Debug, PartialEq)]
pub(crate) enum Step {
    /// Character matched, but the literal is not finished yet.
    NeedMore,
    /// Character matched and completed the literal.
    Done(JsonToken),
    /// Character did not match.
    Reject,
}

/// Matches the rest of `null`, `true` or `false` after its first character.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer {
    remaining: &'static [u8],
    literal: Literal,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Literal {
    Null,
    True,
    False,
}

impl ExpectedLiteralBuffer {
    /// Starts matching after the first character; `None` unless it is `n`,
    /// `t` or `f`.
    pub(crate) fn new(first: char) -> Option<Self> {
        let (remaining, literal): (&'static [u8], _) = match first {
            'n' => (b"ull", Literal::Null),
            't' => (b"rue", Literal::True),
            'f' => (b"alse", Literal::False),
            _ => return None,
        };
        Some(Self { remaining, literal })
    }

    pub(crate) fn step(&mut self, c: char) -> Step {
        match self.remaining.split_first() {
            Some((&expected, rest)) if char::from(expected) == c => {
                self.remaining = rest;
                if rest.is_empty() {
                    Step::Done(match self.literal {
                        Literal::Null => JsonToken::Null,
                        Literal::True => JsonToken::Boolean(true),
                        Literal::False => JsonToken::Boolean(false),
                    })
                } else {
                    Step::NeedMore
                }
            }
            _ => Step::Reject,
        }
    }
}
