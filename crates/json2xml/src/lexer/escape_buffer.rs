//! Decoding of the four hexadecimal digits after `\u`.
//!
//! JSON spells characters outside the Basic Multilingual Plane as a UTF-16
//! surrogate pair, so the buffer yields raw code units and leaves pairing to
//! the lexer.

/// Accumulates up to four ASCII hexadecimal digits (`0-9`, `A-F`, `a-f`).
#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    value: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Clears any accumulated digits.
    pub(crate) fn reset(&mut self) {
        self.value = 0;
        self.len = 0;
    }

    /// Feeds one digit.
    ///
    /// Returns `Ok(None)` until four digits have been seen, then the UTF-16
    /// code unit they spell, resetting for the next escape. A character that
    /// is not a hex digit is handed back as the error.
    pub(crate) fn feed(&mut self, c: char) -> Result<Option<u16>, char> {
        let digit = c.to_digit(16).ok_or(c)?;
        #[allow(clippy::cast_possible_truncation)]
        let digit = digit as u16;
        self.value = (self.value << 4) | digit;
        self.len += 1;
        if self.len < 4 {
            return Ok(None);
        }
        let unit = self.value;
        self.reset();
        Ok(Some(unit))
    }
}
