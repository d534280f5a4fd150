//! Character inputs for the lexer.
//!
//! [`StrInput`] walks a string slice. [`ReadInput`] decodes UTF-8 from any
//! [`io::Read`] through a fixed-size buffer, so arbitrarily large inputs are
//! never held in memory at once. A multi-byte sequence split across two reads
//! is carried over to the next fill.
use std::{io, str::Chars};

const DEFAULT_CAPACITY: usize = 8 * 1024;

/// A pull-based source of characters.
pub trait CharRead {
    /// Returns the next character, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the underlying input fails or is not valid
    /// UTF-8.
    fn read_char(&mut self) -> io::Result<Option<char>>;
}

/// Characters of an in-memory string.
#[derive(Debug, Clone)]
pub struct StrInput<'a> {
    chars: Chars<'a>,
}

impl<'a> StrInput<'a> {
    /// Reads the characters of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl CharRead for StrInput<'_> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Characters decoded from a byte reader.
#[derive(Debug)]
pub struct ReadInput<R> {
    inner: R,
    buf: Box<[u8]>,
    start: usize,
    end: usize,
    eof: bool,
}

impl<R: io::Read> ReadInput<R> {
    /// Decodes `inner` as UTF-8.
    pub fn new(inner: R) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, inner)
    }

    /// Decodes `inner` as UTF-8, reading at most `capacity` bytes at a time.
    ///
    /// `capacity` is raised to 4 so any single character fits.
    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            inner,
            buf: vec![0; capacity.max(4)].into_boxed_slice(),
            start: 0,
            end: 0,
            eof: false,
        }
    }

    /// Moves unread bytes to the front of the buffer and reads more after
    /// them.
    fn fill(&mut self) -> io::Result<()> {
        self.buf.copy_within(self.start..self.end, 0);
        self.end -= self.start;
        self.start = 0;
        loop {
            match self.inner.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.end += n;
                    return Ok(());
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}

impl<R: io::Read> CharRead for ReadInput<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        loop {
            let pending = &self.buf[self.start..self.end];
            if !pending.is_empty() {
                let (ch, len) = bstr::decode_utf8(pending);
                match ch {
                    Some(ch) => {
                        self.start += len;
                        return Ok(Some(ch));
                    }
                    // A valid prefix running to the end of the buffer may be
                    // completed by the next read.
                    None if len == pending.len() && !self.eof => {}
                    None => {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            "stream did not contain valid UTF-8",
                        ));
                    }
                }
            } else if self.eof {
                return Ok(None);
            }
            self.fill()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    /// Hands out one byte per read call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.split_first() {
                Some((first, rest)) if !buf.is_empty() => {
                    buf[0] = *first;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    fn drain(input: &mut impl CharRead) -> io::Result<String> {
        let mut out = String::new();
        while let Some(ch) = input.read_char()? {
            out.push(ch);
        }
        Ok(out)
    }

    #[test]
    fn str_input_yields_chars() {
        let mut input = StrInput::new("aé😀");
        assert_eq!(drain(&mut input).unwrap(), "aé😀");
        assert_eq!(input.read_char().unwrap(), None);
    }

    #[test]
    fn multibyte_sequences_survive_split_reads() {
        let text = "x€y😀z";
        let mut input = ReadInput::with_capacity(4, Trickle(text.as_bytes()));
        assert_eq!(drain(&mut input).unwrap(), text);
        assert_eq!(input.read_char().unwrap(), None);
    }

    #[test]
    fn small_buffer_reads_long_input() {
        let text = "ab€".repeat(1000);
        let mut input = ReadInput::with_capacity(5, text.as_bytes());
        assert_eq!(drain(&mut input).unwrap(), text);
    }

    #[test]
    fn invalid_utf8_is_invalid_data() {
        let mut input = ReadInput::new(&b"a\xffb"[..]);
        assert_eq!(input.read_char().unwrap(), Some('a'));
        let err = input.read_char().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn truncated_utf8_at_end_is_invalid_data() {
        let mut input = ReadInput::new(Trickle(&[b'a', 0xE2, 0x82]));
        assert_eq!(input.read_char().unwrap(), Some('a'));
        let err = input.read_char().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
