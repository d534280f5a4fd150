/// Configuration options for the JSON [`Lexer`](super::Lexer).
///
/// # Examples
///
/// ```rust
/// use json2xml::{Lexer, LexerOptions};
///
/// let lexer = Lexer::for_str(
///     "1 2 3",
///     LexerOptions {
///         allow_multiple_json_values: true,
///         ..Default::default()
///     },
/// );
/// assert_eq!(lexer.count(), 3);
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct LexerOptions {
    /// Whether to allow any Unicode whitespace between tokens.
    ///
    /// By default only the four whitespace characters defined by JSON are
    /// skipped: space (U+0020), line feed (U+000A), carriage return (U+000D),
    /// and horizontal tab (U+0009).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Whether to read multiple JSON values from a single input.
    ///
    /// Supports JSON Lines (JSONL), newline-delimited JSON (ND-JSON), and any
    /// concatenation of JSON values such as `{}{}` or `1 2 3`. Each value
    /// becomes its own top-level XML element.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_json_values: bool,

    /// Whether to emit numbers as parsed floats instead of their original
    /// text.
    ///
    /// When `true`, `1e3` is written as `1000` and `1.50` as `1.5`; very large
    /// or very precise numbers lose digits beyond what an `f64` holds.
    ///
    /// # Default
    ///
    /// `false`
    pub normalize_numbers: bool,
}
