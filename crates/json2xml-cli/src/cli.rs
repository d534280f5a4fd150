// std imports
use std::path::PathBuf;

// third-party imports
use clap::Parser;

// local imports
use json2xml::LexerOptions;

/// Convert a JSON document to XML.
///
/// Every JSON value becomes an element named after its kind: object, array,
/// boolean, number, string or null. Object members carry their key in a
/// `name` attribute.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Opt {
    /// Input file, standard input if omitted or `-`.
    pub input: Option<PathBuf>,

    /// Output file, standard output if omitted.
    #[arg(short, long, env = "JSON2XML_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Accept several whitespace-separated top-level values and convert them one after another.
    #[arg(short, long, env = "JSON2XML_MULTIPLE_VALUES")]
    pub multiple_values: bool,

    /// Allow any Unicode whitespace between tokens, not only the four JSON whitespace characters.
    #[arg(long, env = "JSON2XML_UNICODE_WHITESPACE")]
    pub unicode_whitespace: bool,

    /// Write numbers in their shortest decimal form instead of as they appear in the input.
    #[arg(long, env = "JSON2XML_NORMALIZE_NUMBERS")]
    pub normalize_numbers: bool,
}

impl Opt {
    /// Lexer settings selected by the flags.
    pub fn lexer_options(&self) -> LexerOptions {
        LexerOptions {
            allow_unicode_whitespace: self.unicode_whitespace,
            allow_multiple_json_values: self.multiple_values,
            normalize_numbers: self.normalize_numbers,
        }
    }

    /// Input path, unless input comes from standard input.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|path| path.as_os_str() != "-")
    }
}
