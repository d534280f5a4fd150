//! `json2xml` reads one JSON document (or several, with `--multiple-values`)
//! and writes it as XML.

// std imports
use std::{
    fs::File,
    io::{BufWriter, Read, Write, stdin, stdout},
    process,
};

// third-party imports
use clap::Parser;
use env_logger::{self as logger};
use quick_xml::Writer;

// local imports
use json2xml::{Lexer, LexerOptions, convert};

// private modules
mod cli;
mod error;

use cli::Opt;
use error::{Error, Result};

const JSON2XML_DEBUG_LOG: &str = "JSON2XML_DEBUG_LOG";
const JSON2XML_DEBUG_LOG_STYLE: &str = "JSON2XML_DEBUG_LOG_STYLE";

// ---

fn bootstrap() {
    if std::env::var(JSON2XML_DEBUG_LOG).is_ok() {
        logger::Builder::from_env(
            logger::Env::new()
                .filter(JSON2XML_DEBUG_LOG)
                .write_style(JSON2XML_DEBUG_LOG_STYLE),
        )
        .format_timestamp_micros()
        .init();
        log::debug!("logging initialized");
    } else {
        logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .format_timestamp_millis()
            .init();
    }
}

/// Converts everything `input` holds and writes the markup, followed by a
/// newline, to `output`.
fn transcode<R: Read, W: Write>(input: R, output: W, options: LexerOptions) -> Result<()> {
    let mut writer = Writer::new(BufWriter::new(output));
    convert(Lexer::for_reader(input, options), &mut writer)?;
    let mut output = writer.into_inner();
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}

fn run() -> Result<()> {
    bootstrap();

    let opt = Opt::parse();
    log::debug!("{opt:?}");

    let input: Box<dyn Read> = match opt.input_path() {
        Some(path) => Box::new(File::open(path).map_err(|source| Error::OpenInput {
            path: path.clone(),
            source,
        })?),
        None => Box::new(stdin().lock()),
    };
    let output: Box<dyn Write> = match &opt.output {
        Some(path) => Box::new(File::create(path).map_err(|source| Error::CreateOutput {
            path: path.clone(),
            source,
        })?),
        None => Box::new(stdout().lock()),
    };

    transcode(input, output, opt.lexer_options())
}

fn main() {
    if let Err(err) = run() {
        log::debug!("{err:?}");
        eprintln!("json2xml: {err}");
        process::exit(1);
    }
}
