// std imports
use std::{io, path::PathBuf};

// third-party imports
use thiserror::Error;

// local imports
use json2xml::{ConvertError, LexError};

/// Error is an error which may occur in the application.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to open input file {path:?}: {source}")]
    OpenInput { path: PathBuf, source: io::Error },
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Convert(#[from] ConvertError<LexError, quick_xml::Error>),
}

/// Result is an alias for standard result with bound Error type.
pub type Result<T> = std::result::Result<T, Error>;
