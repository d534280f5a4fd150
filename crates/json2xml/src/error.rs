use std::convert::Infallible;

use thiserror::Error;

use crate::JsonToken;

/// Why a conversion stopped early.
///
/// `S` is the token source's error type and `W` the sink's. The transducer on
/// its own never touches a sink, so it reports `ConvertError<S>`.
#[derive(Error, Debug)]
pub enum ConvertError<S, W = Infallible> {
    /// The token source failed to produce a token.
    #[error("failed to read JSON input: {0}")]
    Source(S),
    /// The input ended while elements were still open.
    #[error("unexpected end of input with {depth} element(s) still open")]
    Truncated {
        /// Number of elements left open.
        depth: usize,
    },
    /// The sink failed to accept a token.
    #[error("failed to write XML output: {0}")]
    Sink(W),
    /// The source produced a closing delimiter that does not close the
    /// innermost open container.
    #[error("unbalanced {0} in JSON token stream")]
    Unbalanced(JsonToken),
    /// The source produced an infinite or NaN number.
    #[error("number {0} has no decimal representation")]
    NonFiniteNumber(f64),
}

impl<S> ConvertError<S> {
    /// Re-types a sink-free error for use alongside a sink.
    pub(crate) fn with_sink<W>(self) -> ConvertError<S, W> {
        match self {
            ConvertError::Source(err) => ConvertError::Source(err),
            ConvertError::Truncated { depth } => ConvertError::Truncated { depth },
            ConvertError::Sink(never) => match never {},
            ConvertError::Unbalanced(token) => ConvertError::Unbalanced(token),
            ConvertError::NonFiniteNumber(value) => ConvertError::NonFiniteNumber(value),
        }
    }
}
