//! Error handling for huffzip.
//!
//! Every failure the codec can report is deterministic: a mismatched table and stream, or a
//! corrupt payload. None of them are worth retrying.

use thiserror::Error;

/// Main error type for the codec, the container and the file driver.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A symbol in the input has no codeword in the supplied code table.
    #[error("symbol {symbol:#04x} has no entry in the code table")]
    UnknownSymbol {
        /// The byte that could not be encoded
        symbol: u8,
    },

    /// The bitstream ended part way through a codeword, a bit led nowhere, or the stream did not
    /// hold the number of symbols the code table promised.
    #[error("malformed bitstream: decoding failed at bit {consumed} of {bit_len}")]
    MalformedStream {
        /// Bits consumed before the failure was detected
        consumed: usize,
        /// Total bits in the stream
        bit_len: usize,
    },

    /// A non-empty bitstream was handed to a tree with no symbols.
    #[error("cannot decode {bit_len} bits with an empty code tree")]
    EmptyTree {
        /// Total bits in the stream
        bit_len: usize,
    },

    /// A code table received out of band does not describe a complete prefix code.
    #[error("invalid code table: {0}")]
    InvalidCodeTable(String),

    /// The compressed file framing is damaged or not ours.
    #[error("invalid container: {0}")]
    InvalidContainer(String),

    /// The driver refused to replace an existing file.
    #[error("output file {0} already exists (use --force to overwrite)")]
    OutputExists(String),

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Shorthand for building a container error.
    pub fn container<S: Into<String>>(message: S) -> Self {
        CodecError::InvalidContainer(message.into())
    }

    /// Shorthand for building a code table error.
    pub fn code_table<S: Into<String>>(message: S) -> Self {
        CodecError::InvalidCodeTable(message.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CodecError>;
