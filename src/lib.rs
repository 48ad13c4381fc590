//! Huffman coding compressor.
//!
//! Version 0.1.0
//!
//! Builds an optimal prefix code from the byte frequencies of a message, packs the message with
//! it bit for bit, and restores the message from the code table and the packed bits.
//!
//! The codec is a pure in-memory library:
//!
//! ```
//! use huffzip::{decode_message, encode_message};
//!
//! let (table, bits) = encode_message(b"abracadabra").unwrap();
//! assert_eq!(bits.len(), 23);
//! assert_eq!(decode_message(&table, &bits).unwrap(), b"abracadabra");
//! ```
//!
//! The code table is needed to decode, so it has to travel with the bits. It also records how
//! many symbols the message holds, so a stream that lost whole codewords is still caught. The
//! `.huf` container in [`compression::container`] stores the table, the symbol count and the
//! exact bit count next to the bits.
//!
//! Basic usage of the command line tool to compress a file is as follows:
//!
//! `$> huffzip -z test.txt`
//!
//! This will compress the file and create the file test.txt.huf.
//! The original file will be deleted unless -k is given.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use bitstream::Bitstream;
pub use compression::codec::{decode_message, encode_message};
pub use error::CodecError;
pub use huffman_coding::code_table::{CodeTable, Codeword};
pub use huffman_coding::huffman::CodeTree;
pub use tools::freq_count::{analyze, FrequencyTable};
