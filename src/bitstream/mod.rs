//! The bitstream module forms the bit-level I/O subsystem for huffzip.
//!
//! Huffman codewords have no byte alignment, so everything the codec produces is a dense run of
//! bits. A [`Bitstream`] keeps those bits packed most significant bit first, together with the
//! exact number of bits that are meaningful. The unused bits at the end of the last byte are
//! always zero and are never counted, so a stream with 9 bits and a stream with 16 bits are never
//! confused with each other.
//!
//! - bitpacker: queue bits MSB first and pack a message with a code table.
//! - bitreader: read bits and fixed width integers back out of a byte slice, bounded by a bit count.
//! - bitwriter: assemble the `.huf` container and hand it to an output stream.
//!
pub mod bitpacker;
pub mod bitreader;
pub mod bitwriter;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// A sequence of bits with an exact length. Bits are stored MSB first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitstream {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl Bitstream {
    /// Create an empty bitstream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Used by the packer once it has flushed its queue. Padding is already zero.
    pub(crate) fn from_packed(bytes: Vec<u8>, bit_len: usize) -> Self {
        debug_assert_eq!(bytes.len(), bytes_for(bit_len));
        Self { bytes, bit_len }
    }

    /// Number of meaningful bits.
    pub fn len(&self) -> usize {
        self.bit_len
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// The packed bytes, including the zero padding of the last byte.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the bit at `index`, or None past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_len {
            return None;
        }
        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_len).map(move |i| self.bytes[i / 8] & (0x80 >> (i % 8)) != 0)
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        let offset = self.bit_len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> offset;
        }
        self.bit_len += 1;
    }

    /// Shorten the stream to `bit_len` bits. Does nothing if it is already that short.
    pub fn truncate(&mut self, bit_len: usize) {
        if bit_len >= self.bit_len {
            return;
        }
        self.bytes.truncate(bytes_for(bit_len));
        let keep = bit_len % 8;
        if keep > 0 {
            let last = self.bytes.len() - 1;
            self.bytes[last] &= 0xff << (8 - keep);
        }
        self.bit_len = bit_len;
    }
}

/// Bytes needed to hold `bits` bits.
pub(crate) fn bytes_for(bits: usize) -> usize {
    (bits + 7) / 8
}

impl FromIterator<bool> for Bitstream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut stream = Bitstream::new();
        iter.into_iter().for_each(|bit| stream.push(bit));
        stream
    }
}

/// Shows the bits as a string of '0' and '1'.
impl Display for Bitstream {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Returned when a string holds something other than '0' and '1'.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid bit character {0:?}")]
pub struct ParseBitsError(pub char);

impl FromStr for Bitstream {
    type Err = ParseBitsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(ParseBitsError(other)),
            })
            .collect()
    }
}
