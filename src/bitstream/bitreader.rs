//! BitReader: reads a packed bitstream, most significant bit first.
//!
//! The reader never looks past its bit limit. For a [`Bitstream`] that limit is the exact bit
//! count, so the zero padding at the end of the last byte can never be mistaken for data.
//!

use super::Bitstream;

/// Reads bits and fixed width integers out of a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
    /// Total number of readable bits.
    limit: usize,
    /// Bits consumed so far.
    consumed: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader over every bit of `buffer`.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_limit(buffer, buffer.len() * 8)
    }

    /// Creates a reader that stops after `limit` bits (clamped to the buffer).
    pub fn with_limit(buffer: &'a [u8], limit: usize) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
            limit: limit.min(buffer.len() * 8),
            consumed: 0,
        }
    }

    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<usize> {
        if self.consumed == self.limit {
            return None;
        }
        let bit = (self.buffer[self.cursor] >> (7 - self.bit_index)) & 1;
        self.bit_index += 1;
        self.consumed += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Some(bit as usize)
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Return Option<u64> of the next n bits (n <= 64), or None if fewer than n bits are left.
    /// Nothing is consumed when None is returned.
    pub fn bint(&mut self, mut n: usize) -> Option<u64> {
        debug_assert!(n <= 64);
        if self.remaining() < n {
            return None;
        }
        let mut result = 0_u64;

        // Finish off a partial byte first.
        while n > 0 && self.bit_index > 0 {
            result = result << 1 | self.bit()? as u64;
            n -= 1;
        }
        // Then whole bytes.
        while n >= 8 {
            result = result << 8 | self.buffer[self.cursor] as u64;
            self.cursor += 1;
            self.consumed += 8;
            n -= 8;
        }
        // Then whatever is left.
        while n > 0 {
            result = result << 1 | self.bit()? as u64;
            n -= 1;
        }
        Some(result)
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read. This is
    /// a convenience function, and calls bint(8).
    pub fn byte(&mut self) -> Option<u8> {
        self.bint(8).map(|byte| byte as u8)
    }

    /// Returns an Option<Vec<u8>> of n bytes, or None if there are not that many left.
    pub fn bytes(&mut self, n: usize) -> Option<Vec<u8>> {
        if self.remaining() < n * 8 {
            return None;
        }
        (0..n).map(|_| self.byte()).collect()
    }

    /// Bits consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Bits left before the limit.
    pub fn remaining(&self) -> usize {
        self.limit - self.consumed
    }

    pub fn is_exhausted(&self) -> bool {
        self.consumed == self.limit
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

impl<'a> From<&'a Bitstream> for BitReader<'a> {
    fn from(bits: &'a Bitstream) -> Self {
        BitReader::with_limit(bits.as_bytes(), bits.len())
    }
}
