use log::{debug, error};

use super::Bitstream;
use crate::error::{CodecError, Result};
use crate::huffman_coding::code_table::{CodeTable, Codeword};

/// Creates a bitstream for output.
pub struct BitPacker {
    output: Vec<u8>,
    queue: u64,
    q_bits: u8,
    /// Bits written so far, queued ones included.
    bit_count: usize,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of the size specified (in bytes). Call
    /// finish() to flush the bit queue and get the packed bits back.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
            bit_count: 0,
        }
    }

    /// Internal bitstream write function common to all out.XX functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue = (self.queue << 1) | bit as u64;
        self.q_bits += 1;
        self.bit_count += 1;
        self.write_stream();
    }

    /// Writes the `depth` least significant bits of `data`, most significant first. Depth is
    /// 0..=32.
    pub fn out_bits(&mut self, data: u32, depth: u8) {
        debug_assert!(depth <= 32);
        if depth == 0 {
            return;
        }
        self.queue <<= depth; //shift queue by bit length
        self.queue |= (data & (0xffffffff >> (32 - depth))) as u64; //add data portion to queue
        self.q_bits += depth; //update depth of queue bits
        self.bit_count += depth as usize;
        self.write_stream();
    }

    /// Puts an 8 bit word of pre-packed binary encoded data on the stream.
    pub fn out8(&mut self, data: u8) {
        self.out_bits(data as u32, 8);
    }

    /// Puts a 16 bit word of pre-packed binary encoded data on the stream.
    pub fn out16(&mut self, data: u16) {
        self.out_bits(data as u32, 16);
    }

    /// Puts a 32 bit word of pre-packed binary encoded data on the stream.
    pub fn out32(&mut self, data: u32) {
        self.out_bits(data, 32);
    }

    /// Puts a 64 bit word on the stream, high half first.
    pub fn out64(&mut self, data: u64) {
        self.out32((data >> 32) as u32);
        self.out32(data as u32);
    }

    /// Puts a codeword on the stream.
    pub fn out_code(&mut self, code: &Codeword) {
        code.iter().for_each(|bit| self.out_bit(bit));
    }

    /// Copies every valid bit of another bitstream onto this one.
    pub fn out_stream(&mut self, bits: &Bitstream) {
        let full_bytes = bits.len() / 8;
        bits.as_bytes()[..full_bytes]
            .iter()
            .for_each(|&byte| self.out8(byte));
        for i in full_bytes * 8..bits.len() {
            // get() can only be None past the end, and i is inside
            self.out_bit(bits.get(i).unwrap_or(false));
        }
    }

    /// Bits written so far.
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits, and returns the packed bits with their exact count.
    pub fn finish(mut self) -> Bitstream {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits = 8;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
        Bitstream::from_packed(self.output, self.bit_count)
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bit_count / 8, self.bit_count % 8)
    }
}

/// Encode `symbols` with `table`, one codeword after another, with no padding between them.
///
/// Fails with [`CodecError::UnknownSymbol`] on the first symbol the table does not cover, and
/// nothing that was packed before the failure is returned.
pub fn pack(symbols: &[u8], table: &CodeTable) -> Result<Bitstream> {
    let mut bp = BitPacker::new(symbols.len() / 2 + 1);
    for &symbol in symbols {
        let code = table
            .get(symbol)
            .ok_or(CodecError::UnknownSymbol { symbol })?;
        bp.out_code(code);
    }
    debug!(
        "Packed {} symbols into {} bits {}.",
        symbols.len(),
        bp.bit_count(),
        bp.loc()
    );
    Ok(bp.finish())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn out16_test() {
        let mut bw = BitPacker::new(100);
        let data = 0b00100001_00100000;
        bw.out16(data);
        let out = bw.finish();
        assert_eq!(out.as_bytes(), "! ".as_bytes());
        assert_eq!(out.len(), 16);
    }

    #[test]
    fn out_bits_and_loc_test() {
        let mut bw = BitPacker::new(100);
        bw.out_bits(0b0010_0001, 8);
        assert_eq!("[1.0]", &bw.loc());
        bw.out_bits(0b11, 3);
        assert_eq!("[1.3]", &bw.loc());
        let out = bw.finish();
        assert_eq!(out.as_bytes(), &[33, 0b0110_0000]);
        assert_eq!(out.len(), 11);
    }

    #[test]
    fn out32_and_out64_test() {
        let mut bw = BitPacker::new(100);
        bw.out32(0b00100001_00100000_00100001_00100000);
        bw.out64(0x0102_0304_0506_0708);
        let out = bw.finish();
        assert_eq!(out.as_bytes(), [33, 32, 33, 32, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn out_stream_keeps_alignment() {
        let mut bw = BitPacker::new(4);
        bw.out_bit(true);
        bw.out_stream(&"0000000011".parse().unwrap());
        let out = bw.finish();
        assert_eq!(out.to_string(), "10000000011");
    }

    #[test]
    fn pack_rejects_unknown_symbol() {
        let table = CodeTable::from_entries(vec![
            (b'a', "0".parse().unwrap()),
            (b'b', "1".parse().unwrap()),
        ])
        .unwrap();
        assert_eq!(pack(b"abba", &table).unwrap().to_string(), "0110");
        assert!(matches!(
            pack(b"abc", &table),
            Err(CodecError::UnknownSymbol { symbol: b'c' })
        ));
    }
}
