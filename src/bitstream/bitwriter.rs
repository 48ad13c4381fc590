use std::io::Write;

use log::trace;

use super::bitpacker::BitPacker;
use super::Bitstream;
use crate::huffman_coding::code_table::CodeTable;

/// File signature written at the start of every container.
pub const MAGIC: &[u8; 3] = b"HUF";
/// Container format version, written as the ASCII digit.
pub const VERSION: u8 = b'1';

/// Writes a message container to an output stream. Takes the code table and the packed message
/// and assembles them behind the stream header, as one continuous bitstream.
pub struct BitWriter<W> {
    /// Queue and buffer used to assemble the bitstream.
    packer: BitPacker,
    /// Handle to the output stream
    writer: W,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter that will send its output to `writer`. Nothing is written until
    /// write_message() is called.
    pub fn new(writer: W) -> Self {
        Self {
            packer: BitPacker::new(1024),
            writer,
        }
    }

    /// Push the stream header.
    fn push_header(&mut self) {
        MAGIC.iter().for_each(|&x| self.packer.out8(x));
        self.packer.out8(VERSION);
    }

    /// Push the code table as (symbol, length, pattern) entries, shortest codes first.
    fn push_code_table(&mut self, table: &CodeTable) {
        let entries = table.serial_order();
        self.packer.out16(entries.len() as u16);
        for (symbol, code) in entries {
            self.packer.out8(symbol);
            self.packer.out8(code.len() as u8);
            self.packer.out_code(code);
        }
        trace!("Code table ends at {}.", self.packer.loc());
    }

    /// Writes the whole container: header, code table, symbol count, exact payload bit count,
    /// payload bits and zero padding to the next byte. Returns the number of bytes written.
    pub fn write_message(
        mut self,
        table: &CodeTable,
        symbols: u64,
        payload: &Bitstream,
    ) -> Result<usize, std::io::Error> {
        self.push_header();
        self.push_code_table(table);
        self.packer.out64(symbols);
        self.packer.out64(payload.len() as u64);
        self.packer.out_stream(payload);

        let output = self.packer.finish();
        self.writer.write_all(output.as_bytes())?;
        self.writer.flush()?;
        Ok(output.as_bytes().len())
    }
}
