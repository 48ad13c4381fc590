//! The `.huf` container: one message, its code table, its symbol count and its exact bit count.
//!
//! Layout, as one MSB first bitstream:
//!
//! ```text
//! "HUF" '1'                         32 bits
//! entry count N                     16 bits
//! N x (symbol 8, length L 8, code L bits)
//! symbol count                      64 bits
//! payload bit count                 64 bits
//! payload                           bit count bits
//! zero padding to a byte boundary   0-7 bits
//! ```
//!
//! There is no checksum. The reader only checks that the framing is consistent.

use std::io::Write;

use log::trace;

use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::{BitWriter, MAGIC, VERSION};
use crate::bitstream::Bitstream;
use crate::error::{CodecError, Result};
use crate::huffman_coding::code_table::{CodeTable, Codeword};
use crate::huffman_coding::huffman::CodeTree;

const EOF_MESSAGE: &str = "unexpected end of data";

/// Write a message container. Returns the number of bytes written.
///
/// The table must carry its symbol count, as tables derived from a built tree do.
pub fn write_container<W: Write>(writer: W, table: &CodeTable, bits: &Bitstream) -> Result<usize> {
    let symbols = table
        .symbol_count()
        .ok_or_else(|| CodecError::code_table("the code table carries no symbol count"))?;
    Ok(BitWriter::new(writer).write_message(table, symbols, bits)?)
}

/// Parse a whole container held in memory.
pub fn read_container(data: &[u8]) -> Result<(CodeTable, Bitstream)> {
    let mut br = BitReader::new(data);
    let eof = || CodecError::container(EOF_MESSAGE);

    // Look for a valid signature.
    if br.bytes(3).ok_or_else(eof)? != MAGIC {
        return Err(CodecError::container("not a huffzip file (bad signature)"));
    }
    let version = br.byte().ok_or_else(eof)?;
    if version != VERSION {
        return Err(CodecError::container(format!(
            "unsupported format version {:#04x}",
            version
        )));
    }

    let table = read_code_table(&mut br)?;
    // Refuse anything the decoder could not use before touching the payload.
    CodeTree::from_code_table(&table)?;
    trace!("Code table ends at {}.", br.loc());

    let symbols = br.bint(64).ok_or_else(eof)?;
    let bit_len = usize::try_from(br.bint(64).ok_or_else(eof)?)
        .map_err(|_| CodecError::container("payload bit count does not fit in memory"))?;
    if br.remaining() < bit_len {
        return Err(CodecError::container(format!(
            "payload claims {} bits but only {} are present",
            bit_len,
            br.remaining()
        )));
    }
    // Every codeword is at least one bit long.
    if symbols > bit_len as u64 {
        return Err(CodecError::container(format!(
            "{} symbols cannot fit in {} payload bits",
            symbols, bit_len
        )));
    }
    let bits = read_payload(&mut br, bit_len);

    if br.remaining() >= 8 {
        return Err(CodecError::container(format!(
            "{} unexpected bytes after the payload",
            br.remaining() / 8
        )));
    }
    while let Some(bit) = br.bit() {
        if bit != 0 {
            return Err(CodecError::container("non-zero padding after the payload"));
        }
    }
    Ok((table.with_symbol_count(symbols), bits))
}

fn read_code_table(br: &mut BitReader<'_>) -> Result<CodeTable> {
    let eof = || CodecError::container(EOF_MESSAGE);
    let count = br.bint(16).ok_or_else(eof)? as usize;
    if count > 256 {
        return Err(CodecError::container(format!(
            "code table claims {} entries, at most 256 are possible",
            count
        )));
    }

    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let symbol = br.byte().ok_or_else(eof)?;
        let len = br.byte().ok_or_else(eof)? as usize;
        if br.remaining() < len {
            return Err(eof());
        }
        let code = Codeword::from_bits((0..len).filter_map(|_| br.bool_bit()).collect());
        entries.push((symbol, code));
    }
    CodeTable::from_entries(entries)
}

fn read_payload(br: &mut BitReader<'_>, bit_len: usize) -> Bitstream {
    let mut bp = BitPacker::new(bit_len / 8 + 1);
    let mut left = bit_len;
    while left >= 32 {
        // bit_len was checked against what is left, so these reads cannot come up short
        bp.out32(br.bint(32).unwrap_or(0) as u32);
        left -= 32;
    }
    while left > 0 {
        bp.out_bit(br.bool_bit().unwrap_or(false));
        left -= 1;
    }
    bp.finish()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compression::codec::{decode_message, encode_message};

    fn container_for(data: &[u8]) -> Vec<u8> {
        let (table, bits) = encode_message(data).unwrap();
        let mut out = Vec::new();
        write_container(&mut out, &table, &bits).unwrap();
        out
    }

    #[test]
    fn round_trip() {
        let data = b"she sells sea shells by the sea shore";
        let (table, bits) = encode_message(data).unwrap();
        let mut out = Vec::new();
        let written = write_container(&mut out, &table, &bits).unwrap();
        assert_eq!(written, out.len());

        let (table2, bits2) = read_container(&out).unwrap();
        assert_eq!(table2, table);
        assert_eq!(bits2, bits);
    }

    #[test]
    fn empty_round_trip() {
        let out = container_for(b"");
        let (table, bits) = read_container(&out).unwrap();
        assert!(table.is_empty());
        assert!(bits.is_empty());
    }

    #[test]
    fn rejects_bad_signature() {
        let mut out = container_for(b"abc");
        out[0] = b'X';
        assert!(matches!(
            read_container(&out),
            Err(CodecError::InvalidContainer(_))
        ));
    }

    #[test]
    fn rejects_truncation_and_trailing_bytes() {
        let out = container_for(b"abcabcabcabc");
        assert!(read_container(&out[..out.len() - 1]).is_err());
        assert!(read_container(&out[..5]).is_err());

        let mut longer = out.clone();
        longer.push(0);
        assert!(read_container(&longer).is_err());
    }

    #[test]
    fn rejects_dirty_padding() {
        // "aab" packs to 3 payload bits, so the last byte carries padding
        let mut out = container_for(b"aab");
        let last = out.len() - 1;
        out[last] |= 1;
        assert!(matches!(
            read_container(&out),
            Err(CodecError::InvalidContainer(_))
        ));
    }

    #[test]
    fn symbol_count_survives_and_catches_lost_codewords() {
        // 'a' is coded "0", so the stream still walks cleanly once it loses its last bit
        let data = b"abracadabra";
        let (table, mut bits) = encode_message(data).unwrap();
        assert_eq!(table.get(b'a').unwrap().len(), 1);
        bits.truncate(bits.len() - 1);
        let mut out = Vec::new();
        write_container(&mut out, &table, &bits).unwrap();

        let (table2, bits2) = read_container(&out).unwrap();
        assert_eq!(table2.symbol_count(), Some(11));
        assert!(matches!(
            decode_message(&table2, &bits2),
            Err(CodecError::MalformedStream { consumed: 22, bit_len: 22 })
        ));

        // With every codeword one bit long, a lost bit leaves fewer bits than symbols
        for data in [&b"ab"[..], b"aab"] {
            let (table, mut bits) = encode_message(data).unwrap();
            bits.truncate(bits.len() - 1);
            let mut out = Vec::new();
            write_container(&mut out, &table, &bits).unwrap();
            assert!(matches!(
                read_container(&out),
                Err(CodecError::InvalidContainer(_))
            ));
        }
    }

    #[test]
    fn rejects_impossible_symbol_count() {
        // Empty message: header 4, entry count 2, symbol count 8 (bytes 6..14), bit count 8
        let mut out = container_for(b"");
        out[13] = 1;
        assert!(matches!(
            read_container(&out),
            Err(CodecError::InvalidContainer(_))
        ));
    }

    #[test]
    fn uncounted_tables_are_not_written() {
        let table = CodeTable::from_entries(vec![(b'a', "0".parse().unwrap())]).unwrap();
        let bits: Bitstream = "00".parse().unwrap();
        assert!(matches!(
            write_container(Vec::new(), &table, &bits),
            Err(CodecError::InvalidCodeTable(_))
        ));
    }
}
