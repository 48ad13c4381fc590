use log::debug;

use crate::bitstream::bitpacker::pack;
use crate::bitstream::Bitstream;
use crate::error::Result;
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::huffman::CodeTree;
use crate::tools::freq_count::{analyze, FrequencyTable};

/// Everything produced while encoding one message.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub freqs: FrequencyTable,
    pub tree: CodeTree,
    pub table: CodeTable,
    pub bits: Bitstream,
}

/// Analyze, build the code and pack the message, keeping every intermediate.
pub fn encode(data: &[u8]) -> Result<Encoded> {
    let freqs = analyze(data);
    let tree = CodeTree::build(&freqs);
    let table = tree.code_table();
    let bits = pack(data, &table)?;
    debug!("Encoded {} bytes into {} bits.", data.len(), bits.len());
    Ok(Encoded {
        freqs,
        tree,
        table,
        bits,
    })
}

/// Compress a message. The table must travel with the bitstream for it to be decoded.
pub fn encode_message(data: &[u8]) -> Result<(CodeTable, Bitstream)> {
    let Encoded { table, bits, .. } = encode(data)?;
    Ok((table, bits))
}

/// Restore a message from its code table and bitstream.
///
/// When the table knows the message length, a stream holding any other number of symbols is
/// rejected, even if every codeword in it is whole.
pub fn decode_message(table: &CodeTable, bits: &Bitstream) -> Result<Vec<u8>> {
    let tree = CodeTree::from_code_table(table)?;
    let data = match table.symbol_count() {
        Some(symbols) => tree.decode_exact(bits, symbols)?,
        None => tree.decode(bits)?,
    };
    debug!("Decoded {} bits into {} bytes.", bits.len(), data.len());
    Ok(data)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn round_trip_text() {
        let text = b"Now is the winter of our discontent made glorious summer";
        let (table, bits) = encode_message(text).unwrap();
        assert_eq!(decode_message(&table, &bits).unwrap(), text);
        assert_eq!(bits.len(), table.encoded_len(text).unwrap());
    }

    #[test]
    fn empty_message() {
        let (table, bits) = encode_message(b"").unwrap();
        assert!(table.is_empty());
        assert!(bits.is_empty());
        assert!(decode_message(&table, &bits).unwrap().is_empty());
    }

    #[test]
    fn mismatched_table_is_reported() {
        let (_, bits) = encode_message(b"abc").unwrap();
        let (other, _) = encode_message(b"").unwrap();
        assert!(matches!(
            decode_message(&other, &bits),
            Err(CodecError::EmptyTree { .. })
        ));
    }

    #[test]
    fn dropping_a_whole_codeword_is_reported() {
        // a=0, b=1: the last bit is a complete codeword on its own
        let (table, mut bits) = encode_message(b"ab").unwrap();
        bits.truncate(1);
        assert!(matches!(
            decode_message(&table, &bits),
            Err(CodecError::MalformedStream { consumed: 1, bit_len: 1 })
        ));
    }

    #[test]
    fn encode_keeps_intermediates() {
        let encoded = encode(b"aab").unwrap();
        assert_eq!(encoded.freqs.get(b'a'), 2);
        assert_eq!(encoded.tree.weight(), 3);
        assert_eq!(encoded.table.len(), 2);
        assert_eq!(encoded.table.symbol_count(), Some(3));
        assert_eq!(encoded.bits.len(), 3);
    }
}
