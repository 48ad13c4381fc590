//! Flat symbol to codeword view of a Huffman code, used for encoding by lookup.
//!
//! A [`CodeTable`] is always derived from a [`CodeTree`](super::huffman::CodeTree) (or handed
//! over out of band next to a bitstream); it is never built bit by bit on its own.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::bitstream::ParseBitsError;
use crate::error::{CodecError, Result};

/// The path from the root of a code tree to one leaf. `false` is the first popped (left)
/// child, `true` the second popped (right) child.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codeword {
    bits: Vec<bool>,
}

impl Codeword {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit)
    }

    pub fn pop(&mut self) -> Option<bool> {
        self.bits.pop()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// True if `self` is a prefix of `other` (a codeword is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl Display for Codeword {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Codeword {
    type Err = ParseBitsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(ParseBitsError(other)),
            })
            .collect::<std::result::Result<Vec<bool>, _>>()
            .map(Codeword::from_bits)
    }
}

/// Symbol to codeword mapping. Ordered by symbol so iteration is deterministic.
///
/// A table derived from a built tree also records how many symbols the message holds, so a
/// decoder can tell a complete stream from one that lost whole codewords at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Codeword>,
    symbol_count: Option<u64>,
}

impl CodeTable {
    /// Build a table from (symbol, codeword) entries, e.g. ones read back from storage.
    ///
    /// Only duplicate symbols and empty codewords are rejected here. Whether the entries form a
    /// usable prefix code is checked when a decode tree is rebuilt from the table.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, Codeword)>,
    {
        let mut codes = BTreeMap::new();
        for (symbol, code) in entries {
            if code.is_empty() {
                return Err(CodecError::code_table(format!(
                    "symbol {:#04x} has an empty codeword",
                    symbol
                )));
            }
            if codes.insert(symbol, code).is_some() {
                return Err(CodecError::code_table(format!(
                    "symbol {:#04x} appears twice",
                    symbol
                )));
            }
        }
        Ok(Self {
            codes,
            symbol_count: None,
        })
    }

    /// Attach the number of symbols in the message this table encodes.
    pub fn with_symbol_count(mut self, count: u64) -> Self {
        self.symbol_count = Some(count);
        self
    }

    /// Symbols in the message, if known. Tables rebuilt from a bare list of codewords don't know.
    pub fn symbol_count(&self) -> Option<u64> {
        self.symbol_count
    }

    /// Used by the tree walk, which guarantees distinct leaves.
    pub(crate) fn insert(&mut self, symbol: u8, code: Codeword) {
        self.codes.insert(symbol, code);
    }

    pub fn get(&self, symbol: u8) -> Option<&Codeword> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries ordered by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Codeword)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Entries ordered by (code length, symbol): the order they are stored and reported in.
    pub fn serial_order(&self) -> Vec<(u8, &Codeword)> {
        let mut entries: Vec<(u8, &Codeword)> = self.iter().collect();
        entries.sort_by_key(|(symbol, code)| (code.len(), *symbol));
        entries
    }

    /// Number of bits `symbols` will take once packed with this table.
    pub fn encoded_len(&self, symbols: &[u8]) -> Result<usize> {
        symbols.iter().try_fold(0_usize, |acc, &symbol| {
            self.get(symbol)
                .map(|code| acc + code.len())
                .ok_or(CodecError::UnknownSymbol { symbol })
        })
    }

    /// Length of the longest codeword, 0 for an empty table.
    pub fn max_len(&self) -> usize {
        self.codes.values().map(Codeword::len).max().unwrap_or(0)
    }

    /// True if no codeword is a prefix of another one.
    ///
    /// In (code, symbol) order a codeword can only be a prefix of the entries that follow it
    /// directly, so comparing neighbours is enough.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&Codeword> = self.codes.values().collect();
        sorted.sort();
        sorted.windows(2).all(|w| !w[0].is_prefix_of(w[1]))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cw(s: &str) -> Codeword {
        s.parse().unwrap()
    }

    #[test]
    fn codeword_parse_and_display() {
        let code = cw("0110");
        assert_eq!(code.len(), 4);
        assert_eq!(code.to_string(), "0110");
        assert!(cw("01").is_prefix_of(&code));
        assert!(!cw("1").is_prefix_of(&code));
        assert!("012".parse::<Codeword>().is_err());
    }

    #[test]
    fn from_entries_rejects_duplicates_and_empty() {
        assert!(CodeTable::from_entries(vec![(1, cw("0")), (1, cw("1"))]).is_err());
        assert!(CodeTable::from_entries(vec![(1, Codeword::new())]).is_err());
    }

    #[test]
    fn serial_order_is_length_then_symbol() {
        let table =
            CodeTable::from_entries(vec![(b'c', cw("11")), (b'a', cw("10")), (b'z', cw("0"))])
                .unwrap();
        let order: Vec<u8> = table.serial_order().iter().map(|(s, _)| *s).collect();
        assert_eq!(order, vec![b'z', b'a', b'c']);
        assert_eq!(table.max_len(), 2);
    }

    #[test]
    fn prefix_free_check() {
        let good =
            CodeTable::from_entries(vec![(1, cw("0")), (2, cw("10")), (3, cw("11"))]).unwrap();
        assert!(good.is_prefix_free());
        let bad =
            CodeTable::from_entries(vec![(1, cw("0")), (2, cw("01")), (3, cw("1"))]).unwrap();
        assert!(!bad.is_prefix_free());
    }

    #[test]
    fn symbol_count_is_optional() {
        let table = CodeTable::from_entries(vec![(b'a', cw("0"))]).unwrap();
        assert_eq!(table.symbol_count(), None);
        let counted = table.clone().with_symbol_count(4);
        assert_eq!(counted.symbol_count(), Some(4));
        assert_ne!(counted, table);
    }

    #[test]
    fn encoded_len_sums_codes() {
        let table = CodeTable::from_entries(vec![(b'a', cw("0")), (b'b', cw("10"))]).unwrap();
        assert_eq!(table.encoded_len(b"abba").unwrap(), 6);
        assert!(table.encoded_len(b"abc").is_err());
    }
}
