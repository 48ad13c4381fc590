use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use log::{debug, trace};

use super::code_table::{CodeTable, Codeword};
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::Bitstream;
use crate::error::{CodecError, Result};
use crate::tools::freq_count::FrequencyTable;

#[derive(Debug, Clone)]
pub enum NodeData {
    /// The "0" child (first popped) and the "1" child (second popped).
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub weight: u64,
    /// Symbol of the leftmost leaf. Ties on weight are broken on this.
    pub lead: u8,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new leaf
    pub fn leaf(symbol: u8, weight: u64) -> Node {
        Node {
            weight,
            lead: symbol,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Make a parent for two trees, taking ownership of both.
    pub fn merge(zero: Node, one: Node) -> Node {
        Node {
            weight: zero.weight + one.weight,
            lead: zero.lead,
            node_data: NodeData::Kids(Box::new(zero), Box::new(one)),
        }
    }

    /// The child a bit leads to, or None for a leaf.
    fn child(&self, bit: bool) -> Option<&Node> {
        match &self.node_data {
            NodeData::Kids(zero, one) => Some(if bit { one } else { zero }),
            NodeData::Leaf(_) => None,
        }
    }

    /// Recursively walk the tree and record the path to every leaf.
    fn collect_codes(&self, path: &mut Codeword, table: &mut CodeTable) {
        match &self.node_data {
            NodeData::Kids(zero, one) => {
                path.push(false);
                zero.collect_codes(path, table);
                path.pop();
                path.push(true);
                one.collect_codes(path, table);
                path.pop();
            }
            NodeData::Leaf(symbol) => table.insert(*symbol, path.clone()),
        }
    }
}

// Forest order: weight first, then the leading symbol. Every symbol sits in exactly one forest
// root, so no two roots ever compare equal.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.lead == other.lead
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.lead.cmp(&other.lead))
    }
}

/// A Huffman code tree.
#[derive(Debug, Clone)]
pub enum CodeTree {
    /// No symbols at all (empty message).
    Empty,
    /// Exactly one distinct symbol. There is no branch to take, so its codeword is fixed to "0".
    Single { symbol: u8, weight: u64 },
    /// Two or more symbols. The root is always an internal node.
    Root(Node),
}

impl CodeTree {
    /// Build the tree by merging the two lowest ranked roots of the forest until one is left.
    pub fn build(freqs: &FrequencyTable) -> CodeTree {
        let mut forest: BinaryHeap<Reverse<Node>> = freqs
            .iter()
            .map(|(symbol, count)| Reverse(Node::leaf(symbol, count)))
            .collect();
        debug!("Building a code tree for {} symbols.", forest.len());

        loop {
            let Some(Reverse(zero)) = forest.pop() else {
                return CodeTree::Empty;
            };
            let Some(Reverse(one)) = forest.pop() else {
                return match zero.node_data {
                    NodeData::Leaf(symbol) => CodeTree::Single {
                        symbol,
                        weight: zero.weight,
                    },
                    NodeData::Kids(..) => CodeTree::Root(zero),
                };
            };
            trace!(
                "Merging {}/{} with {}/{}",
                zero.weight,
                zero.lead,
                one.weight,
                one.lead
            );
            forest.push(Reverse(Node::merge(zero, one)));
        }
    }

    /// Rebuild a decode tree from a code table received next to a bitstream.
    ///
    /// The table must describe a complete prefix code: no codeword is a prefix of another, and
    /// every branch ends in a leaf. A single entry must be "0". Weights are not part of a table,
    /// so every node of the rebuilt tree has weight 0.
    pub fn from_code_table(table: &CodeTable) -> Result<CodeTree> {
        let mut entries = table.iter();
        let (first, second) = (entries.next(), entries.next());
        match (first, second) {
            (None, _) => Ok(CodeTree::Empty),
            (Some((symbol, code)), None) => {
                if code.as_slice() == [false] {
                    Ok(CodeTree::Single { symbol, weight: 0 })
                } else {
                    Err(CodecError::code_table(format!(
                        "a lone symbol must have codeword 0, found {}",
                        code
                    )))
                }
            }
            _ => {
                let mut root = Slot::Open;
                for (symbol, code) in table.iter() {
                    root.place(symbol, code.as_slice())?;
                }
                root.into_node(&mut Codeword::new()).map(CodeTree::Root)
            }
        }
    }

    /// Derive the flat symbol to codeword table.
    ///
    /// The root weight of a built tree is the message length and goes into the table as its
    /// symbol count. A rebuilt tree has no weights, so its table has no count.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::default();
        match self {
            CodeTree::Empty => {}
            CodeTree::Single { symbol, .. } => {
                table.insert(*symbol, Codeword::from_bits(vec![false]))
            }
            CodeTree::Root(root) => root.collect_codes(&mut Codeword::new(), &mut table),
        }
        // Built leaves always weigh at least 1
        if self.is_empty() || self.weight() > 0 {
            table = table.with_symbol_count(self.weight());
        }
        debug!(
            "Code table has {} entries, longest code is {} bits.",
            table.len(),
            table.max_len()
        );
        table
    }

    /// Walk the tree one bit at a time, emitting a symbol at every leaf.
    ///
    /// Fails if the bits stop part way down the tree, or if there are bits but no tree. Nothing
    /// decoded before a failure is returned.
    pub fn decode(&self, bits: &Bitstream) -> Result<Vec<u8>> {
        self.walk(bits, None)
    }

    /// Like [`decode`](Self::decode), but the stream must hold exactly `symbols` codewords.
    ///
    /// Losing whole codewords off the end leaves a stream that still walks cleanly, so only the
    /// count can catch it.
    pub fn decode_exact(&self, bits: &Bitstream, symbols: u64) -> Result<Vec<u8>> {
        self.walk(bits, Some(symbols))
    }

    fn walk(&self, bits: &Bitstream, expected: Option<u64>) -> Result<Vec<u8>> {
        let bit_len = bits.len();
        let mut br = BitReader::from(bits);
        let malformed = |consumed| CodecError::MalformedStream { consumed, bit_len };

        let out = match self {
            CodeTree::Empty => {
                if !bits.is_empty() {
                    return Err(CodecError::EmptyTree { bit_len });
                }
                Vec::new()
            }
            CodeTree::Single { symbol, .. } => {
                let mut out = Vec::with_capacity(bit_len);
                while let Some(bit) = br.bool_bit() {
                    // Only "0" exists; a 1 leads nowhere
                    if bit {
                        return Err(malformed(br.consumed()));
                    }
                    out.push(*symbol);
                }
                out
            }
            CodeTree::Root(root) => {
                let mut out = Vec::with_capacity(bit_len / 2);
                let mut node = root;
                while let Some(bit) = br.bool_bit() {
                    let next = node
                        .child(bit)
                        .ok_or_else(|| malformed(br.consumed()))?;
                    if let NodeData::Leaf(symbol) = next.node_data {
                        out.push(symbol);
                        node = root;
                    } else {
                        node = next;
                    }
                }
                if !std::ptr::eq(node, root) {
                    return Err(malformed(br.consumed()));
                }
                out
            }
        };

        match expected {
            Some(symbols) if out.len() as u64 != symbols => {
                debug!(
                    "Stream of {} bits holds {} symbols, expected {}.",
                    bit_len,
                    out.len(),
                    symbols
                );
                Err(malformed(br.consumed()))
            }
            _ => Ok(out),
        }
    }

    /// Sum of the leaf weights (0 for a tree rebuilt from a table).
    pub fn weight(&self) -> u64 {
        match self {
            CodeTree::Empty => 0,
            CodeTree::Single { weight, .. } => *weight,
            CodeTree::Root(root) => root.weight,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CodeTree::Empty)
    }
}

/// Scratch tree used while placing codewords from a table.
enum Slot {
    Open,
    Leaf(u8),
    Kids(Box<Slot>, Box<Slot>),
}

impl Slot {
    fn place(&mut self, symbol: u8, path: &[bool]) -> Result<()> {
        let Some((&bit, rest)) = path.split_first() else {
            return match self {
                Slot::Open => {
                    *self = Slot::Leaf(symbol);
                    Ok(())
                }
                _ => Err(CodecError::code_table(format!(
                    "codeword of symbol {:#04x} is a prefix of another codeword",
                    symbol
                ))),
            };
        };
        if let Slot::Open = self {
            *self = Slot::Kids(Box::new(Slot::Open), Box::new(Slot::Open));
        }
        match self {
            Slot::Kids(zero, one) => {
                if bit {
                    one.place(symbol, rest)
                } else {
                    zero.place(symbol, rest)
                }
            }
            _ => Err(CodecError::code_table(format!(
                "codeword of symbol {:#04x} extends another codeword",
                symbol
            ))),
        }
    }

    fn into_node(self, path: &mut Codeword) -> Result<Node> {
        match self {
            Slot::Open => Err(CodecError::code_table(format!(
                "no codeword starts with {}",
                path
            ))),
            Slot::Leaf(symbol) => Ok(Node::leaf(symbol, 0)),
            Slot::Kids(zero, one) => {
                path.push(false);
                let zero = zero.into_node(path)?;
                path.pop();
                path.push(true);
                let one = one.into_node(path)?;
                path.pop();
                Ok(Node::merge(zero, one))
            }
        }
    }
}
