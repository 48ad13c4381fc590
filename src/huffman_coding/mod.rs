//! The huffman module builds the prefix code used by huffzip.
//!
//! A code is built once per message from the symbol frequencies. The tree is built by the greedy
//! merge: the two lowest weight roots of the forest are joined under a new parent until one root is
//! left. Ties on weight are broken on the symbol of each root's leftmost leaf, so the same
//! frequencies always give the same codes.
//!
//! The tree and the flat table are two views of one code. The table is derived from the tree for
//! encoding by lookup; the decoder walks a tree, rebuilt from the table when the table arrived
//! out of band.
//!

pub mod code_table;
pub mod huffman;
