//! The compression module ties the codec together and drives it over files.
//!
//! Compression happens in the following steps:
//! - Frequency count: how often each byte occurs in the message.
//! - Code tree: merge the two lightest trees of the forest until one is left.
//! - Code table: read each byte's codeword off its path through the tree.
//! - Packing: write the codewords one after another with no padding between them.
//!
//! Decompression rebuilds the tree from the code table and walks it one bit at a time.
//!
//! The codec works on one message held in memory. The container and file handling around it
//! live in their own modules so the codec itself never touches I/O.
//!

pub mod codec;
pub mod compress;
pub mod container;
pub mod decompress;
