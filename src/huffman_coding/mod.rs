//! The huffman module builds the prefix code for huffpack.
//!
//! Each compressed stream carries one static code, built from the byte frequencies of the whole
//! input. The pieces are:
//! - huffman: the trie itself, and the greedy merge that builds it from a frequency table.
//! - code_table: the symbol -> bit string lookup the encoder uses.
//! - trie_codec: writing the trie to the bitstream and reading it back, so the decoder can
//!   rebuild the exact same code with no side information.
//!
//! Decoding walks the trie directly and happens in the decompress function.
//!
pub mod code_table;
pub mod huffman;
pub mod trie_codec;
