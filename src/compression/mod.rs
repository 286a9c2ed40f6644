//! The compression module manages both directions of huffpack.
//!
//! Compression happens in the following steps:
//! - Frequency count: Count how often each byte value occurs in the whole input.
//! - Trie build: Merge the two lightest nodes until one is left.
//! - Code table: Read every symbol's code off the trie.
//! - Output: The serialized trie, the input length as a u32, then each input byte's code,
//!   padded with 0s to a byte boundary.
//!
//! Decompression follows the inverse of the compression process.
//! - Read the trie back.
//! - Read the length.
//! - Walk the trie once per output byte, one bit per branch.
//!
//! A call either completes the whole stream or fails. Partial output is never usable.
//!

pub mod compress;
pub mod decompress;
