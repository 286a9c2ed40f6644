//! Huffpack: a static huffman byte compressor.
//!
//! Version 0.1.0
//!
//! Counts how often each byte occurs in the input, builds an optimal prefix code from those
//! counts, and writes a self-describing stream: the code's trie, the original length, and the
//! packed codes. Decompression needs nothing but that stream.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffpack test.txt`
//!
//! This will compress the file and create the file test.txt.huf. `huffpack test.txt.huf`
//! turns it back into test.txt.
//!
//! From code, the in-memory entry points are [`compress_to_vec`] and [`decompress_from_slice`].
//! The underlying [`compression::compress::compress`] and [`compression::decompress::decompress`]
//! work on any `Read`/`Write` channel through the bitstream types.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::compress_to_vec;
pub use compression::decompress::decompress_from_slice;
pub use error::{HuffError, Result};
