//! The bitstream module forms the I/O subsystem for huffpack.
//!
//! Huffman codes and the serialized trie do not line up with byte boundaries, so everything
//! the compressor emits (and everything the decompressor consumes) goes through these two types.
//! Both are big-endian and most significant bit first: the first bit written is the top bit
//! of the first byte.
//!
//! - BitReader wraps anything that implements std::io::Read.
//! - BitWriter wraps anything that implements std::io::Write, and must be finalized (or closed)
//!   before the sink holds the complete stream.
//!
pub mod bitreader;
pub mod bitwriter;
