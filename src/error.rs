//! Error type shared by the bitstream, huffman coding and compression modules.
//!
//! Every fallible call in the crate returns [`Result`]. I/O failures from the wrapped
//! byte channel are carried through unchanged in [`HuffError::Io`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffError {
    /// A multi-bit read or write asked for a width the call does not support.
    #[error("bit width {width} is outside the supported range 1..={max}")]
    InvalidWidth { width: u32, max: u32 },

    /// A write asked for a value that does not fit in the requested width.
    #[error("value {value} does not fit in {width} bits")]
    ValueOutOfRange { value: u64, width: u32 },

    #[error("attempted to read past the end of the bit stream")]
    ExhaustedStream,

    /// Draining the reader as whole bytes while part of a byte has been consumed.
    #[error("stream is not byte aligned ({bit_offset} bits into the current byte)")]
    UnalignedStream { bit_offset: usize },

    /// The compressed stream ran out before the named section was fully decoded.
    #[error("compressed stream is truncated in the {section}")]
    TruncatedStream { section: &'static str },

    #[error("cannot compress an empty input")]
    EmptyInput,

    /// The original length is stored in 32 bits.
    #[error("input of {0} bytes is too large for the 32-bit length field")]
    InputTooLarge(usize),

    #[error("malformed trie: {0}")]
    MalformedTrie(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HuffError>;
