use std::io::Write;

use log::trace;

use super::bitreader::{check_width, MAX_CHAR_WIDTH, MAX_INT_WIDTH, MAX_WIDE_WIDTH};
use crate::error::{HuffError, Result};

/// Packed bytes are handed to the sink once this many have built up.
const BUFFER_SIZE: usize = 64 * 1024;

/// Writes a bitstream for output, most significant bit first. Bits are queued until
/// they form whole bytes, and whole bytes are buffered until there are enough to be
/// worth a write to the sink. finalize() MUST be called before the sink is used or up
/// to 7 trailing bits will be lost.
pub struct BitWriter<W: Write> {
    /// Output buffer of packed bytes not yet written to the sink.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Total bytes handed to the sink so far, for loc().
    written: usize,
    /// Handle to the output stream
    sink: W,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter around the sink.
    pub fn new(sink: W) -> Self {
        Self {
            output: Vec::with_capacity(BUFFER_SIZE),
            queue: 0,
            q_bits: 0,
            written: 0,
            sink,
        }
    }

    /// Internal bitstream write function common to all write_XX functions. Queues up to
    /// 32 bits (already validated) and moves every full byte to the output buffer.
    /// (Leaves the queue dirty above q_bits, but that should be okay)
    fn push(&mut self, data: u64, depth: u8) -> Result<()> {
        self.queue <<= depth;
        self.queue |= data;
        self.q_bits += depth;
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte);
            self.q_bits -= 8;
        }
        if self.output.len() >= BUFFER_SIZE {
            self.drain_output()?;
        }
        Ok(())
    }

    /// Hand the output buffer to the sink.
    fn drain_output(&mut self) -> Result<()> {
        self.sink.write_all(&self.output)?;
        self.written += self.output.len();
        self.output.clear();
        Ok(())
    }

    /// Puts a single bit on the stream.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.push(bit as u64, 1)
    }

    /// Writes the low `width` bits (1..=16) of a narrow symbol.
    pub fn write_char(&mut self, value: u16, width: u32) -> Result<()> {
        check_width(width, MAX_CHAR_WIDTH)?;
        check_range(value as u64, width)?;
        self.push(value as u64, width as u8)
    }

    /// Writes the low `width` bits (1..=32) of value.
    pub fn write_bits(&mut self, value: u32, width: u32) -> Result<()> {
        check_width(width, MAX_INT_WIDTH)?;
        check_range(value as u64, width)?;
        self.push(value as u64, width as u8)
    }

    /// Writes the low `width` bits (1..=64) of value. Anything wider than 32 bits goes
    /// out as two pushes so the queue never overflows.
    pub fn write_wide(&mut self, value: u64, width: u32) -> Result<()> {
        check_width(width, MAX_WIDE_WIDTH)?;
        check_range(value, width)?;
        if width > 32 {
            self.push(value >> 32, (width - 32) as u8)?;
            self.push(value & 0xffff_ffff, 32)
        } else {
            self.push(value, width as u8)
        }
    }

    /// Puts 8 bits on the stream.
    pub fn write_byte(&mut self, data: u8) -> Result<()> {
        self.push(data as u64, 8)
    }

    /// Puts a 16 bit word on the stream, big-endian.
    pub fn write_short(&mut self, data: i16) -> Result<()> {
        self.push(data as u16 as u64, 16)
    }

    /// Puts a 32 bit word on the stream, big-endian.
    pub fn write_int(&mut self, data: i32) -> Result<()> {
        self.write_u32(data as u32)
    }

    /// Puts an unsigned 32 bit word on the stream, big-endian.
    pub fn write_u32(&mut self, data: u32) -> Result<()> {
        self.push(data as u64, 32)
    }

    /// Puts a 64 bit word on the stream, big-endian.
    pub fn write_long(&mut self, data: i64) -> Result<()> {
        self.write_wide(data as u64, 64)
    }

    pub fn write_float(&mut self, data: f32) -> Result<()> {
        self.write_u32(data.to_bits())
    }

    pub fn write_double(&mut self, data: f64) -> Result<()> {
        self.write_wide(data.to_bits(), 64)
    }

    /// Puts every byte of the slice on the stream, 8 bits each.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        data.iter().try_for_each(|&b| self.write_byte(b))
    }

    /// Puts each char of the string on the stream as 8 bits. Chars past U+00FF don't fit.
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_str_with_width(s, 8)
    }

    /// Puts each char of the string on the stream as `width` bits (1..=16).
    pub fn write_str_with_width(&mut self, s: &str, width: u32) -> Result<()> {
        check_width(width, MAX_CHAR_WIDTH)?;
        for c in s.chars() {
            let code = c as u32;
            if code > u16::MAX as u32 {
                return Err(HuffError::ValueOutOfRange {
                    value: code as u64,
                    width,
                });
            }
            self.write_char(code as u16, width)?;
        }
        Ok(())
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits, then forces everything out to the sink. Safe to call repeatedly.
    pub fn finalize(&mut self) -> Result<()> {
        if self.q_bits > 0 {
            let byte = (self.queue << (8 - self.q_bits)) as u8;
            trace!("Padding final byte with {} zero bits", 8 - self.q_bits);
            self.output.push(byte);
            self.q_bits = 0;
        }
        self.drain_output()?;
        self.sink.flush()?;
        Ok(())
    }

    /// Finalizes the stream and gives back the sink. The writer is gone afterwards, so no
    /// further writes can happen.
    pub fn close(mut self) -> Result<W> {
        self.finalize()?;
        Ok(self.sink)
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        let bits = (self.written + self.output.len()) * 8 + self.q_bits as usize;
        format!("[{}.{}]", bits / 8, bits % 8)
    }
}

/// Checks that value fits in width unsigned bits.
fn check_range(value: u64, width: u32) -> Result<()> {
    if width < 64 && value >> width != 0 {
        return Err(HuffError::ValueOutOfRange { value, width });
    }
    Ok(())
}
