//! BitReader: the input half of the huffpack I/O subsystem.
//!
//! Reads a packed bitstream, most significant bit first within each byte, from any
//! source that supports the read() call.
//!
//! NOTE: The source is pulled in blocks of BUFFER_SIZE bytes. Only the cursor into that block
//! and the number of bits already taken from the current byte are tracked between calls.

use std::io::{ErrorKind, Read};

use crate::error::{HuffError, Result};

const BUFFER_SIZE: usize = 64 * 1024;

/// Widest read supported by read_char.
pub const MAX_CHAR_WIDTH: u32 = 16;
/// Widest read supported by read_bits.
pub const MAX_INT_WIDTH: u32 = 32;
/// Widest read supported by read_wide.
pub const MAX_WIDE_WIDTH: u32 = 64;

/// Reads a huffpack compressed stream (or any other bit packed data).
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    buf_size: usize,
    cursor: usize,
    bit_index: usize,
    /// Set once the source has returned 0 bytes. Never reset.
    eof: bool,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self::with_capacity(source, BUFFER_SIZE)
    }

    /// Creates a new BitReader that pulls `size` bytes at a time from the source.
    pub fn with_capacity(source: R, size: usize) -> Self {
        let size = size.max(1);
        Self {
            buffer: vec![0; size],
            buf_size: size,
            cursor: size,
            bit_index: 0,
            eof: false,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> Result<bool> {
        // Only try to read more data when the cursor has walked off the end of the buffer
        if self.cursor < self.buffer.len() {
            return Ok(true);
        }
        if self.eof {
            return Ok(false);
        }
        // A short read may have truncated the buffer last time, so restore its full length
        self.buffer.resize(self.buf_size, 0);
        let size = loop {
            match self.source.read(&mut self.buffer) {
                Ok(size) => break size,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        if size == 0 {
            self.buffer.clear();
            self.cursor = 0;
            self.eof = true;
            return Ok(false);
        }
        self.buffer.truncate(size);
        self.cursor = 0;
        self.bit_index = 0;
        Ok(true)
    }

    /// Returns the next bit (1 or 0), or ExhaustedStream if there is no more data to read.
    pub fn read_bit(&mut self) -> Result<u8> {
        if !self.have_data()? {
            return Err(HuffError::ExhaustedStream);
        }
        let bit = (self.buffer[self.cursor] >> (7 - self.bit_index)) & 1;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Ok(bit)
    }

    /// Returns *true* if the next bit is 1, *false* if 0, consuming the bit.
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_bit().map(|bit| bit == 1)
    }

    /// Gathers n bits (n <= 64) into the low end of a u64.
    ///
    /// Takes as many bits as possible from the current byte on each pass, so a read that
    /// straddles a byte boundary splices the tail of one byte onto the head of the next.
    fn take(&mut self, mut n: u32) -> Result<u64> {
        let mut result = 0_u64;
        while n > 0 {
            if !self.have_data()? {
                return Err(HuffError::ExhaustedStream);
            }
            let avail = 8 - self.bit_index as u32;
            let needed = n.min(avail);
            let bits = (self.buffer[self.cursor] >> (avail - needed)) & (0xff_u8 >> (8 - needed));
            result = result << needed | bits as u64;
            self.bit_index += needed as usize;
            if self.bit_index == 8 {
                self.bit_index = 0;
                self.cursor += 1;
            }
            n -= needed;
        }
        Ok(result)
    }

    /// Reads `width` bits (1..=16) as an unsigned value. Used for narrow symbols.
    pub fn read_char(&mut self, width: u32) -> Result<u16> {
        check_width(width, MAX_CHAR_WIDTH)?;
        self.take(width).map(|v| v as u16)
    }

    /// Reads `width` bits (1..=32) as an unsigned value.
    pub fn read_bits(&mut self, width: u32) -> Result<u32> {
        check_width(width, MAX_INT_WIDTH)?;
        self.take(width).map(|v| v as u32)
    }

    /// Reads `width` bits (1..=64) as an unsigned value.
    pub fn read_wide(&mut self, width: u32) -> Result<u64> {
        check_width(width, MAX_WIDE_WIDTH)?;
        self.take(width)
    }

    /// Returns the next 8 bits as a u8.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.take(8).map(|v| v as u8)
    }

    /// Returns the next 16 bits as a big-endian i16.
    pub fn read_short(&mut self) -> Result<i16> {
        self.take(16).map(|v| v as u16 as i16)
    }

    /// Returns the next 32 bits as a big-endian i32.
    pub fn read_int(&mut self) -> Result<i32> {
        self.read_u32().map(|v| v as i32)
    }

    /// Returns the next 32 bits as a big-endian u32.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.take(32).map(|v| v as u32)
    }

    /// Returns the next 64 bits as a big-endian i64.
    pub fn read_long(&mut self) -> Result<i64> {
        self.take(64).map(|v| v as i64)
    }

    /// Reinterprets the next 32 bits as an IEEE 754 single.
    pub fn read_float(&mut self) -> Result<f32> {
        self.read_u32().map(f32::from_bits)
    }

    /// Reinterprets the next 64 bits as an IEEE 754 double.
    pub fn read_double(&mut self) -> Result<f64> {
        self.take(64).map(f64::from_bits)
    }

    /// Drains everything left in the stream as whole bytes.
    pub fn read_remaining_as_bytes(&mut self) -> Result<Vec<u8>> {
        if !self.have_data()? {
            return Err(HuffError::ExhaustedStream);
        }
        if self.bit_index != 0 {
            return Err(HuffError::UnalignedStream {
                bit_offset: self.bit_index,
            });
        }
        let mut result = self.buffer[self.cursor..].to_vec();
        self.cursor = self.buffer.len();
        self.source.read_to_end(&mut result)?;
        self.eof = true;
        Ok(result)
    }

    /// True once no further bits are available.
    pub fn is_exhausted(&mut self) -> Result<bool> {
        self.have_data().map(|have| !have)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

/// Checks that a requested bit width is in 1..=max.
pub(crate) fn check_width(width: u32, max: u32) -> Result<()> {
    if width == 0 || width > max {
        return Err(HuffError::InvalidWidth { width, max });
    }
    Ok(())
}
