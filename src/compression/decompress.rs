use std::io::{Read, Write};

use log::{debug, info, warn};

use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::{HuffError, Result};
use crate::huffman_coding::huffman::{Node, NodeData};
use crate::huffman_coding::trie_codec::read_trie;
use crate::tools::cli::HuffOpts;
use crate::tools::data_io::{open_input, open_output};

/// An exhausted reader while decoding means the compressed stream was cut short.
fn truncated(section: &'static str) -> impl Fn(HuffError) -> HuffError {
    move |e| match e {
        HuffError::ExhaustedStream => HuffError::TruncatedStream { section },
        other => other,
    }
}

/// Walk from the root to a leaf, one bit per branch. A root that is itself a leaf takes no bits.
fn decode_symbol<R: Read>(br: &mut BitReader<R>, root: &Node) -> Result<u8> {
    let mut node = root;
    loop {
        match &node.node_data {
            NodeData::Leaf(sym) => return Ok(*sym),
            NodeData::Kids(left, right) => {
                node = if br.read_bool()? { right } else { left };
            }
        }
    }
}

/// Read the trie and the stored length that open every compressed stream.
fn read_header<R: Read>(br: &mut BitReader<R>) -> Result<(Node, u32)> {
    let root = read_trie(br).map_err(truncated("trie"))?;
    debug!("Trie has {} leaves, depth {}", root.leaf_count(), root.depth());
    if root.is_leaf() {
        debug!("Single symbol trie, the payload holds no bits");
    }

    let length = br.read_u32().map_err(truncated("length"))?;
    debug!("Expecting {} bytes, payload starts at {}", length, br.loc());
    Ok((root, length))
}

/// Decode `length` symbols onto the BitWriter.
fn decode_payload<R: Read, W: Write>(
    br: &mut BitReader<R>,
    root: &Node,
    length: u32,
    bw: &mut BitWriter<W>,
) -> Result<()> {
    for decoded in 0..length {
        let sym = decode_symbol(br, root).map_err(|e| {
            warn!("Stream ended after {} of {} bytes", decoded, length);
            truncated("payload")(e)
        })?;
        bw.write_byte(sym)?;
    }
    Ok(())
}

/// Decompress a stream written by compress(), putting every decoded byte on the BitWriter,
/// then close it and hand back the sink.
///
/// Exactly as many bytes as the stored length are produced. The padding after the last code
/// is never read.
pub fn decompress<R: Read, W: Write>(br: &mut BitReader<R>, mut bw: BitWriter<W>) -> Result<W> {
    let (root, length) = read_header(br)?;
    decode_payload(br, &root, length, &mut bw)?;
    bw.close()
}

/// Decompress a complete compressed stream held in memory.
pub fn decompress_from_slice(data: &[u8]) -> Result<Vec<u8>> {
    let mut br = BitReader::new(data);
    decompress(&mut br, BitWriter::new(Vec::with_capacity(data.len() * 2)))
}

/// Decompress the input defined in opts <HuffOpts>.
///
/// A multi-symbol payload is decoded in memory and the output is only opened once it is
/// complete, so a truncated input never leaves a partial file behind. A single symbol payload
/// reads no bits and can't be cut short once the header is in, so it is streamed straight to
/// the output instead of being held in memory.
pub fn decompress_file(opts: &HuffOpts) -> Result<()> {
    let mut br = BitReader::new(open_input(opts)?);
    let (root, length) = read_header(&mut br)?;

    if root.is_leaf() {
        let mut bw = BitWriter::new(open_output(opts)?);
        decode_payload(&mut br, &root, length, &mut bw)?;
        bw.close()?.flush()?;
    } else {
        let mut bw = BitWriter::new(Vec::new());
        decode_payload(&mut br, &root, length, &mut bw)?;
        let data = bw.close()?;

        let mut out = open_output(opts)?;
        out.write_all(&data)?;
        out.flush()?;
    }

    info!("Decompressed {} bytes", length);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{decompress, decompress_file, decompress_from_slice};
    use crate::bitstream::bitreader::BitReader;
    use crate::bitstream::bitwriter::BitWriter;
    use crate::compression::compress::compress_to_vec;
    use crate::error::HuffError;
    use crate::tools::cli::{HuffOpts, Mode};
    use std::io::{self, ErrorKind, Read};

    fn temp_name(tag: &str) -> String {
        let mut path = std::env::temp_dir();
        path.push(format!("huffpack_decompress_{}_{}", tag, std::process::id()));
        path.to_string_lossy().into_owned()
    }

    fn file_opts(input: &str, output: &str) -> HuffOpts {
        let mut opts = HuffOpts::new();
        opts.op_mode = Mode::Unzip;
        opts.file = Some(input.to_string());
        opts.out_file = Some(output.to_string());
        opts
    }

    fn round_trip(data: &[u8]) {
        let packed = compress_to_vec(data).unwrap();
        assert_eq!(decompress_from_slice(&packed).unwrap(), data);
    }

    #[test]
    fn scenario_test() {
        round_trip("AaAbbBc1".repeat(9).as_bytes());
    }

    #[test]
    fn single_symbol_test() {
        let packed = compress_to_vec(&[0x41; 50]).unwrap();
        let out = decompress_from_slice(&packed).unwrap();
        assert_eq!(out, vec![0x41; 50]);
    }

    #[test]
    fn single_byte_test() {
        round_trip(&[0]);
        round_trip(&[255]);
    }

    #[test]
    fn all_bytes_test() {
        let data: Vec<u8> = (0..=255_u8).cycle().take(4096).collect();
        round_trip(&data);
        let reversed: Vec<u8> = (0..=255_u8).rev().collect();
        round_trip(&reversed);
    }

    #[test]
    fn pseudo_random_test() {
        let mut state = 0x2545_f491_u32;
        for size in [1_usize, 2, 3, 7, 8, 9, 100, 1000, 20_000] {
            for spread in [1_u32, 2, 17, 256] {
                let data: Vec<u8> = (0..size)
                    .map(|_| {
                        state ^= state << 13;
                        state ^= state >> 17;
                        state ^= state << 5;
                        (state % spread) as u8
                    })
                    .collect();
                round_trip(&data);
            }
        }
    }

    #[test]
    fn skewed_test() {
        // Fibonacci-like weights give the deepest tries
        let mut data = Vec::new();
        let (mut a, mut b) = (1_usize, 1_usize);
        for sym in 0..20_u8 {
            data.extend(std::iter::repeat(sym).take(a));
            let next = a + b;
            a = b;
            b = next;
        }
        round_trip(&data);
    }

    #[test]
    fn truncated_payload_test() {
        let packed = compress_to_vec("AaAbbBc1".repeat(9).as_bytes()).unwrap();
        let result = decompress_from_slice(&packed[..20]);
        assert!(matches!(
            result,
            Err(HuffError::TruncatedStream { section: "payload" })
        ));
    }

    #[test]
    fn truncated_header_test() {
        let packed = compress_to_vec(b"hello, world").unwrap();
        assert!(matches!(
            decompress_from_slice(&packed[..2]),
            Err(HuffError::TruncatedStream { section: "trie" })
        ));
        assert!(matches!(
            decompress_from_slice(&[]),
            Err(HuffError::TruncatedStream { section: "trie" })
        ));
        // The single leaf trie takes 9 bits, so 3 bytes cut the length field short
        let packed = compress_to_vec(&[7; 10]).unwrap();
        assert!(matches!(
            decompress_from_slice(&packed[..3]),
            Err(HuffError::TruncatedStream { section: "length" })
        ));
    }

    #[test]
    fn zero_length_stream_test() {
        // A leaf trie with a stored length of 0 decodes to nothing
        let mut bw = BitWriter::new(Vec::new());
        bw.write_bit(true).unwrap();
        bw.write_byte(b'q').unwrap();
        bw.write_u32(0).unwrap();
        let packed = bw.close().unwrap();
        assert!(decompress_from_slice(&packed).unwrap().is_empty());
    }

    #[test]
    fn stops_at_length_test() {
        // Extra bytes after the stream are left unread
        let mut packed = compress_to_vec(b"banana").unwrap();
        packed.extend_from_slice(&[0xff; 4]);
        let mut br = BitReader::new(packed.as_slice());
        let out = decompress(&mut br, BitWriter::new(Vec::new())).unwrap();
        assert_eq!(out, b"banana".to_vec());
        assert!(!br.is_exhausted().unwrap());
    }

    #[test]
    fn small_reads_test() {
        // Hands out one byte per call and interrupts every other call
        struct Trickle<'a> {
            data: &'a [u8],
            interrupt: bool,
        }
        impl Read for Trickle<'_> {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                self.interrupt = !self.interrupt;
                if self.interrupt {
                    return Err(io::Error::new(ErrorKind::Interrupted, "try again"));
                }
                match self.data.split_first() {
                    Some((&byte, rest)) if !buf.is_empty() => {
                        buf[0] = byte;
                        self.data = rest;
                        Ok(1)
                    }
                    _ => Ok(0),
                }
            }
        }

        let data: Vec<u8> = (0..3000_u32).map(|i| (i * i % 251) as u8).collect();
        let packed = compress_to_vec(&data).unwrap();
        let source = Trickle { data: &packed, interrupt: false };
        let mut br = BitReader::with_capacity(source, 3);
        let out = decompress(&mut br, BitWriter::new(Vec::new())).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn single_symbol_file_test() {
        // Five header bytes claiming a long run of one symbol
        let mut bw = BitWriter::new(Vec::new());
        bw.write_bit(true).unwrap();
        bw.write_byte(b'q').unwrap();
        bw.write_u32(300_000).unwrap();
        let packed = bw.close().unwrap();
        assert_eq!(packed.len(), 6);

        let (input, output) = (temp_name("leaf_in"), temp_name("leaf_out"));
        std::fs::write(&input, &packed).unwrap();
        decompress_file(&file_opts(&input, &output)).unwrap();

        let out = std::fs::read(&output).unwrap();
        assert_eq!(out.len(), 300_000);
        assert!(out.iter().all(|&b| b == b'q'));
        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&output).unwrap();
    }

    #[test]
    fn truncated_file_test() {
        let packed = compress_to_vec("AaAbbBc1".repeat(9).as_bytes()).unwrap();
        let (input, output) = (temp_name("cut_in"), temp_name("cut_out"));
        std::fs::write(&input, &packed[..20]).unwrap();

        let result = decompress_file(&file_opts(&input, &output));
        assert!(matches!(
            result,
            Err(HuffError::TruncatedStream { section: "payload" })
        ));
        assert!(!std::path::Path::new(&output).exists());
        std::fs::remove_file(&input).unwrap();
    }
}
