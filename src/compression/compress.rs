use std::io::Write;

use log::{debug, info, log_enabled, trace, Level};

use crate::bitstream::bitwriter::BitWriter;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::huffman::build_trie;
use crate::huffman_coding::trie_codec::write_trie;
use crate::tools::cli::HuffOpts;
use crate::tools::data_io::{open_output, read_input};
use crate::tools::freq_count::FrequencyTable;

/// The length field is a u32, so longer inputs can't be described.
fn stored_length(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| HuffError::InputTooLarge(len))
}

/// Compress `data` onto the BitWriter, then close it and hand back the sink.
///
/// The stream is the serialized trie, the input length as a u32, and then the code for every
/// input byte in order. Fails with EmptyInput when there is nothing to build a trie from.
pub fn compress<W: Write>(data: &[u8], mut bw: BitWriter<W>) -> Result<W> {
    let length = stored_length(data.len())?;

    let freqs = FrequencyTable::compute(data);
    debug!("Found {} distinct symbols in {} bytes", freqs.distinct(), freqs.total());

    let root = build_trie(&freqs)?;
    let table = CodeTable::from_trie(&root);
    if log_enabled!(Level::Trace) {
        for (sym, code) in table.sorted() {
            trace!("{:#04x} x{} -> {}", sym, freqs.get(sym), code);
        }
    }

    write_trie(&mut bw, &root)?;
    bw.write_u32(length)?;
    debug!("Trie and length written, payload starts at {}", bw.loc());

    for &byte in data {
        // Every byte of the input has a leaf, so this only fails if the table is broken
        let code = table
            .get(byte)
            .ok_or(HuffError::MalformedTrie("input symbol missing from code table"))?;
        for &bit in code.bits() {
            bw.write_bit(bit)?;
        }
    }
    debug!("Payload ends at {}", bw.loc());

    bw.close()
}

/// Compress `data` into a new Vec.
pub fn compress_to_vec(data: &[u8]) -> Result<Vec<u8>> {
    compress(data, BitWriter::new(Vec::with_capacity(data.len() / 2)))
}

/// Compress the input defined in opts <HuffOpts>. The output is only opened once the
/// whole input has compressed, so a failure never leaves a partial file behind.
pub fn compress_file(opts: &HuffOpts) -> Result<()> {
    let data = read_input(opts)?;
    let packed = compress_to_vec(&data)?;

    let mut out = open_output(opts)?;
    out.write_all(&packed)?;
    out.flush()?;

    info!(
        "Compressed {} bytes into {} bytes ({:.1}%)",
        data.len(),
        packed.len(),
        packed.len() as f64 * 100.0 / data.len() as f64
    );
    if packed.len() >= data.len() {
        info!("Input did not shrink; the trie costs more than the code saves");
    }
    Ok(())
}
