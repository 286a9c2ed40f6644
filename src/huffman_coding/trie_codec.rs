//! Writes the trie onto the bitstream ahead of the payload, and reads it back, so the
//! decoder never needs the frequency table.
//!
//! Preorder, one flag bit per node: 1 is a leaf and is followed by its 8 bit symbol, 0 is an
//! internal node and is followed by its left subtree and then its right subtree. The nesting
//! ends itself, so no counts are stored.

use std::io::{Read, Write};

use log::trace;

use super::huffman::{Node, NodeData};
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::{HuffError, Result};

/// 256 symbols can't make a trie deeper than this.
const MAX_DEPTH: usize = 255;

/// Put the trie on the stream.
pub fn write_trie<W: Write>(bw: &mut BitWriter<W>, node: &Node) -> Result<()> {
    match &node.node_data {
        NodeData::Leaf(sym) => {
            bw.write_bit(true)?;
            bw.write_byte(*sym)
        }
        NodeData::Kids(left, right) => {
            bw.write_bit(false)?;
            write_trie(bw, left)?;
            write_trie(bw, right)
        }
    }
}

/// Read a trie back off the stream. Weights of the rebuilt nodes are 0.
pub fn read_trie<R: Read>(br: &mut BitReader<R>) -> Result<Node> {
    let root = read_node(br, 0)?;
    trace!("Read trie with {} leaves, now at {}", root.leaf_count(), br.loc());
    Ok(root)
}

fn read_node<R: Read>(br: &mut BitReader<R>, depth: usize) -> Result<Node> {
    if br.read_bool()? {
        return Ok(Node::leaf(br.read_byte()?, 0));
    }
    // A run of internal flags this long can only come from a corrupt stream
    if depth >= MAX_DEPTH {
        return Err(HuffError::MalformedTrie("nested deeper than 255 levels"));
    }
    let left = read_node(br, depth + 1)?;
    let right = read_node(br, depth + 1)?;
    Ok(Node::kids(left, right))
}
