//! Turns a huffman trie into the symbol -> code lookup used by the encoder.
//!
//! Codes are read off the trie: every step to a left child adds a 0, every step to a right
//! child adds a 1. The table only exists while compressing. The decoder walks the trie itself.

use std::fmt;

use rustc_hash::FxHashMap;

use super::huffman::{Node, NodeData};

/// The bits of one huffman code, first bit first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .try_for_each(|&bit| write!(f, "{}", if bit { '1' } else { '0' }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    codes: FxHashMap<u8, Code>,
}

impl CodeTable {
    /// Walk the trie and record the path to every leaf. A trie that is a single leaf gives
    /// its symbol the empty code.
    pub fn from_trie(root: &Node) -> Self {
        let mut codes = FxHashMap::default();
        let mut path = Vec::new();
        return_leaves(root, &mut path, &mut codes);
        Self { codes }
    }

    /// The code for a symbol, or None if the symbol is not in the trie.
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// All (symbol, code) pairs in ascending symbol order.
    pub fn sorted(&self) -> Vec<(u8, &Code)> {
        let mut pairs: Vec<(u8, &Code)> = self.codes.iter().map(|(&s, c)| (s, c)).collect();
        pairs.sort_unstable_by_key(|&(s, _)| s);
        pairs
    }
}

/// Recursively walk the trie, pushing the path taken so far, and save it at each leaf.
fn return_leaves(node: &Node, path: &mut Vec<bool>, codes: &mut FxHashMap<u8, Code>) {
    match &node.node_data {
        NodeData::Kids(left, right) => {
            path.push(false);
            return_leaves(left, path, codes);
            path.pop();
            path.push(true);
            return_leaves(right, path, codes);
            path.pop();
        }
        NodeData::Leaf(sym) => {
            codes.insert(*sym, Code(path.clone()));
        }
    }
}
