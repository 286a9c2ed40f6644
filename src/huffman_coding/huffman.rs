use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};

use crate::error::{HuffError, Result};
use crate::tools::freq_count::FrequencyTable;

/// What a node holds: either two children or one symbol. A node can never have just one child.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

/// One node of the huffman trie. Internal nodes own their children outright.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    /// Sum of the frequencies of every leaf below (or at) this node. Tries read back from a
    /// compressed stream carry no frequencies, so their weights are all 0.
    pub weight: u64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new leaf
    pub fn leaf(symbol: u8, weight: u64) -> Node {
        Node {
            weight,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Create a new internal node over two children, with their combined weight
    pub fn kids(left: Node, right: Node) -> Node {
        Node {
            weight: left.weight + right.weight,
            node_data: NodeData::Kids(Box::new(left), Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    /// Number of leaves (symbols) in the trie rooted here.
    pub fn leaf_count(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => left.leaf_count() + right.leaf_count(),
            NodeData::Leaf(_) => 1,
        }
    }

    /// Length of the longest root to leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => 1 + left.depth().max(right.depth()),
            NodeData::Leaf(_) => 0,
        }
    }

    /// True when both tries have the same shape and the same symbol at every leaf. Weights
    /// are ignored.
    pub fn same_shape(&self, other: &Node) -> bool {
        match (&self.node_data, &other.node_data) {
            (NodeData::Leaf(a), NodeData::Leaf(b)) => a == b,
            (NodeData::Kids(al, ar), NodeData::Kids(bl, br)) => {
                al.same_shape(bl) && ar.same_shape(br)
            }
            _ => false,
        }
    }
}

/// A node waiting in the merge queue. `seq` is the order it went into the queue.
#[derive(Debug)]
struct Pending {
    seq: usize,
    node: Node,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    /// Reversed, so the max-heap pops the lightest node first, and among equal weights the
    /// one that was queued first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .weight
            .cmp(&self.node.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Build the huffman trie for a frequency table by repeatedly merging the two lightest nodes.
///
/// Leaves are queued in ascending symbol order, and every merged node is queued behind
/// everything already there. Ties on weight go to whichever node was queued first, and the
/// first node pulled off becomes the left child. An input with a single distinct symbol
/// gives a trie that is just one leaf.
pub fn build_trie(freqs: &FrequencyTable) -> Result<Node> {
    let mut heap: BinaryHeap<Pending> = freqs
        .present()
        .enumerate()
        .map(|(seq, (sym, weight))| Pending {
            seq,
            node: Node::leaf(sym, weight),
        })
        .collect();
    let mut seq = heap.len();

    // ...then pare it down to one single node with child nodes. The lightest node comes off
    // first; if nothing is left behind it, that node is the root.
    let root = loop {
        let left = heap.pop().ok_or(HuffError::EmptyInput)?.node;
        let right = match heap.pop() {
            Some(right) => right.node,
            None => break left,
        };
        trace!("Merging weights {} and {}", left.weight, right.weight);
        heap.push(Pending {
            seq,
            node: Node::kids(left, right),
        });
        seq += 1;
    };

    debug!(
        "Built trie with {} leaves, depth {}, weight {}",
        root.leaf_count(),
        root.depth(),
        root.weight
    );
    Ok(root)
}
