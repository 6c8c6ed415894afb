//! Compiled decision tree: storage and dispatch.
//!
//! A [`Tree`] owns its pattern array, node table, and bucket table.
//! It is immutable once built; dispatch only reads shared state, so
//! concurrent lookups from many threads need no locking.

pub mod builder;
pub mod node;

pub use builder::BUCKET_MAX;
pub use node::Node;

use crate::buffer::Buffer;
use crate::error::BuildError;
use crate::pattern::BitPattern;

/// A leaf's pattern-id list. Ids index the tree's pattern array and
/// keep the patterns' order of first appearance in the original input;
/// dispatch relies on that order to return the lowest matching index.
/// The same id may appear in several buckets: a wildcard on a split
/// bit sends a pattern down both branches.
#[derive(Debug)]
pub struct Bucket {
    ids: Buffer<u32>,
}

impl Bucket {
    pub fn ids(&self) -> &[u32] {
        self.ids.as_slice()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// An immutable compiled tree. Always holds at least one node; the
/// root is the last entry of the node table.
#[derive(Debug)]
pub struct Tree {
    pub(crate) width: u8,
    pub(crate) patterns: Vec<BitPattern>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) buckets: Vec<Bucket>,
}

impl Tree {
    /// Compile `patterns` into a tree, taking ownership of the array.
    /// See [`builder`] for the construction algorithm and failure
    /// conditions.
    pub fn build(patterns: Vec<BitPattern>) -> Result<Tree, BuildError> {
        builder::build(patterns)
    }

    /// Classify a 128-bit input word. Returns the index (into the
    /// original pattern array) of the first matching pattern, or `None`
    /// if no pattern matches. Among several overlapping matches the
    /// lowest original index always wins.
    pub fn dispatch(&self, value: u128) -> Option<usize> {
        self.dispatch_parts((value >> 64) as u64, value as u64)
    }

    /// [`dispatch`](Self::dispatch) with the input already split into
    /// high and low 64-bit halves.
    pub fn dispatch_parts(&self, high: u64, low: u64) -> Option<usize> {
        let mut current = self.root();
        loop {
            match self.nodes[current] {
                Node::Leaf { bucket, .. } => {
                    return self.buckets[bucket as usize]
                        .ids()
                        .iter()
                        .map(|&id| id as usize)
                        .find(|&id| self.patterns[id].matches(high, low));
                }
                Node::Branch {
                    bit, left, right, ..
                } => {
                    let set = if bit >= 64 {
                        (high >> (bit - 64)) & 1
                    } else {
                        (low >> bit) & 1
                    };
                    current = if set == 1 {
                        right as usize
                    } else {
                        left as usize
                    };
                }
            }
        }
    }

    /// Aligned width of the pattern set, 0 to 128.
    pub fn max_width(&self) -> u8 {
        self.width
    }

    /// Index of the root node: always the last entry of the node table.
    pub fn root(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// The owned pattern array, aligned to [`max_width`](Self::max_width).
    pub fn patterns(&self) -> &[BitPattern] {
        &self.patterns
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn bucket(&self, index: u16) -> &Bucket {
        &self.buckets[index as usize]
    }

    /// Longest root-to-leaf path, counted in nodes. Children precede
    /// their parent in the table, so one forward pass suffices.
    pub fn depth(&self) -> usize {
        let mut depths = vec![0usize; self.nodes.len()];
        for (idx, node) in self.nodes.iter().enumerate() {
            depths[idx] = match *node {
                Node::Leaf { .. } => 1,
                Node::Branch { left, right, .. } => {
                    1 + depths[left as usize].max(depths[right as usize])
                }
            };
        }
        depths[self.root()]
    }
}
