//! Edge key types.
//!
//! Edges are undirected, so a key stores its endpoints in ascending order and `(a, b)` and
//! `(b, a)` name the same edge.

use super::NodeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    pub v: NodeKey,
    pub w: NodeKey,
}

impl EdgeKey {
    pub fn new(a: NodeKey, b: NodeKey) -> Self {
        if a <= b {
            Self { v: a, w: b }
        } else {
            Self { v: b, w: a }
        }
    }

    /// The endpoint opposite `from`.
    pub fn other(&self, from: NodeKey) -> NodeKey {
        if self.v == from { self.w } else { self.v }
    }
}
