//! Internal storage entries for [`Graph`](super::Graph).

use super::{EdgeKey, Node};

#[derive(Debug, Clone, PartialEq)]
pub(in crate::graph) struct NodeEntry {
    pub(in crate::graph) node: Node,
    /// Indices into `Graph::edges`, in insertion order.
    pub(in crate::graph) incident: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub(in crate::graph) struct EdgeEntry {
    pub(in crate::graph) key: EdgeKey,
    pub(in crate::graph) weight: f64,
}
