#![forbid(unsafe_code)]

//! Endpoint graph used by `linemap`.
//!
//! Nodes are identified by canonical point keys, so coincident segment endpoints collapse into a
//! single junction. Edges are undirected and weighted by segment length. Path search lives in
//! [`alg`].

pub mod graph;

pub use graph::alg;
pub use graph::alg::Path;
pub use graph::{Edge, EdgeKey, Graph, Node, NodeKey};
