//! Graph container APIs used by `linemap`.
//!
//! This module contains the core `Graph` container plus the path search algorithms re-exported
//! as `linemap_graphlib::alg`.

mod edge_key;
mod entries;

pub mod alg;

pub use edge_key::EdgeKey;

use entries::{EdgeEntry, NodeEntry};
use linemap_geom::{Point, PointKey, Precision};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

pub type NodeKey = PointKey;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub key: NodeKey,
    /// Coordinates of the first endpoint that resolved to `key`.
    pub point: Point,
}

/// A directed half-edge as seen from `from`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: NodeKey,
    pub to: NodeKey,
    pub weight: f64,
}

/// Undirected weighted graph keyed by canonical point keys.
///
/// Insertion is idempotent: re-adding a node keeps the first coordinates, and re-adding an edge
/// between an already connected pair is ignored. Self-loops are never stored. Iteration order
/// follows insertion order, so a graph built twice from the same input is identical.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    precision: Precision,

    nodes: Vec<NodeEntry>,
    node_index: HashMap<NodeKey, usize>,

    edges: Vec<EdgeEntry>,
    edge_index: HashMap<EdgeKey, usize>,
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.precision == other.precision && self.nodes == other.nodes && self.edges == other.edges
    }
}

impl Graph {
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
        }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Canonical key for `p` under this graph's precision.
    pub fn key_of(&self, p: Point) -> NodeKey {
        self.precision.key(p)
    }

    /// Returns the key of the node at `p`, creating the node on first sight.
    pub fn add_node(&mut self, p: Point) -> NodeKey {
        let key = self.key_of(p);
        self.add_node_with_key(key, p);
        key
    }

    /// Inserts a node under an explicit key. Returns `false` if the key already exists.
    pub fn add_node_with_key(&mut self, key: NodeKey, p: Point) -> bool {
        if self.node_index.contains_key(&key) {
            return false;
        }
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            node: Node { key, point: p },
            incident: Vec::new(),
        });
        self.node_index.insert(key, idx);
        true
    }

    /// Connects `a` and `b`.
    ///
    /// Returns `false` (and changes nothing) for self-loops, unknown endpoints, non-finite or
    /// negative weights, and pairs that are already connected.
    pub fn add_edge(&mut self, a: NodeKey, b: NodeKey, weight: f64) -> bool {
        if a == b || !weight.is_finite() || weight < 0.0 {
            return false;
        }
        let (Some(&a_ix), Some(&b_ix)) = (self.node_index.get(&a), self.node_index.get(&b)) else {
            return false;
        };
        let key = EdgeKey::new(a, b);
        if self.edge_index.contains_key(&key) {
            return false;
        }
        let idx = self.edges.len();
        self.edges.push(EdgeEntry { key, weight });
        self.edge_index.insert(key, idx);
        self.nodes[a_ix].incident.push(idx);
        self.nodes[b_ix].incident.push(idx);
        true
    }

    pub fn has_node(&self, key: NodeKey) -> bool {
        self.node_index.contains_key(&key)
    }

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.node_index.get(&key).map(|&idx| &self.nodes[idx].node)
    }

    /// Looks a node up by coordinates (the inverse of canonicalization).
    pub fn node_at(&self, p: Point) -> Option<&Node> {
        self.node(self.key_of(p))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().map(|n| &n.node)
    }

    pub fn node_keys(&self) -> Vec<NodeKey> {
        self.nodes.iter().map(|n| n.node.key).collect()
    }

    /// Half-edges leaving `key`, in insertion order. Empty for unknown keys.
    pub fn edges(&self, key: NodeKey) -> impl Iterator<Item = Edge> + '_ {
        self.node_index
            .get(&key)
            .into_iter()
            .flat_map(move |&ix| self.nodes[ix].incident.iter())
            .map(move |&e| {
                let entry = &self.edges[e];
                Edge {
                    from: key,
                    to: entry.key.other(key),
                    weight: entry.weight,
                }
            })
    }

    /// Every undirected edge once, oriented `v -> w` with `v < w`, in insertion order.
    pub fn all_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().map(|e| Edge {
            from: e.key.v,
            to: e.key.w,
            weight: e.weight,
        })
    }

    pub fn neighbors(&self, key: NodeKey) -> Vec<NodeKey> {
        self.edges(key).map(|e| e.to).collect()
    }

    pub fn has_edge(&self, a: NodeKey, b: NodeKey) -> bool {
        self.edge_index.contains_key(&EdgeKey::new(a, b))
    }

    pub fn edge_weight(&self, a: NodeKey, b: NodeKey) -> Option<f64> {
        self.edge_index
            .get(&EdgeKey::new(a, b))
            .map(|&idx| self.edges[idx].weight)
    }
}
