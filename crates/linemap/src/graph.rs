//! Endpoint graph construction.

use linemap_geom::{Precision, Segment, distance};
use linemap_graphlib::Graph;

/// Builds the endpoint graph of `segments`.
///
/// Endpoints are keyed by `precision`, so segments meeting at a junction share a node. Each
/// segment contributes one undirected edge; repeated pairs and segments whose endpoints collapse
/// onto one key add nothing. Edges are weighted by the distance between their nodes' stored
/// points, which equals the segment length unless an endpoint was merged into a node first seen
/// elsewhere.
pub fn build_graph(segments: &[Segment], precision: Precision) -> Graph {
    let mut g = Graph::new(precision);
    for s in segments {
        let a = g.add_node(s.p1());
        let b = g.add_node(s.p2());
        let weight = g
            .node(a)
            .zip(g.node(b))
            .map_or(s.length(), |(na, nb)| distance(na.point, nb.point));
        g.add_edge(a, b, weight);
    }
    tracing::debug!(
        segments = segments.len(),
        nodes = g.node_count(),
        edges = g.edge_count(),
        "graph rebuilt"
    );
    g
}
