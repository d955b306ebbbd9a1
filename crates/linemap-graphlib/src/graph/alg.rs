//! Path search over [`Graph`](super::Graph).

use super::{Graph, HashMap, NodeKey};
use linemap_geom::{Point, distance};
use rustc_hash::FxBuildHasher;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// An ordered walk from a start node to a goal node.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub nodes: Vec<NodeKey>,
    pub points: Vec<Point>,
    /// Sum of the edge weights along the walk.
    pub cost: f64,
}

impl Path {
    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Breadth-first search by hop count.
///
/// Neighbors are expanded in edge insertion order and the first path to reach `goal` wins.
/// Returns `None` if either key is unknown or `goal` is never dequeued.
pub fn reachable(g: &Graph, start: NodeKey, goal: NodeKey) -> Option<Path> {
    if !g.has_node(start) || !g.has_node(goal) {
        return None;
    }

    let mut came_from: HashMap<NodeKey, NodeKey> = HashMap::default();
    let mut seen: HashSet<NodeKey> = HashSet::default();
    let mut queue: VecDeque<NodeKey> = VecDeque::new();
    seen.insert(start);
    queue.push_back(start);

    while let Some(v) = queue.pop_front() {
        if v == goal {
            return Some(reconstruct(g, &came_from, goal));
        }
        for e in g.edges(v) {
            if seen.insert(e.to) {
                came_from.insert(e.to, v);
                queue.push_back(e.to);
            }
        }
    }
    None
}

/// Entry of the A* open set.
#[derive(Debug, Clone, Copy)]
struct Open {
    f: f64,
    key: NodeKey,
}

impl PartialEq for Open {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

// `BinaryHeap` is a max-heap: reverse both fields so the smallest `f` pops first and ties go to
// the smallest key.
impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* shortest path by accumulated edge weight.
///
/// The heuristic is the straight-line distance between node points, which is admissible and
/// consistent as long as every edge weighs at least the distance between its nodes' points.
/// `linemap::build_graph` weighs edges exactly that way; graphs assembled by hand with shorter
/// weights may get a path that is not the cheapest. Returns `None` if either key is unknown or
/// the open set runs dry.
pub fn shortest_path(g: &Graph, start: NodeKey, goal: NodeKey) -> Option<Path> {
    let goal_point = g.node(goal)?.point;
    let start_point = g.node(start)?.point;
    let h = |key: NodeKey| -> f64 {
        g.node(key)
            .map(|n| distance(n.point, goal_point))
            .unwrap_or(0.0)
    };

    let mut open: BinaryHeap<Open> = BinaryHeap::new();
    let mut g_score: HashMap<NodeKey, f64> = HashMap::default();
    let mut came_from: HashMap<NodeKey, NodeKey> = HashMap::default();
    let mut closed: HashSet<NodeKey> = HashSet::default();

    g_score.insert(start, 0.0);
    open.push(Open {
        f: distance(start_point, goal_point),
        key: start,
    });

    while let Some(Open { key: current, .. }) = open.pop() {
        if !closed.insert(current) {
            // Stale entry for an already expanded node.
            continue;
        }
        if current == goal {
            return Some(reconstruct(g, &came_from, goal));
        }

        let current_g = g_score.get(&current).copied().unwrap_or(f64::INFINITY);
        for e in g.edges(current) {
            if closed.contains(&e.to) {
                continue;
            }
            let tentative = current_g + e.weight;
            let known = g_score.get(&e.to).copied().unwrap_or(f64::INFINITY);
            if tentative < known {
                came_from.insert(e.to, current);
                g_score.insert(e.to, tentative);
                open.push(Open {
                    f: tentative + h(e.to),
                    key: e.to,
                });
            }
        }
    }
    None
}

/// Connected components, each listed in discovery order; components are ordered by their first
/// node's insertion order.
pub fn components(g: &Graph) -> Vec<Vec<NodeKey>> {
    let mut seen: HashSet<NodeKey> = HashSet::default();
    let mut out: Vec<Vec<NodeKey>> = Vec::new();

    for start in g.node_keys() {
        if !seen.insert(start) {
            continue;
        }
        let mut comp: Vec<NodeKey> = Vec::new();
        let mut q: VecDeque<NodeKey> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            for e in g.edges(v) {
                if seen.insert(e.to) {
                    q.push_back(e.to);
                }
            }
        }
        out.push(comp);
    }

    out
}

fn reconstruct(g: &Graph, came_from: &HashMap<NodeKey, NodeKey>, goal: NodeKey) -> Path {
    let mut nodes = vec![goal];
    let mut cur = goal;
    while let Some(&prev) = came_from.get(&cur) {
        nodes.push(prev);
        cur = prev;
    }
    nodes.reverse();

    let cost: f64 = nodes
        .windows(2)
        .filter_map(|w| g.edge_weight(w[0], w[1]))
        .sum();
    let points = nodes
        .iter()
        .filter_map(|&k| g.node(k).map(|n| n.point))
        .collect();

    Path {
        nodes,
        points,
        cost,
    }
}
