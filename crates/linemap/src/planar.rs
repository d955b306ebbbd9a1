//! Crossing resolution.
//!
//! The builder repeatedly finds the first crossing pair in ascending index order, replaces both
//! segments with their pieces and rescans, until a full scan finds nothing. Segments live in an
//! arena where replaced entries are tombstoned, so indices stay stable during a scan and pieces
//! are always appended after every input segment. The loop is bounded by
//! [`BuilderOptions::split_budget`].
//!
//! Every endpoint in the arena is drawn from one vertex set whose points are pairwise more than
//! epsilon apart. Two endpoints therefore coincide exactly when they are equal, and equal points
//! always share a graph key.

use crate::error::{Error, Result};
use crate::graph::build_graph;
use crate::options::BuilderOptions;
use indexmap::{IndexMap, IndexSet};
use linemap_geom::{
    Point, Precision, Segment, SegmentId, distance, intersect, share_endpoint, split,
};
use linemap_graphlib::Graph;

/// A crossing-free segment list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanarNetwork {
    precision: Precision,
    segments: Vec<Segment>,
    /// Output id -> id of the input segment it was cut from.
    origins: IndexMap<SegmentId, SegmentId>,
    splits: usize,
}

impl PlanarNetwork {
    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of splits performed to reach the fixed point.
    pub fn split_count(&self) -> usize {
        self.splits
    }

    /// The input segment an output segment descends from.
    pub fn origin_of(&self, id: &SegmentId) -> Option<&SegmentId> {
        self.origins.get(id)
    }

    /// Output pieces of one input segment, ordered from its `p1` to its `p2`.
    pub fn pieces_of<'a>(
        &'a self,
        origin: &SegmentId,
    ) -> impl Iterator<Item = &'a Segment> + use<'a> {
        let origin = origin.clone();
        self.segments
            .iter()
            .filter(move |s| self.origins.get(s.id()) == Some(&origin))
    }

    /// True if no pair of segments crosses away from a shared endpoint.
    pub fn is_planar(&self) -> bool {
        for (i, a) in self.segments.iter().enumerate() {
            for b in &self.segments[i + 1..] {
                if crossing(a, b, &self.precision).is_some() {
                    return false;
                }
            }
        }
        true
    }

    pub fn to_graph(&self) -> Graph {
        build_graph(&self.segments, self.precision)
    }
}

/// Junction points seen so far, in first-seen order.
#[derive(Debug)]
struct Vertices {
    precision: Precision,
    points: Vec<Point>,
}

impl Vertices {
    fn new(precision: Precision) -> Self {
        Self {
            precision,
            points: Vec::new(),
        }
    }

    /// The first known vertex within epsilon of `p`, or `p` itself as a new vertex.
    fn snap(&mut self, p: Point) -> Point {
        if let Some(&v) = self.points.iter().find(|&&v| self.precision.coincide(v, p)) {
            return v;
        }
        self.points.push(p);
        p
    }
}

#[derive(Debug, Clone)]
struct Slot {
    segment: Segment,
    /// Index of the input segment this slot descends from.
    origin: usize,
    live: bool,
}

/// Resolves every crossing in `segments`.
///
/// Segments that survive whole keep their id. A segment cut into several pieces yields ids
/// `"{id}#0"`, `"{id}#1"`, ... ordered from its `p1` to its `p2`; a suffix already carried by
/// another segment is skipped. Input ids are expected to be unique.
///
/// Endpoints lying within epsilon of an earlier endpoint are moved onto it first, so a segment may
/// come back displaced by up to epsilon. A segment whose endpoints both land on one vertex is
/// rejected as zero length.
pub fn build_planar(segments: &[Segment], options: &BuilderOptions) -> Result<PlanarNetwork> {
    options.validate()?;
    let precision = options.precision;
    for s in segments {
        s.validate(&precision)?;
    }

    let mut vertices = Vertices::new(precision);
    let mut snapped: Vec<Segment> = Vec::with_capacity(segments.len());
    for s in segments {
        let (p1, p2) = (vertices.snap(s.p1()), vertices.snap(s.p2()));
        let s = Segment::new(s.id().clone(), p1, p2)?;
        s.validate(&precision)?;
        snapped.push(s);
    }
    let segments = snapped.as_slice();

    let budget = options.split_budget(segments.len());
    tracing::debug!(
        segments = segments.len(),
        budget,
        "planar rebuild started"
    );

    let mut arena: Vec<Slot> = segments
        .iter()
        .enumerate()
        .map(|(origin, segment)| Slot {
            segment: segment.clone(),
            origin,
            live: true,
        })
        .collect();

    let mut splits = 0usize;
    while let Some((i, j, x)) = first_crossing(&arena, &precision) {
        if splits >= budget {
            tracing::warn!(
                budget,
                segments = segments.len(),
                live = arena.iter().filter(|s| s.live).count(),
                "split budget exhausted before reaching a planar fixed point"
            );
            return Err(Error::IntersectionBudgetExceeded {
                budget,
                segments: segments.len(),
            });
        }

        let x = vertices.snap(x);
        let pieces = split(&arena[i].segment, &arena[j].segment, x, &precision);
        tracing::trace!(
            i,
            j,
            x = x.x,
            y = x.y,
            pieces = pieces.len(),
            "split crossing pair"
        );

        let (origin_i, origin_j) = (arena[i].origin, arena[j].origin);
        arena[i].live = false;
        arena[j].live = false;
        arena.extend(pieces.first.into_iter().map(|segment| Slot {
            segment,
            origin: origin_i,
            live: true,
        }));
        arena.extend(pieces.second.into_iter().map(|segment| Slot {
            segment,
            origin: origin_j,
            live: true,
        }));
        splits += 1;
    }

    let network = assemble(segments, arena, precision, splits);
    tracing::debug!(
        segments = network.len(),
        splits,
        "planar rebuild finished"
    );
    Ok(network)
}

/// Scans live pairs `(i, j)`, `i < j`, in ascending order.
fn first_crossing(arena: &[Slot], precision: &Precision) -> Option<(usize, usize, Point)> {
    for (i, a) in arena.iter().enumerate() {
        if !a.live {
            continue;
        }
        for (j, b) in arena.iter().enumerate().skip(i + 1) {
            if !b.live {
                continue;
            }
            if let Some(x) = crossing(&a.segment, &b.segment, precision) {
                return Some((i, j, x));
            }
        }
    }
    None
}

/// The point at which `a` and `b` must be split, if any.
///
/// The intersection is snapped onto an endpoint it coincides with so pieces meet at bit-identical
/// coordinates. Pairs that already share an endpoint, or whose intersection would cut neither
/// segment, do not count as crossing.
fn crossing(a: &Segment, b: &Segment, precision: &Precision) -> Option<Point> {
    if share_endpoint(a, b, precision) {
        return None;
    }
    let x = intersect(a, b)?;
    let x = [a.p1(), a.p2(), b.p1(), b.p2()]
        .into_iter()
        .find(|&p| precision.coincide(p, x))
        .unwrap_or(x);
    (cuts(a, x, precision) || cuts(b, x, precision)).then_some(x)
}

fn cuts(s: &Segment, x: Point, precision: &Precision) -> bool {
    !precision.coincide(s.p1(), x) && !precision.coincide(s.p2(), x)
}

fn assemble(
    inputs: &[Segment],
    arena: Vec<Slot>,
    precision: Precision,
    splits: usize,
) -> PlanarNetwork {
    let mut groups: Vec<Vec<Segment>> = vec![Vec::new(); inputs.len()];
    for slot in arena.into_iter().filter(|s| s.live) {
        groups[slot.origin].push(slot.segment);
    }

    // Piece ids skip suffixes already used by an input or an earlier piece.
    let mut taken: IndexSet<SegmentId> = inputs.iter().map(|s| s.id().clone()).collect();
    let mut segments: Vec<Segment> = Vec::new();
    let mut origins: IndexMap<SegmentId, SegmentId> = IndexMap::new();
    for (input, mut pieces) in inputs.iter().zip(groups) {
        let origin = input.id();
        if pieces.len() == 1 {
            let piece = pieces.remove(0).with_id(origin.clone());
            origins.insert(origin.clone(), origin.clone());
            segments.push(piece);
            continue;
        }

        let start = input.p1();
        pieces.sort_by(|a, b| {
            distance(start, a.midpoint()).total_cmp(&distance(start, b.midpoint()))
        });
        let mut k = 0usize;
        for piece in pieces {
            let id = loop {
                let candidate = SegmentId::new(format!("{origin}#{k}"));
                k += 1;
                if taken.insert(candidate.clone()) {
                    break candidate;
                }
            };
            origins.insert(id.clone(), origin.clone());
            segments.push(piece.with_id(id));
        }
    }

    PlanarNetwork {
        precision,
        segments,
        origins,
        splits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linemap_geom::point;

    fn seg(id: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::from_coords(id, x1, y1, x2, y2).unwrap()
    }

    #[test]
    fn crossing_snaps_to_touching_endpoint() {
        let p = Precision::default();
        let bar = seg("bar", 0.0, 0.0, 10.0, 0.0);
        let stem = seg("stem", 5.0, -1e-9, 5.0, 10.0);
        assert_eq!(crossing(&bar, &stem, &p), Some(point(5.0, -1e-9)));
    }

    #[test]
    fn vertices_reuse_the_first_point_within_epsilon() {
        let mut v = Vertices::new(Precision::default());
        assert_eq!(v.snap(point(10.0, 0.0)), point(10.0, 0.0));
        assert_eq!(v.snap(point(10.0000006, 0.0)), point(10.0, 0.0));
        assert_eq!(v.snap(point(10.000002, 0.0)), point(10.000002, 0.0));
        assert_eq!(v.points.len(), 2);
    }

    #[test]
    fn corner_contact_is_not_a_crossing() {
        let p = Precision::default();
        let a = seg("a", 0.0, 0.0, 10.0, 0.0);
        let b = seg("b", 10.0, 0.0, 10.0, 10.0);
        assert_eq!(crossing(&a, &b, &p), None);
    }
}
