//! Orientation and intersection predicates over segments.

use crate::point::{Point, point};
use crate::precision::Precision;
use crate::segment::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of the triple `a, b, c`, from the sign of `(b - a) x (c - b)`.
///
/// Only an exactly zero cross product is `Collinear`; near-collinear triples are resolved by the
/// callers that hold a [`Precision`].
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let cross = (b.y - a.y) * (c.x - b.x) - (b.x - a.x) * (c.y - b.y);
    if cross == 0.0 {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// True if `p` lies inside the closed axis-aligned box spanned by `q` and `r`.
///
/// This is an on-segment test only for triples already known to be collinear.
pub fn bounds_contain(p: Point, q: Point, r: Point) -> bool {
    p.x >= q.x.min(r.x) && p.x <= q.x.max(r.x) && p.y >= q.y.min(r.y) && p.y <= q.y.max(r.y)
}

/// Intersection point of two segments, if any.
///
/// Properly crossing segments yield the solution of their line equations. When exactly one
/// endpoint is collinear with the other segment and lies within its bounds, that endpoint is
/// returned. Fully collinear (overlapping) pairs and parallel lines yield `None`.
pub fn intersect(s1: &Segment, s2: &Segment) -> Option<Point> {
    let (a, b) = (s1.p1(), s1.p2());
    let (c, d) = (s2.p1(), s2.p2());

    let o1 = orientation(a, b, c);
    let o2 = orientation(a, b, d);
    let o3 = orientation(c, d, a);
    let o4 = orientation(c, d, b);

    if o1 != o2 && o3 != o4 {
        return line_intersection(a, b, c, d);
    }

    // (orientation, tested endpoint, other segment)
    let touches = [
        (o1, c, a, b),
        (o2, d, a, b),
        (o3, a, c, d),
        (o4, b, c, d),
    ];
    let mut collinear = touches
        .iter()
        .filter(|(o, ..)| *o == Orientation::Collinear);
    match (collinear.next(), collinear.next()) {
        (Some(&(_, p, q, r)), None) if bounds_contain(p, q, r) => Some(p),
        _ => None,
    }
}

fn line_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    let det = (a.x - b.x) * (c.y - d.y) - (a.y - b.y) * (c.x - d.x);
    if det == 0.0 {
        return None;
    }
    let ab = a.x * b.y - a.y * b.x;
    let cd = c.x * d.y - c.y * d.x;
    let x = (ab * (c.x - d.x) - (a.x - b.x) * cd) / det;
    let y = (ab * (c.y - d.y) - (a.y - b.y) * cd) / det;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(point(x, y))
}

/// True if any endpoint of `s1` coincides with any endpoint of `s2`.
pub fn share_endpoint(s1: &Segment, s2: &Segment, precision: &Precision) -> bool {
    [s1.p1(), s1.p2()]
        .into_iter()
        .any(|p| precision.coincide(p, s2.p1()) || precision.coincide(p, s2.p2()))
}
