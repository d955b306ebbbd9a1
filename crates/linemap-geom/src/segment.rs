//! The segment value type and splitting at an intersection point.

use crate::error::{Error, Result, SegmentDefect};
use crate::point::{Point, distance, is_finite, point};
use crate::precision::Precision;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque segment identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(String);

impl SegmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random (UUID v4) id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SegmentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SegmentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A line segment between two distinct, finite points.
///
/// Direction carries no meaning beyond naming the endpoints `p1` and `p2`. Segments are
/// immutable; edits replace them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegmentRecord", into = "SegmentRecord")]
pub struct Segment {
    id: SegmentId,
    p1: Point,
    p2: Point,
}

impl Segment {
    /// Builds a segment, rejecting non-finite coordinates and coincident endpoints.
    ///
    /// Use [`Segment::validate`] to additionally reject segments shorter than a precision's
    /// epsilon.
    pub fn new(id: impl Into<SegmentId>, p1: Point, p2: Point) -> Result<Self> {
        let id = id.into();
        if !is_finite(p1) || !is_finite(p2) {
            return Err(Error::InvalidSegment {
                id,
                defect: SegmentDefect::NonFinite,
            });
        }
        if p1 == p2 {
            return Err(Error::InvalidSegment {
                id,
                defect: SegmentDefect::ZeroLength,
            });
        }
        Ok(Self { id, p1, p2 })
    }

    pub fn from_coords(id: impl Into<SegmentId>, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        Self::new(id, point(x1, y1), point(x2, y2))
    }

    /// Rejects segments whose length is negligible under `precision`.
    pub fn validate(&self, precision: &Precision) -> Result<()> {
        if precision.is_negligible(self.length()) {
            return Err(Error::InvalidSegment {
                id: self.id.clone(),
                defect: SegmentDefect::ZeroLength,
            });
        }
        Ok(())
    }

    pub fn id(&self) -> &SegmentId {
        &self.id
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    pub fn length(&self) -> f64 {
        distance(self.p1, self.p2)
    }

    pub fn midpoint(&self) -> Point {
        self.p1.lerp(self.p2, 0.5)
    }

    /// The same geometry under a different id.
    pub fn with_id(&self, id: impl Into<SegmentId>) -> Self {
        Self {
            id: id.into(),
            p1: self.p1,
            p2: self.p2,
        }
    }

    /// A sub-segment of this one, or `None` when it would be negligible.
    fn piece(&self, p1: Point, p2: Point, precision: &Precision) -> Option<Self> {
        if precision.is_negligible(distance(p1, p2)) {
            return None;
        }
        Some(Self {
            id: self.id.clone(),
            p1,
            p2,
        })
    }
}

/// Flat wire form: `{ "id", "x1", "y1", "x2", "y2" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SegmentRecord {
    #[serde(default)]
    id: Option<SegmentId>,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl TryFrom<SegmentRecord> for Segment {
    type Error = Error;

    fn try_from(r: SegmentRecord) -> Result<Self> {
        let id = r.id.unwrap_or_else(SegmentId::generate);
        Segment::from_coords(id, r.x1, r.y1, r.x2, r.y2)
    }
}

impl From<Segment> for SegmentRecord {
    fn from(s: Segment) -> Self {
        Self {
            id: Some(s.id),
            x1: s.p1.x,
            y1: s.p1.y,
            x2: s.p2.x,
            y2: s.p2.y,
        }
    }
}

/// Result of [`split`]: the surviving pieces of each input segment, in `p1 -> x -> p2` order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplitPieces {
    pub first: Vec<Segment>,
    pub second: Vec<Segment>,
}

impl SplitPieces {
    pub fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty()
    }

    pub fn into_vec(self) -> Vec<Segment> {
        let mut out = self.first;
        out.extend(self.second);
        out
    }
}

/// Splits both segments at `x`, producing `s1.p1 -> x`, `x -> s1.p2`, `s2.p1 -> x` and
/// `x -> s2.p2`.
///
/// Pieces shorter than the precision's epsilon are dropped, so `x` coinciding with an
/// endpoint leaves that segment whole. Pieces inherit their parent's id.
///
/// Only call this for segments that actually cross at `x` and do not already share an
/// endpoint; splitting an existing junction fabricates a spurious one.
pub fn split(s1: &Segment, s2: &Segment, x: Point, precision: &Precision) -> SplitPieces {
    let halves = |s: &Segment| -> Vec<Segment> {
        [s.piece(s.p1, x, precision), s.piece(x, s.p2, precision)]
            .into_iter()
            .flatten()
            .collect()
    };
    SplitPieces {
        first: halves(s1),
        second: halves(s2),
    }
}
