//! Tolerant coordinate comparison and canonical point keys.
//!
//! Split points are computed in floating point, so two endpoints that describe the same junction
//! can differ in their last bits. All coincidence checks go through a single [`Precision`], and
//! graph node identity is derived from coordinates quantized by the same epsilon.

use crate::error::{Error, Result};
use crate::point::{Point, point};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Precision {
    epsilon: f64,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
        }
    }
}

impl Precision {
    pub const DEFAULT_EPSILON: f64 = 1e-6;

    pub fn new(epsilon: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(Error::InvalidPrecision { epsilon });
        }
        Ok(Self { epsilon })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// True if `a` and `b` are within epsilon of each other on both axes.
    pub fn coincide(&self, a: Point, b: Point) -> bool {
        (a.x - b.x).abs() <= self.epsilon && (a.y - b.y).abs() <= self.epsilon
    }

    /// Lengths at or below epsilon are treated as zero.
    pub fn is_negligible(&self, length: f64) -> bool {
        length <= self.epsilon
    }

    pub fn key(&self, p: Point) -> PointKey {
        PointKey {
            x: quantize(p.x, self.epsilon),
            y: quantize(p.y, self.epsilon),
        }
    }

    /// Grid coordinates of `key` mapped back into the plane.
    pub fn key_point(&self, key: PointKey) -> Point {
        point(key.x as f64 * self.epsilon, key.y as f64 * self.epsilon)
    }
}

impl TryFrom<f64> for Precision {
    type Error = Error;

    fn try_from(epsilon: f64) -> Result<Self> {
        Self::new(epsilon)
    }
}

impl From<Precision> for f64 {
    fn from(value: Precision) -> Self {
        value.epsilon
    }
}

fn quantize(v: f64, epsilon: f64) -> i64 {
    // `as` saturates, which is fine for keys far outside the drawable range.
    (v / epsilon).round() as i64
}

/// Canonical identity of a point after quantization.
///
/// Ordering is lexicographic on `(x, y)`; path search relies on it for deterministic
/// tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointKey {
    pub x: i64,
    pub y: i64,
}

impl PointKey {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for PointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
