#![forbid(unsafe_code)]

//! Segment geometry for `linemap`.
//!
//! This crate holds the leaf-level pieces of the planar network engine: points and canonical
//! point keys, the orientation/intersection predicates, and the [`Segment`] value type with its
//! splitting operation. Everything here is pure and allocation-light; the fixed-point builder
//! that drives these predicates lives in the `linemap` crate.

pub mod error;
pub mod point;
pub mod precision;
pub mod predicates;
pub mod segment;

pub use error::{Error, Result, SegmentDefect};
pub use point::{Point, distance, point};
pub use precision::{PointKey, Precision};
pub use predicates::{Orientation, bounds_contain, intersect, orientation, share_endpoint};
pub use segment::{Segment, SegmentId, SplitPieces, split};
