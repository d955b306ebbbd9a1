#![forbid(unsafe_code)]

//! Planar segment networks.
//!
//! `linemap` keeps a set of hand-drawn line segments free of crossings and derives an endpoint
//! graph for reachability and shortest-path queries:
//!
//! - [`planar`]: splits crossing segments until a fixed point is reached,
//! - [`graph`]: turns the planar segment list into a weighted [`Graph`],
//! - [`LineMap`]: the editable store that rebuilds both after every edit.
//!
//! Everything is synchronous and pure; snapshots are immutable and shared via `Arc`.

pub use linemap_geom as geom;
pub use linemap_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod graph;
pub mod map;
pub mod observer;
pub mod options;
pub mod planar;

pub use error::{Error, Result};
pub use geom::{Point, PointKey, Precision, Segment, SegmentId, point};
pub use graph::build_graph;
pub use graphlib::{Graph, NodeKey, Path};
pub use map::{EditKind, EditOutcome, LineMap, Snapshot};
pub use observer::MapObserver;
pub use options::BuilderOptions;
pub use planar::{PlanarNetwork, build_planar};

/// Builds the planar network and its graph from an arbitrary segment list.
pub fn build(segments: &[Segment], options: &BuilderOptions) -> Result<Snapshot> {
    let network = build_planar(segments, options)?;
    let graph = build_graph(network.segments(), options.precision);
    Ok(Snapshot::new(network, graph))
}
