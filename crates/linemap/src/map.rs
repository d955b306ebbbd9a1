//! The editable segment store.

use crate::error::Result;
use crate::observer::MapObserver;
use crate::options::BuilderOptions;
use crate::planar::PlanarNetwork;
use indexmap::IndexMap;
use linemap_geom::{Point, Segment, SegmentId};
use linemap_graphlib::{Graph, NodeKey, Path, alg};
use std::fmt;
use std::sync::Arc;

/// An immutable view of one rebuild: the planar network and its graph.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub network: Arc<PlanarNetwork>,
    pub graph: Arc<Graph>,
}

impl Snapshot {
    pub fn new(network: PlanarNetwork, graph: Graph) -> Self {
        Self {
            network: Arc::new(network),
            graph: Arc::new(graph),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        self.network.segments()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Added,
    Replaced,
    Removed,
    /// The edit named an unknown segment; nothing was rebuilt.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct EditOutcome {
    pub kind: EditKind,
    pub id: SegmentId,
    pub snapshot: Snapshot,
}

/// User-drawn segments plus the network and graph derived from them.
///
/// Every edit rebuilds the whole network from the user segments. A failed rebuild leaves the
/// store exactly as it was. Snapshots handed out earlier are never touched by later edits.
pub struct LineMap {
    options: BuilderOptions,
    segments: IndexMap<SegmentId, Segment>,
    snapshot: Snapshot,
    observers: Vec<Box<dyn MapObserver>>,
}

impl fmt::Debug for LineMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineMap")
            .field("options", &self.options)
            .field("segments", &self.segments.len())
            .field("network", &self.snapshot.network.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl LineMap {
    pub fn new(options: BuilderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            segments: IndexMap::new(),
            snapshot: crate::build(&[], &options)?,
            observers: Vec::new(),
        })
    }

    /// A store pre-filled with `segments`, built once. Later duplicates of an id replace
    /// earlier ones.
    pub fn with_segments(
        options: BuilderOptions,
        segments: impl IntoIterator<Item = Segment>,
    ) -> Result<Self> {
        let mut map = Self::new(options)?;
        let mut next = IndexMap::new();
        for s in segments {
            s.validate(&options.precision)?;
            next.insert(s.id().clone(), s);
        }
        let list: Vec<Segment> = next.values().cloned().collect();
        map.snapshot = crate::build(&list, &options)?;
        map.segments = next;
        Ok(map)
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    pub fn subscribe(&mut self, observer: impl MapObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Inserts a segment; an existing segment with the same id is replaced in place.
    pub fn add_segment(&mut self, segment: Segment) -> Result<EditOutcome> {
        self.upsert(segment)
    }

    /// Replaces the segment with the same id, or inserts it if the id is new.
    pub fn update_segment(&mut self, segment: Segment) -> Result<EditOutcome> {
        self.upsert(segment)
    }

    /// Removes a segment. Unknown ids are a successful no-op reported as
    /// [`EditKind::Unchanged`].
    pub fn remove_segment(&mut self, id: &SegmentId) -> Result<EditOutcome> {
        if !self.segments.contains_key(id) {
            return Ok(EditOutcome {
                kind: EditKind::Unchanged,
                id: id.clone(),
                snapshot: self.snapshot.clone(),
            });
        }
        let mut next = self.segments.clone();
        next.shift_remove(id);
        self.commit(next, EditKind::Removed, id.clone())
    }

    fn upsert(&mut self, segment: Segment) -> Result<EditOutcome> {
        segment.validate(&self.options.precision)?;
        let id = segment.id().clone();
        let mut next = self.segments.clone();
        let kind = match next.insert(id.clone(), segment) {
            Some(_) => EditKind::Replaced,
            None => EditKind::Added,
        };
        self.commit(next, kind, id)
    }

    fn commit(
        &mut self,
        next: IndexMap<SegmentId, Segment>,
        kind: EditKind,
        id: SegmentId,
    ) -> Result<EditOutcome> {
        let list: Vec<Segment> = next.values().cloned().collect();
        let snapshot = crate::build(&list, &self.options)?;

        self.segments = next;
        self.snapshot = snapshot;
        tracing::debug!(
            ?kind,
            id = %id,
            segments = self.segments.len(),
            network = self.snapshot.network.len(),
            "edit applied"
        );

        let outcome = EditOutcome {
            kind,
            id,
            snapshot: self.snapshot.clone(),
        };
        for observer in &mut self.observers {
            observer.on_rebuilt(&outcome);
        }
        Ok(outcome)
    }

    pub fn segment(&self, id: &SegmentId) -> Option<&Segment> {
        self.segments.get(id)
    }

    /// User segments in insertion order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    pub fn network(&self) -> Arc<PlanarNetwork> {
        Arc::clone(&self.snapshot.network)
    }

    pub fn graph(&self) -> Arc<Graph> {
        Arc::clone(&self.snapshot.graph)
    }

    /// Canonical node key for `p` under this map's precision.
    pub fn key_of(&self, p: Point) -> NodeKey {
        self.options.precision.key(p)
    }

    pub fn reachable(&self, start: NodeKey, goal: NodeKey) -> Option<Path> {
        alg::reachable(&self.snapshot.graph, start, goal)
    }

    pub fn shortest_path(&self, start: NodeKey, goal: NodeKey) -> Option<Path> {
        alg::shortest_path(&self.snapshot.graph, start, goal)
    }

    pub fn reachable_between(&self, from: Point, to: Point) -> Option<Path> {
        self.reachable(self.key_of(from), self.key_of(to))
    }

    pub fn shortest_path_between(&self, from: Point, to: Point) -> Option<Path> {
        self.shortest_path(self.key_of(from), self.key_of(to))
    }
}
