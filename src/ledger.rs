use crate::grid::WorldCoord;
use crate::segment::{Heading, PlacedSegment, SegmentKind};
use derive_more::{Display, From};
use std::collections::HashSet;

/// Stable handle to a placed segment, in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From)]
pub struct SegmentId(usize);

/// Ordered record of every segment placed during the current generation run.
///
/// Arena-backed: segments live in a growable array in insertion order and
/// neighbors are addressed by id, which gives the same head/tail/previous/
/// next traversal a linked list would without any ownership cycles.
/// Occupancy is tracked in a hash set keyed by quantized position, so the
/// generator's non-overlap check is O(1).
///
/// The ledger itself enforces no placement rules; validity is entirely the
/// caller's responsibility. Single-writer, not for concurrent use.
#[derive(Debug, Default, Clone)]
pub struct PathLedger {
    segments: Vec<PlacedSegment>,
    occupied: HashSet<(i64, i64, i64)>,
}

impl PathLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and link a new segment at the tail. O(1), always succeeds.
    pub fn append(&mut self, position: WorldCoord, heading: Heading, kind: SegmentKind) -> SegmentId {
        let id = SegmentId(self.segments.len());
        self.segments.push(PlacedSegment::new(position, heading, kind));
        self.occupied.insert(position.quantized());
        id
    }

    /// Whether any placed segment sits at `position` (exact-match semantics;
    /// positions are quantized far below the cell pitch)
    pub fn contains_position(&self, position: WorldCoord) -> bool {
        self.occupied.contains(&position.quantized())
    }

    /// The segment at `position`, if any
    pub fn find(&self, position: WorldCoord) -> Option<&PlacedSegment> {
        if !self.contains_position(position) {
            return None;
        }
        let key = position.quantized();
        self.segments.iter().find(|s| s.position.quantized() == key)
    }

    pub fn head(&self) -> Option<&PlacedSegment> {
        self.segments.first()
    }

    pub fn tail(&self) -> Option<&PlacedSegment> {
        self.segments.last()
    }

    pub fn get(&self, id: SegmentId) -> Option<&PlacedSegment> {
        self.segments.get(id.0)
    }

    /// Neighbor toward the head, if `id` is valid and not the head
    pub fn prev(&self, id: SegmentId) -> Option<SegmentId> {
        if id.0 == 0 || id.0 >= self.segments.len() {
            None
        } else {
            Some(SegmentId(id.0 - 1))
        }
    }

    /// Neighbor toward the tail, if `id` is valid and not the tail
    pub fn next(&self, id: SegmentId) -> Option<SegmentId> {
        if id.0 + 1 < self.segments.len() {
            Some(SegmentId(id.0 + 1))
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedSegment> {
        self.segments.iter()
    }

    /// The full ordered sequence, for consumers (renderers, serializers)
    pub fn segments(&self) -> &[PlacedSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Release all segments and reset to empty. Idempotent.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.occupied.clear();
    }
}
