use crate::tile::MAX_POINTS;

use super::grid::OccupancyGrid;
use super::{BucketDirectory, Chain, Segment};

/// Initial backing capacity of a node's primitive array.
pub(super) const INITIAL_CAPACITY: usize = 1024;

/// One capacity-bounded run of a bucket's segments, with its own occupancy grid.
#[derive(Debug, Clone)]
pub struct SegmentNode {
    segments: Vec<Segment>,
    grid: OccupancyGrid,
}

impl SegmentNode {
    fn new() -> Self {
        Self { segments: Vec::with_capacity(INITIAL_CAPACITY), grid: OccupancyGrid::new() }
    }

    #[inline] pub fn segments(&self) -> &[Segment] { &self.segments }

    #[inline] pub fn len(&self) -> usize { self.segments.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.segments.is_empty() }

    #[inline] pub fn is_full(&self) -> bool { self.segments.len() >= MAX_POINTS }

    /// Whether the segment would pass through a cell this node already covers.
    #[inline] fn overlaps(&self, segment: &Segment) -> bool { self.grid.test(segment) }

    fn push(&mut self, segment: Segment) {
        self.grid.mark(&segment);
        if self.segments.len() == self.segments.capacity() {
            self.segments.reserve_exact(self.segments.capacity().max(1));
        }
        self.segments.push(segment);
    }
}

/// Metadata-bucketed store of line segments.
///
/// Each bucket owns a chain of nodes; a segment goes to the first node in the chain that
/// has room and whose grid it does not overlap. Overlap is only checked against the node
/// being scanned, so the same line can still appear in two nodes of one bucket.
#[derive(Debug, Clone, Default)]
pub struct SegmentStore {
    buckets: BucketDirectory<Chain<SegmentNode>>,
}

impl SegmentStore {
    pub fn new() -> Self { Self::default() }

    /// Insert a segment under `meta`, returning the index of the chain node that accepted it,
    /// or `None` if it was dropped for being zero-length.
    pub fn insert(&mut self, meta: i64, segment: Segment) -> Option<usize> {
        if segment.is_degenerate() { return None }

        let chain = self.buckets.get_or_insert_with(meta, || Chain::new(SegmentNode::new()));

        let mut id = 0;
        loop {
            let node = chain.node(id);
            if !node.is_full() && !node.overlaps(&segment) { break }
            if !node.is_full() {
                log::trace!("[store::segments] meta {} node {} already covers {:?}", meta, id, segment);
            }
            id = chain.successor(id, SegmentNode::new);
        }

        chain.node_mut(id).push(segment);
        Some(id)
    }

    /// Number of buckets.
    #[inline] pub fn num_buckets(&self) -> usize { self.buckets.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.buckets.is_empty() }

    /// Total number of stored segments.
    pub fn num_segments(&self) -> usize {
        self.buckets.iter().flat_map(|(_, chain)| chain.iter()).map(SegmentNode::len).sum()
    }

    /// Chain nodes of the bucket for `meta`, in chain order.
    pub fn nodes(&self, meta: i64) -> Option<impl Iterator<Item = &SegmentNode> + '_> {
        self.buckets.get(meta).map(|chain| chain.iter())
    }

    /// Iterator over (meta, chain nodes) in first-seen order.
    pub fn buckets(&self) -> impl Iterator<Item = (i64, impl Iterator<Item = &SegmentNode> + '_)> + '_ {
        self.buckets.iter().map(|(meta, chain)| (meta, chain.iter()))
    }
}
