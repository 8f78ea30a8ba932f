use crate::tile::{GRID_SIZE, MAX_POINTS};

use super::grid::cell_of;
use super::segments::INITIAL_CAPACITY;
use super::{BucketDirectory, Chain, Point};

/// One capacity-bounded run of a bucket's points.
#[derive(Debug, Clone)]
pub struct PointNode {
    points: Vec<Point>,
}

impl PointNode {
    fn new() -> Self { Self { points: Vec::with_capacity(INITIAL_CAPACITY) } }

    #[inline] pub fn points(&self) -> &[Point] { &self.points }

    #[inline] pub fn len(&self) -> usize { self.points.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.points.is_empty() }

    #[inline] pub fn is_full(&self) -> bool { self.points.len() >= MAX_POINTS }

    fn push(&mut self, point: Point) {
        if self.points.len() == self.points.capacity() {
            self.points.reserve_exact(self.points.capacity().max(1));
        }
        self.points.push(point);
    }
}

/// A point bucket: its chain plus a cell → node routing table.
///
/// `cells` only caches where insertion for each cell last landed so the chain is not
/// rescanned from the head; it can be rebuilt from the chain and is never serialized.
#[derive(Debug, Clone)]
struct PointBucket {
    chain: Chain<PointNode>,
    cells: Box<[usize]>, // cells[yu * GRID_SIZE + xu] = node id accepting that cell
}

impl PointBucket {
    fn new() -> Self {
        Self {
            chain: Chain::new(PointNode::new()),
            cells: vec![0; GRID_SIZE * GRID_SIZE].into_boxed_slice(),
        }
    }
}

/// Grid cell of a point, clamped onto the grid.
///
/// Cells are always `floor(tile / 16)`, independent of the surface width the point came from.
#[inline]
fn clamped_cell(point: Point) -> usize {
    let (xu, yu) = cell_of(point.x, point.y);
    let max = GRID_SIZE as i32 - 1;
    yu.clamp(0, max) as usize * GRID_SIZE + xu.clamp(0, max) as usize
}

/// Metadata-bucketed store of points. No deduplication is applied.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    buckets: BucketDirectory<PointBucket>,
}

impl PointStore {
    pub fn new() -> Self { Self::default() }

    /// Insert a point under `meta`, returning the index of the chain node that accepted it.
    pub fn insert(&mut self, meta: i64, point: Point) -> usize {
        let bucket = self.buckets.get_or_insert_with(meta, PointBucket::new);
        let cell = clamped_cell(point);

        let mut id = bucket.cells[cell];
        while bucket.chain.node(id).is_full() {
            id = bucket.chain.successor(id, PointNode::new);
        }
        bucket.cells[cell] = id;

        // keep one node of lookahead past the accepting node
        bucket.chain.successor(id, PointNode::new);
        bucket.chain.node_mut(id).push(point);
        id
    }

    /// Number of buckets.
    #[inline] pub fn num_buckets(&self) -> usize { self.buckets.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.buckets.is_empty() }

    /// Total number of stored points.
    pub fn num_points(&self) -> usize {
        self.buckets.iter().flat_map(|(_, b)| b.chain.iter()).map(PointNode::len).sum()
    }

    /// Chain nodes of the bucket for `meta`, in chain order (including empty lookahead nodes).
    pub fn nodes(&self, meta: i64) -> Option<impl Iterator<Item = &PointNode> + '_> {
        self.buckets.get(meta).map(|bucket| bucket.chain.iter())
    }

    /// Iterator over (meta, chain nodes) in first-seen order.
    pub fn buckets(&self) -> impl Iterator<Item = (i64, impl Iterator<Item = &PointNode> + '_)> + '_ {
        self.buckets.iter().map(|(meta, bucket)| (meta, bucket.chain.iter()))
    }
}
