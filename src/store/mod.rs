mod chain;
mod directory;
mod grid;
mod points;
mod segments;

pub(crate) use chain::Chain;
pub(crate) use directory::BucketDirectory;
pub use points::{PointNode, PointStore};
pub use segments::{SegmentNode, SegmentStore};

/// Line segment in tile units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Segment {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self { Self { x0, y0, x1, y1 } }

    /// Zero-length segments carry no geometry.
    #[inline] pub fn is_degenerate(&self) -> bool { self.x0 == self.x1 && self.y0 == self.y1 }
}

/// Point in tile units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self { Self { x, y } }
}
