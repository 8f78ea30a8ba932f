#![doc = "linetile public API"]
mod encode;
mod io;
mod store;
mod surface;
mod tile;

#[doc(inline)]
pub use surface::{clip_segment, ClipRect, DrawCall, Surface, SurfaceOptions};

#[doc(inline)]
pub use store::{Point, PointNode, PointStore, Segment, SegmentNode, SegmentStore};

#[doc(inline)]
pub use encode::{assemble_tile, decode_geometry, lines_layer, points_layer, unzigzag, zigzag, Command, GeometryEncoder, CMD_BITS};

#[doc(inline)]
pub use tile::{Feature, GeomType, Layer, Tile, CELL_SIZE, EXTENT, GRID_SIZE, LAYER_VERSION, LINES_LAYER, MAX_POINTS, META_KEY, POINTS_LAYER};

#[doc(inline)]
pub use io::{compress, inflate, write_tile};

#[cfg(feature = "inspect")]
#[doc(inline)]
pub use io::{inspect_tile, FeatureSummary, LayerSummary};

pub use flate2::Compression;
