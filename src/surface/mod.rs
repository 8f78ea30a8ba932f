mod call;
mod clip;

pub use call::DrawCall;
pub use clip::{clip_segment, ClipRect};

use std::io::Write;

use anyhow::Result;
use flate2::Compression;

use crate::encode::assemble_tile;
use crate::io::{compress, write_tile};
use crate::store::{Point, PointStore, Segment, SegmentStore};
use crate::tile::{Tile, EXTENT};

/// Drawing surface configuration.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceOptions {
    /// Device width in pixels; sets the device → tile scale. Height plays no part in encoding.
    pub width: u32,
    /// Deflate level for the output stage.
    pub compression: Compression,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self { width: 256, compression: Compression::default() }
    }
}

/// One tile build: accepts device-pixel draw calls and accumulates them into the
/// segment and point stores until [`finish`](Surface::finish).
#[derive(Debug, Clone)]
pub struct Surface {
    options: SurfaceOptions,
    segments: SegmentStore,
    points: PointStore,
}

impl Surface {
    pub fn new(options: SurfaceOptions) -> Self {
        Self { options, segments: SegmentStore::new(), points: PointStore::new() }
    }

    #[inline] pub fn options(&self) -> &SurfaceOptions { &self.options }

    #[inline] pub fn segments(&self) -> &SegmentStore { &self.segments }

    #[inline] pub fn points(&self) -> &PointStore { &self.points }

    /// Tile units per device pixel (integer quotient, at least 1).
    #[inline]
    pub fn scale(&self) -> u32 { (EXTENT / self.options.width.max(1)).max(1) }

    /// Device-space square segments are clipped to: the tile extent plus one pixel each side.
    pub fn clip_rect(&self) -> ClipRect {
        let max = f64::from(EXTENT / self.scale()) + 1.0;
        ClipRect::new(-1.0, -1.0, max, max)
    }

    /// Clip a device-space line and store it under `meta`.
    /// Returns false if it was clipped away or was zero-length in tile units.
    pub fn draw_clip(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, meta: i64) -> bool {
        let Some(((x0, y0), (x1, y1))) = clip_segment((x0, y0), (x1, y1), &self.clip_rect()) else {
            return false;
        };
        let mult = f64::from(self.scale());
        let segment = Segment::new(
            (x0 * mult) as i32, (y0 * mult) as i32,
            (x1 * mult) as i32, (y1 * mult) as i32,
        );
        self.segments.insert(meta, segment).is_some()
    }

    /// Store the pixel whose top-left corner is at `(x, y)` under `meta`.
    pub fn draw_pixel(&mut self, x: f64, y: f64, meta: i64) {
        let mult = f64::from(self.scale());
        let point = Point::new(((x + 0.5) * mult) as i32, ((y + 0.5) * mult) as i32);
        self.points.insert(meta, point);
    }

    /// Brush strokes are stored as single pixels centred on `(x, y)`; the brush size is not kept.
    pub fn draw_brush(&mut self, x: f64, y: f64, meta: i64) {
        self.draw_pixel(x - 0.5, y - 0.5, meta);
    }

    /// Clip regions have no effect on tile output.
    pub fn set_clip(&mut self, _x: i32, _y: i32, _width: i32, _height: i32) {}

    /// Assemble the current stores into a tile.
    pub fn tile(&self) -> Tile { assemble_tile(&self.segments, &self.points) }

    /// Serialize and compress the current stores.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let raw = self.tile().to_bytes();
        compress(&raw, self.options.compression)
    }

    /// Encode and write the tile to `sink`, ending the build.
    /// Nothing is written if compression fails.
    pub fn finish<W: Write>(self, sink: &mut W) -> Result<()> {
        let compressed = self.encode()?;
        log::info!(
            "[surface] {} segments and {} points encoded into {} bytes",
            self.segments.num_segments(), self.points.num_points(), compressed.len(),
        );
        write_tile(sink, &compressed)
    }
}
