use serde::{Deserialize, Serialize};

use super::Surface;

/// A single draw call in device pixels, as read from a draw-call stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum DrawCall {
    Line { x0: f64, y0: f64, x1: f64, y1: f64, meta: i64 },
    Pixel { x: f64, y: f64, meta: i64 },
    Brush { x: f64, y: f64, meta: i64 },
}

impl DrawCall {
    /// Metadata identifier the call is tagged with.
    pub fn meta(&self) -> i64 {
        match *self {
            DrawCall::Line { meta, .. } | DrawCall::Pixel { meta, .. } | DrawCall::Brush { meta, .. } => meta,
        }
    }

    /// Replay the call onto a surface.
    pub fn apply(&self, surface: &mut Surface) {
        match *self {
            DrawCall::Line { x0, y0, x1, y1, meta } => { surface.draw_clip(x0, y0, x1, y1, meta); }
            DrawCall::Pixel { x, y, meta } => surface.draw_pixel(x, y, meta),
            DrawCall::Brush { x, y, meta } => surface.draw_brush(x, y, meta),
        }
    }
}
