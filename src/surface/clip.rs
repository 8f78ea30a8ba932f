/// Axis-aligned clip rectangle, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ClipRect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    fn outcode(&self, x: f64, y: f64) -> u8 {
        let mut code = INSIDE;
        if x < self.min_x { code |= LEFT } else if x > self.max_x { code |= RIGHT }
        if y < self.min_y { code |= TOP } else if y > self.max_y { code |= BOTTOM }
        code
    }
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

/// Cohen–Sutherland clip of a segment, returning the clipped endpoints or `None` if the
/// segment lies entirely outside `rect`.
pub fn clip_segment(
    (mut x0, mut y0): (f64, f64),
    (mut x1, mut y1): (f64, f64),
    rect: &ClipRect,
) -> Option<((f64, f64), (f64, f64))> {
    let mut code0 = rect.outcode(x0, y0);
    let mut code1 = rect.outcode(x1, y1);

    loop {
        if code0 | code1 == INSIDE { return Some(((x0, y0), (x1, y1))) }
        if code0 & code1 != INSIDE { return None }

        let out = if code0 != INSIDE { code0 } else { code1 };
        let (x, y) = if out & BOTTOM != 0 {
            (x0 + (x1 - x0) * (rect.max_y - y0) / (y1 - y0), rect.max_y)
        } else if out & TOP != 0 {
            (x0 + (x1 - x0) * (rect.min_y - y0) / (y1 - y0), rect.min_y)
        } else if out & RIGHT != 0 {
            (rect.max_x, y0 + (y1 - y0) * (rect.max_x - x0) / (x1 - x0))
        } else {
            (rect.min_x, y0 + (y1 - y0) * (rect.min_x - x0) / (x1 - x0))
        };

        if out == code0 {
            (x0, y0) = (x, y);
            code0 = rect.outcode(x0, y0);
        } else {
            (x1, y1) = (x, y);
            code1 = rect.outcode(x1, y1);
        }
    }
}
