use crate::tile::{CELL_SIZE, GRID_SIZE};

use super::Segment;

/// Bresenham walk between two cells, yielding every visited cell except the final one.
///
/// Leaving the end cell out lets a polyline's next segment start where this one ended
/// without colliding with it.
#[derive(Debug, Clone)]
struct CellWalk {
    x: i32,
    y: i32,
    x1: i32,
    y1: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
}

impl CellWalk {
    fn new((x0, y0): (i32, i32), (x1, y1): (i32, i32)) -> Self {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        Self {
            x: x0, y: y0, x1, y1, dx, dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: (if dx > dy { dx } else { -dy }) / 2,
        }
    }
}

impl Iterator for CellWalk {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x == self.x1 && self.y == self.y1 { return None }

        let cell = (self.x, self.y);
        let e2 = self.err;
        if e2 > -self.dx {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dy {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(cell)
    }
}

/// Down-sample a tile coordinate to its grid cell (may fall outside the grid).
#[inline]
pub(super) fn cell_of(x: i32, y: i32) -> (i32, i32) {
    (x.div_euclid(CELL_SIZE), y.div_euclid(CELL_SIZE))
}

/// Row-major grid index, or `None` if the cell is off the grid.
#[inline]
pub(super) fn grid_index((x, y): (i32, i32)) -> Option<usize> {
    let size = GRID_SIZE as i32;
    ((0..size).contains(&x) && (0..size).contains(&y)).then(|| y as usize * GRID_SIZE + x as usize)
}

/// Per-node presence bitmap over the 256×256 cell grid.
///
/// Answers "has a stored line already passed through here" at cell granularity: two distinct
/// lines through the same cell count as overlapping. Off-grid cells are never marked or tested.
#[derive(Debug, Clone)]
pub(crate) struct OccupancyGrid {
    used: Box<[bool]>, // used[y * GRID_SIZE + x]
}

impl OccupancyGrid {
    pub(crate) fn new() -> Self {
        Self { used: vec![false; GRID_SIZE * GRID_SIZE].into_boxed_slice() }
    }

    fn cells(segment: &Segment) -> impl Iterator<Item = usize> {
        CellWalk::new(cell_of(segment.x0, segment.y0), cell_of(segment.x1, segment.y1))
            .filter_map(grid_index)
    }

    /// Mark every in-grid cell the segment passes through.
    pub(crate) fn mark(&mut self, segment: &Segment) {
        for idx in Self::cells(segment) { self.used[idx] = true }
    }

    /// Returns true if any in-grid cell the segment passes through is already marked.
    pub(crate) fn test(&self, segment: &Segment) -> bool {
        Self::cells(segment).any(|idx| self.used[idx])
    }

    /// Number of marked cells.
    #[cfg(test)]
    pub(crate) fn count(&self) -> usize { self.used.iter().filter(|&&u| u).count() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x0: i32, y0: i32, x1: i32, y1: i32) -> Segment { Segment { x0, y0, x1, y1 } }

    #[test]
    fn walk_excludes_end_cell() {
        let cells: Vec<_> = CellWalk::new((0, 0), (3, 0)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0)]);
        assert_eq!(CellWalk::new((5, 5), (5, 5)).count(), 0);
    }

    #[test]
    fn walk_diagonal_and_reverse() {
        let cells: Vec<_> = CellWalk::new((3, 3), (0, 0)).collect();
        assert_eq!(cells, vec![(3, 3), (2, 2), (1, 1)]);
        let steep: Vec<_> = CellWalk::new((0, 0), (1, 4)).collect();
        assert_eq!(steep.len(), 4);
        assert!(steep.iter().all(|&(x, _)| x == 0 || x == 1));
    }

    #[test]
    fn cell_of_floors_negatives() {
        assert_eq!(cell_of(0, 15), (0, 0));
        assert_eq!(cell_of(16, 4095), (1, 255));
        assert_eq!(cell_of(-1, 4096), (-1, 256));
        assert_eq!(grid_index((-1, 0)), None);
        assert_eq!(grid_index((0, 256)), None);
        assert_eq!(grid_index((255, 1)), Some(511));
    }

    #[test]
    fn mark_then_test() {
        let mut grid = OccupancyGrid::new();
        let a = seg(0, 0, 64, 0);
        assert!(!grid.test(&a));
        grid.mark(&a);
        assert_eq!(grid.count(), 4);
        assert!(grid.test(&a));
        // subset of a's cells
        assert!(grid.test(&seg(16, 0, 48, 0)));
        // continues from a's end cell
        assert!(!grid.test(&seg(64, 0, 128, 0)));
        // elsewhere
        assert!(!grid.test(&seg(0, 32, 64, 32)));
    }

    #[test]
    fn test_does_not_mark() {
        let grid = OccupancyGrid::new();
        assert!(!grid.test(&seg(0, 0, 4000, 4000)));
        assert_eq!(grid.count(), 0);
    }

    #[test]
    fn off_grid_cells_are_skipped() {
        let mut grid = OccupancyGrid::new();
        let outside = seg(-160, -160, -16, -16);
        grid.mark(&outside);
        assert_eq!(grid.count(), 0);
        assert!(!grid.test(&outside));

        // crosses into the grid: only the in-grid part is marked
        grid.mark(&seg(-32, 0, 32, 0));
        assert_eq!(grid.count(), 2);
        assert!(grid.test(&seg(0, 0, 16, 0)));
    }

    #[test]
    fn same_cell_segment_visits_nothing() {
        let mut grid = OccupancyGrid::new();
        grid.mark(&seg(1, 1, 10, 10));
        assert_eq!(grid.count(), 0);
    }
}
