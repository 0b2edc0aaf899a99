//! Axis-aligned overlap tests and grid cell spans
//!
//! Everything in the simulation collides as a rectangle: actors against each
//! other (strict overlap, touching edges do not count) and actors against the
//! tile grid (the integer cells a rectangle covers).

use glam::DVec2;

use super::grid::Obstacle;
use super::vector::Vector;

/// Edges of an axis-aligned rectangle, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Bounds of the rectangle at `pos` with extent `size`
    #[inline]
    pub fn of(pos: Vector, size: Vector) -> Self {
        Self {
            left: pos.x,
            top: pos.y,
            right: pos.x + size.x,
            bottom: pos.y + size.y,
        }
    }

    /// Strict overlap: rectangles sharing only an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        !(other.left >= self.right
            || other.right <= self.left
            || other.top >= self.bottom
            || other.bottom <= self.top)
    }
}

/// Half-open range of grid cells `[left, right) x [top, bottom)` covered by a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl CellSpan {
    pub fn covering(pos: Vector, size: Vector) -> Self {
        let min = pos.as_dvec2().floor();
        let max = (pos.as_dvec2() + DVec2::from(size)).ceil();
        Self {
            left: min.x as i64,
            top: min.y as i64,
            right: max.x as i64,
            bottom: max.y as i64,
        }
    }

    /// Cells in row-major order (y outer, x inner). Negative coordinates are skipped.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let xs = self.left.max(0)..self.right.max(0);
        (self.top.max(0)..self.bottom.max(0))
            .flat_map(move |y| xs.clone().map(move |x| (x as usize, y as usize)))
    }
}

/// Anything that can answer "what static obstacle occupies this rectangle"
pub trait ObstacleMap {
    /// `None` means the rectangle is clear
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle>;
}
