//! Static obstacle grid
//!
//! Rows may have different lengths; cells past the end of a short row are
//! empty. The grid never changes after construction.

use serde::{Deserialize, Serialize};

use super::collision::{CellSpan, ObstacleMap};
use super::vector::Vector;

/// Static cell classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Obstacle {
    /// Impassable, no effect on status
    Wall,
    /// Touching it loses the level
    Lava,
}

impl Obstacle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Obstacle::Wall => "wall",
            Obstacle::Lava => "lava",
        }
    }
}

/// Immutable tile grid, indexed `[y][x]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Option<Obstacle>>>,
    width: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Option<Obstacle>>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Longest row length
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Option<Obstacle>>] {
        &self.rows
    }

    /// Cell at `(x, y)`, empty when outside the row
    pub fn cell(&self, x: usize, y: usize) -> Option<Obstacle> {
        self.rows.get(y).and_then(|row| row.get(x)).copied().flatten()
    }
}

impl ObstacleMap for Grid {
    /// Sides and top of the field behave as walls, below the field is lava.
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        let span = CellSpan::covering(pos, size);

        if span.left < 0 || span.right > self.width as i64 || span.top < 0 {
            return Some(Obstacle::Wall);
        }
        if span.bottom > self.height() as i64 {
            return Some(Obstacle::Lava);
        }

        span.cells().find_map(|(x, y)| self.cell(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        // "  x"
        // "x! "
        Grid::new(vec![
            vec![None, None, Some(Obstacle::Wall)],
            vec![Some(Obstacle::Wall), Some(Obstacle::Lava), None],
        ])
    }

    #[test]
    fn test_dimensions() {
        let grid = Grid::new(vec![vec![None], vec![None, None, None], vec![]]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);

        let empty = Grid::default();
        assert_eq!(empty.width(), 0);
        assert_eq!(empty.height(), 0);
    }

    #[test]
    fn test_out_of_bounds_sides_and_top_are_walls() {
        let grid = sample();
        assert_eq!(grid.obstacle_at(Vector::new(-1.0, 0.0), Vector::ONE), Some(Obstacle::Wall));
        assert_eq!(grid.obstacle_at(Vector::new(2.5, 0.0), Vector::ONE), Some(Obstacle::Wall));
        assert_eq!(grid.obstacle_at(Vector::new(0.0, -0.5), Vector::ONE), Some(Obstacle::Wall));
    }

    #[test]
    fn test_below_field_is_lava() {
        let grid = sample();
        assert_eq!(grid.obstacle_at(Vector::new(0.0, 1.5), Vector::ONE), Some(Obstacle::Lava));
    }

    #[test]
    fn test_empty_cell_is_clear() {
        let grid = sample();
        assert_eq!(grid.obstacle_at(Vector::new(0.0, 0.0), Vector::ONE), None);
        assert_eq!(grid.obstacle_at(Vector::new(2.0, 1.0), Vector::ONE), None);
    }

    #[test]
    fn test_scan_is_row_major() {
        let grid = sample();
        // Covers (1,0) empty, (2,0) wall, (1,1) lava, (2,1) empty; row 0 wins
        assert_eq!(grid.obstacle_at(Vector::new(1.5, 0.5), Vector::ONE), Some(Obstacle::Wall));
        // Covers (0,0) empty, (1,0) empty, (0,1) wall, (1,1) lava
        assert_eq!(grid.obstacle_at(Vector::new(0.5, 0.5), Vector::ONE), Some(Obstacle::Wall));
        assert_eq!(grid.obstacle_at(Vector::new(1.0, 0.5), Vector::new(0.5, 1.0)), Some(Obstacle::Lava));
    }

    #[test]
    fn test_jagged_rows_treat_missing_cells_as_empty() {
        let grid = Grid::new(vec![vec![None, None, None], vec![None]]);
        assert_eq!(grid.cell(2, 1), None);
        assert_eq!(grid.obstacle_at(Vector::new(2.0, 1.0), Vector::ONE), None);
    }
}
