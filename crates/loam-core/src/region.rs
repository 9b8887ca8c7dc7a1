//! Rectangular selections in grid coordinate space.
//!
//! A [`Region`] is expressed in the x/y convention of the selection
//! layer (x = column, y = row) and is not required to lie inside the
//! grid: a user may legitimately drag a selection past the grid edge.
//! Clamping against the grid bounds happens once, up front, producing a
//! [`ClampedRegion`] that the perturbation kernel iterates.

/// An integer rectangle `(x_min, y_min)..=(x_max, y_max)` in grid
/// coordinate space.
///
/// Coordinates may be negative or exceed the grid extent. A region whose
/// min exceeds its max on either axis clamps to nothing and every
/// operation on it is a no-op; use [`Region::from_corners`] to normalize
/// a free-form drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// Leftmost column.
    pub x_min: i32,
    /// Bottom row.
    pub y_min: i32,
    /// Rightmost column (inclusive).
    pub x_max: i32,
    /// Top row (inclusive).
    pub y_max: i32,
}

impl Region {
    /// Create a region from already-ordered bounds.
    pub fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Create a region from two opposite corners in any order,
    /// normalizing so that min <= max on both axes.
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            x_min: a.0.min(b.0),
            y_min: a.1.min(b.1),
            x_max: a.0.max(b.0),
            y_max: a.1.max(b.1),
        }
    }

    /// Clamp against a `rows` x `cols` grid.
    ///
    /// Returns `None` when nothing of the region lies inside the grid
    /// (including inverted regions and empty grids).
    pub fn clamp(&self, rows: usize, cols: usize) -> Option<ClampedRegion> {
        if rows == 0 || cols == 0 {
            return None;
        }
        let row_min = self.y_min.max(0);
        let row_max = self.y_max.min(rows as i32 - 1);
        let col_min = self.x_min.max(0);
        let col_max = self.x_max.min(cols as i32 - 1);
        if row_min > row_max || col_min > col_max {
            return None;
        }
        Some(ClampedRegion {
            row_min: row_min as usize,
            row_max: row_max as usize,
            col_min: col_min as usize,
            col_max: col_max as usize,
        })
    }
}

/// A region clamped to grid bounds: a non-empty inclusive rectangle of
/// in-bounds `(row, col)` addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClampedRegion {
    row_min: usize,
    row_max: usize,
    col_min: usize,
    col_max: usize,
}

impl ClampedRegion {
    /// Number of rows covered.
    pub fn rows(&self) -> usize {
        self.row_max - self.row_min + 1
    }

    /// Number of columns covered.
    pub fn cols(&self) -> usize {
        self.col_max - self.col_min + 1
    }

    /// Total addressable cell count.
    pub fn cell_count(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Map a flat index in `[0, cell_count())` to its `(row, col)`
    /// address, row-major within the rectangle.
    pub fn locate(&self, flat: usize) -> (usize, usize) {
        debug_assert!(flat < self.cell_count());
        (self.row_min + flat / self.cols(), self.col_min + flat % self.cols())
    }

    /// Iterate every `(row, col)` address in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.cell_count()).map(|flat| self.locate(flat))
    }
}
