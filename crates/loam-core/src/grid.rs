//! Row-major 2-D categorical grid storage.

use crate::error::GridError;

/// A 2-D grid of integer category codes, stored row-major.
///
/// Addressed by `(row, col)` with row = y and col = x, matching the
/// coordinate convention of the domain dataset. The grid is owned
/// exclusively by the session that loaded it, mutated in place, and
/// flushed back to its backing dataset on save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl Grid {
    /// Create a grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: i32) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    /// Create a grid from an existing row-major cell buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] when `cells.len() != rows * cols`.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<i32>) -> Result<Self, GridError> {
        if cells.len() != rows * cols {
            return Err(GridError::ShapeMismatch {
                rows,
                cols,
                len: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Number of rows (the y extent).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (the x extent).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Read the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Set the cell at `(row, col)` to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when the address lies outside
    /// the grid.
    pub fn set(&mut self, row: usize, col: usize, value: i32) -> Result<(), GridError> {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = value;
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// The row-major cell buffer.
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Mutable access to the row-major cell buffer.
    ///
    /// Used by the perturbation kernel for direct index arithmetic.
    pub fn cells_mut(&mut self) -> &mut [i32] {
        &mut self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_has_uniform_cells() {
        let g = Grid::filled(3, 4, 7);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.cell_count(), 12);
        assert!(g.cells().iter().all(|&v| v == 7));
    }

    #[test]
    fn from_cells_rejects_shape_mismatch() {
        let err = Grid::from_cells(2, 2, vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            GridError::ShapeMismatch {
                rows: 2,
                cols: 2,
                len: 3
            }
        );
    }

    #[test]
    fn get_set_roundtrip() {
        let mut g = Grid::filled(2, 3, 0);
        g.set(1, 2, 9).unwrap();
        assert_eq!(g.get(1, 2), Some(9));
        assert_eq!(g.get(2, 0), None);
        assert!(g.set(0, 3, 1).is_err());
    }

    #[test]
    fn cells_are_row_major() {
        let g = Grid::from_cells(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(g.get(0, 1), Some(2));
        assert_eq!(g.get(1, 0), Some(3));
    }
}
