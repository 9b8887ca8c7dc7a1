//! The `GridStore` / `GridHandle` trait pair.

use std::path::Path;

use loam_core::Grid;

use crate::error::DatasetError;

/// Opens named datasets for read-write access.
///
/// Implementations wrap a concrete dataset driver. Generic over nothing
/// and object-safe so the editing core can hold a `&dyn GridStore`.
pub trait GridStore {
    /// Open the dataset at `path` for read-write.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Open`] when the file is absent or the
    /// driver refuses it.
    fn open(&self, path: &Path) -> Result<Box<dyn GridHandle>, DatasetError>;
}

/// An open read-write handle on one dataset's categorical grid.
///
/// The bulk propagation engine guarantees at most one writable handle is
/// open at a time; implementations need no cross-handle locking.
pub trait GridHandle {
    /// Read the full categorical grid into memory.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Read`] or
    /// [`DatasetError::MissingVariable`] on driver failure.
    fn read(&mut self) -> Result<Grid, DatasetError>;

    /// Replace the stored grid with `grid`.
    ///
    /// Writes may be buffered until [`sync`](Self::sync).
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Write`] on driver failure.
    fn write(&mut self, grid: &Grid) -> Result<(), DatasetError>;

    /// The raw text of the legend attribute attached to the grid variable.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::MissingAttribute`] when the dataset
    /// carries no legend.
    fn legend_text(&self) -> Result<String, DatasetError>;

    /// Flush buffered writes to storage.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Sync`] on driver failure.
    fn sync(&mut self) -> Result<(), DatasetError>;

    /// Sync and release the handle.
    ///
    /// # Errors
    ///
    /// Returns the first error from the final flush.
    fn close(self: Box<Self>) -> Result<(), DatasetError>;
}
