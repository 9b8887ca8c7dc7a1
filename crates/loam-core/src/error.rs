//! Error types for the core Loam abstractions.
//!
//! Hand-written enums with `Display` and `Error` impls, organized by
//! subsystem: grid storage, legend parsing, and change-spec handling.

use std::error::Error;
use std::fmt;

/// Errors from [`Grid`](crate::Grid) construction and cell access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The supplied cell buffer does not match `rows * cols`.
    ShapeMismatch {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
        /// Actual buffer length.
        len: usize,
    },
    /// A cell address lies outside the grid.
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        cols: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { rows, cols, len } => {
                write!(f, "cell buffer length {len} does not match {rows}x{cols} grid")
            }
            Self::OutOfBounds {
                row,
                col,
                rows,
                cols,
            } => {
                write!(f, "cell ({row}, {col}) out of bounds for {rows}x{cols} grid")
            }
        }
    }
}

impl Error for GridError {}

/// Errors from [`Legend`](crate::Legend) parsing.
///
/// Malformed individual lines are skipped rather than reported; the only
/// fatal condition is a legend with no usable entries at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LegendError {
    /// No `<code> => <name>` line could be parsed from the attribute text.
    Empty,
}

impl fmt::Display for LegendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no legend entries could be parsed"),
        }
    }
}

impl Error for LegendError {}

/// Errors from [`ChangeSpec`](crate::ChangeSpec) parsing and validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeError {
    /// The textual form is not six comma-separated numeric fields.
    Malformed {
        /// The offending input.
        input: String,
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The percentage lies outside `[0, 100]` (or is not finite).
    PercentOutOfRange {
        /// The offending percentage.
        percent: f64,
    },
    /// The target category code is not present in the legend.
    UnknownCategory {
        /// The offending category code.
        category: i32,
    },
}

impl fmt::Display for ChangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { input, detail } => {
                write!(f, "malformed change spec '{input}': {detail}")
            }
            Self::PercentOutOfRange { percent } => {
                write!(f, "percent {percent} must be between 0 and 100")
            }
            Self::UnknownCategory { category } => {
                write!(f, "category {category} is not in the legend")
            }
        }
    }
}

impl Error for ChangeError {}
