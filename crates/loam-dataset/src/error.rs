//! Error type for dataset access.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Errors surfaced by [`GridStore`](crate::GridStore) and
/// [`GridHandle`](crate::GridHandle) implementations.
///
/// During bulk propagation these are recovered per member; for a
/// single-member save they are fatal to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetError {
    /// The dataset could not be opened for read-write.
    Open {
        /// Path of the dataset.
        path: PathBuf,
        /// Driver-reported reason.
        reason: String,
    },
    /// The grid variable could not be read.
    Read {
        /// Path of the dataset.
        path: PathBuf,
        /// Driver-reported reason.
        reason: String,
    },
    /// The grid variable could not be written.
    Write {
        /// Path of the dataset.
        path: PathBuf,
        /// Driver-reported reason.
        reason: String,
    },
    /// Flushing buffered writes to storage failed.
    Sync {
        /// Path of the dataset.
        path: PathBuf,
        /// Driver-reported reason.
        reason: String,
    },
    /// The dataset has no categorical grid variable of the expected name.
    MissingVariable {
        /// Path of the dataset.
        path: PathBuf,
        /// The variable name looked for.
        name: String,
    },
    /// The grid variable has no textual legend attribute.
    MissingAttribute {
        /// Path of the dataset.
        path: PathBuf,
        /// The attribute name looked for.
        name: String,
    },
}

impl DatasetError {
    /// The dataset path the error concerns.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Open { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Sync { path, .. }
            | Self::MissingVariable { path, .. }
            | Self::MissingAttribute { path, .. } => path,
        }
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, reason } => {
                write!(f, "could not open {}: {reason}", path.display())
            }
            Self::Read { path, reason } => {
                write!(f, "could not read grid from {}: {reason}", path.display())
            }
            Self::Write { path, reason } => {
                write!(f, "could not write grid to {}: {reason}", path.display())
            }
            Self::Sync { path, reason } => {
                write!(f, "could not sync {}: {reason}", path.display())
            }
            Self::MissingVariable { path, name } => {
                write!(f, "{} has no variable '{name}'", path.display())
            }
            Self::MissingAttribute { path, name } => {
                write!(f, "{} has no attribute '{name}'", path.display())
            }
        }
    }
}

impl Error for DatasetError {}
