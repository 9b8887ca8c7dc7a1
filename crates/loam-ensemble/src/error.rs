//! Error types for ensemble discovery, sessions, and propagation.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use loam_core::{ChangeError, LegendError};
use loam_dataset::DatasetError;

/// Errors from configuration discovery and parsing.
///
/// These are fatal: without a usable configuration there is no dataset
/// to edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Unreadable {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },
    /// The configuration carries no `domname` assignment.
    MissingDomname {
        /// Path of the configuration file.
        path: PathBuf,
    },
    /// No `*.in` file was found in the directory.
    NotFound {
        /// The directory searched.
        dir: PathBuf,
    },
    /// Several `*.in` files were found; the caller must name one.
    Ambiguous {
        /// The candidate configuration files, sorted.
        candidates: Vec<PathBuf>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { path, reason } => {
                write!(f, "could not read {}: {reason}", path.display())
            }
            Self::MissingDomname { path } => {
                write!(f, "no domname found in {}", path.display())
            }
            Self::NotFound { dir } => {
                write!(f, "no .in configuration file found in {}", dir.display())
            }
            Self::Ambiguous { candidates } => {
                write!(
                    f,
                    "multiple .in configuration files found ({}); specify one",
                    candidates.len()
                )
            }
        }
    }
}

impl Error for ConfigError {}

/// Reasons a bulk operation is refused before touching any dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropagateError {
    /// The registry scan found no ensemble members.
    NoMembers,
    /// One or more members' backing datasets are absent.
    MissingDatasets {
        /// The absent dataset paths.
        paths: Vec<PathBuf>,
    },
    /// No bulk entries have been staged.
    NothingStaged,
}

impl fmt::Display for PropagateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMembers => write!(f, "no ensemble members detected"),
            Self::MissingDatasets { paths } => {
                write!(f, "missing domain dataset(s):")?;
                for path in paths {
                    write!(f, " {}", path.display())?;
                }
                Ok(())
            }
            Self::NothingStaged => write!(f, "no bulk changes staged"),
        }
    }
}

impl Error for PropagateError {}

/// Errors from an editing session.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionError {
    /// The session's configuration could not be resolved.
    Config(ConfigError),
    /// The session's own dataset failed to open, read, write, or sync.
    ///
    /// Unlike per-member propagation failures, this is fatal for the
    /// session.
    Dataset(DatasetError),
    /// The dataset's legend attribute yielded no categories.
    Legend(LegendError),
    /// A change spec failed validation against the legend.
    Change(ChangeError),
    /// A bulk operation was refused.
    Propagate(PropagateError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Dataset(e) => write!(f, "dataset error: {e}"),
            Self::Legend(e) => write!(f, "legend error: {e}"),
            Self::Change(e) => write!(f, "invalid change: {e}"),
            Self::Propagate(e) => write!(f, "bulk operation refused: {e}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Dataset(e) => Some(e),
            Self::Legend(e) => Some(e),
            Self::Change(e) => Some(e),
            Self::Propagate(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<DatasetError> for SessionError {
    fn from(e: DatasetError) -> Self {
        Self::Dataset(e)
    }
}

impl From<LegendError> for SessionError {
    fn from(e: LegendError) -> Self {
        Self::Legend(e)
    }
}

impl From<ChangeError> for SessionError {
    fn from(e: ChangeError) -> Self {
        Self::Change(e)
    }
}

impl From<PropagateError> for SessionError {
    fn from(e: PropagateError) -> Self {
        Self::Propagate(e)
    }
}
