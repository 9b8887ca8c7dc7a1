//! Error types for the setup pipeline.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Errors from the workflow state store.
#[derive(Debug)]
pub enum StateError {
    /// No checkpoint record exists: a "continue" was requested without a
    /// prior "begin" phase, or the resumed phase already completed.
    NoPausedRun {
        /// Where the record was looked for.
        path: PathBuf,
    },
    /// The record could not be read or written.
    Io {
        /// The record path.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },
    /// The record exists but does not deserialize.
    Malformed {
        /// The record path.
        path: PathBuf,
        /// Deserialization failure.
        reason: String,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPausedRun { path } => {
                write!(
                    f,
                    "no paused run found ({}); run the initial setup phase first",
                    path.display()
                )
            }
            Self::Io { path, reason } => {
                write!(f, "state file {}: {reason}", path.display())
            }
            Self::Malformed { path, reason } => {
                write!(f, "state file {} is malformed: {reason}", path.display())
            }
        }
    }
}

impl Error for StateError {}

/// Errors from pipeline orchestration.
#[derive(Debug)]
pub enum PipelineError {
    /// A state-store operation failed.
    State(StateError),
    /// A filesystem operation failed.
    Io {
        /// The path involved.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },
    /// An external command failed to spawn or exited non-zero.
    CommandFailed {
        /// The program that failed.
        program: String,
        /// Spawn error or exit status.
        detail: String,
    },
    /// The base configuration file does not exist.
    BaseMissing {
        /// The path given.
        path: PathBuf,
    },
    /// The base configuration carries no `domname` assignment.
    MissingDomname {
        /// The base configuration path.
        path: PathBuf,
    },
    /// No generated job scripts were found to submit.
    NoJobScripts {
        /// The directory searched.
        dir: PathBuf,
    },
    /// No numbered member output directories were found to analyze.
    NoMemberOutputs {
        /// The directory searched.
        dir: PathBuf,
    },
    /// Member 1's output directory holds no surface files.
    NoSurfaceFiles {
        /// The directory searched.
        dir: PathBuf,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(e) => write!(f, "{e}"),
            Self::Io { path, reason } => write!(f, "{}: {reason}", path.display()),
            Self::CommandFailed { program, detail } => {
                write!(f, "'{program}' failed: {detail}")
            }
            Self::BaseMissing { path } => {
                write!(f, "base configuration not found: {}", path.display())
            }
            Self::MissingDomname { path } => {
                write!(f, "no domname found in {}", path.display())
            }
            Self::NoJobScripts { dir } => {
                write!(f, "no *submit.sbatch files found in {}", dir.display())
            }
            Self::NoMemberOutputs { dir } => {
                write!(
                    f,
                    "no member output directories found in {} (expected 1output/, 2output/, ...)",
                    dir.display()
                )
            }
            Self::NoSurfaceFiles { dir } => {
                write!(f, "no *_SRF.*.nc files found in {}", dir.display())
            }
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::State(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StateError> for PipelineError {
    fn from(e: StateError) -> Self {
        Self::State(e)
    }
}
