//! The durable pipeline checkpoint.
//!
//! Between the terrain pass and the resumed sst/icbc pass the pipeline
//! is paused, possibly for days, while the operator edits land-surface
//! data. The checkpoint is a small JSON record under a hidden fixed
//! filename in the working directory; its presence is the sole signal
//! that a run is mid-flight.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StateError;

/// Hidden fixed filename of the checkpoint record.
pub const STATE_FILE: &str = ".ensemble_state.json";

/// Everything the resumed phase needs to know about the paused run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Basename of the base configuration file.
    pub base_name: String,
    /// Number of ensemble members.
    pub count: u32,
    /// Domain identifier of the base configuration.
    pub base_domname: String,
}

/// Persists the checkpoint in one working directory.
///
/// The record is never mutated in place: each phase transition is
/// save, later load, then delete.
#[derive(Clone, Debug)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// A store rooted at the pipeline working directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the checkpoint record.
    pub fn path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    /// Whether a checkpoint record currently exists.
    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Persist the checkpoint.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Io`] on write failure.
    pub fn save(&self, state: &WorkflowState) -> Result<(), StateError> {
        let path = self.path();
        // Serializing a plain struct of strings and a counter cannot
        // fail; any error here is an I/O condition in disguise.
        let body = serde_json::to_string(state).map_err(|e| StateError::Io {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&path, body).map_err(|e| StateError::Io {
            path,
            reason: e.to_string(),
        })
    }

    /// Read the checkpoint back.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NoPausedRun`] when no record exists (the
    /// signal a "continue" action uses to refuse resuming) or
    /// [`StateError::Malformed`] when the record does not deserialize.
    pub fn load(&self) -> Result<WorkflowState, StateError> {
        let path = self.path();
        let body = match fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StateError::NoPausedRun { path });
            }
            Err(e) => {
                return Err(StateError::Io {
                    path,
                    reason: e.to_string(),
                });
            }
        };
        serde_json::from_str(&body).map_err(|e| StateError::Malformed {
            path,
            reason: e.to_string(),
        })
    }

    /// Delete the checkpoint after a successful resumed phase.
    ///
    /// Deleting an already-absent record is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Io`] on removal failure.
    pub fn clear(&self) -> Result<(), StateError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StateError::Io {
                path,
                reason: e.to_string(),
            }),
        }
    }
}

impl AsRef<Path> for StateStore {
    fn as_ref(&self) -> &Path {
        &self.dir
    }
}
