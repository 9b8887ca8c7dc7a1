//! Ensemble member discovery.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::member::EnsembleMember;

/// The ensemble members found in a working directory, sorted by ordinal.
///
/// Only `*.in` files whose basename starts with a decimal digit are
/// considered: that is how ensemble-generated configurations are told
/// apart from a single-run configuration living alongside them.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    members: Vec<EnsembleMember>,
}

impl Registry {
    /// Scan `dir` for numbered member configurations.
    ///
    /// Configurations that fail to parse are skipped silently; the scan
    /// itself only fails when the directory cannot be listed.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error from listing `dir`.
    pub fn scan(dir: &Path) -> io::Result<Self> {
        let mut members: Vec<EnsembleMember> = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "in") {
                continue;
            }
            if let Some(member) = EnsembleMember::from_config(&path) {
                members.push(member);
            }
        }
        members.sort_by(|a, b| {
            a.ordinal
                .cmp(&b.ordinal)
                .then_with(|| a.config_path.cmp(&b.config_path))
        });
        debug!(dir = %dir.display(), members = members.len(), "registry scan complete");
        Ok(Self { members })
    }

    /// The discovered members, sorted by ordinal.
    pub fn members(&self) -> &[EnsembleMember] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the scan found no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The gate for bulk operations: at least one member was found and
    /// every member's dataset exists.
    pub fn all_valid(&self) -> bool {
        !self.members.is_empty() && self.members.iter().all(|m| m.dataset_exists)
    }

    /// Dataset paths that were absent at scan time.
    pub fn missing(&self) -> Vec<PathBuf> {
        self.members
            .iter()
            .filter(|m| !m.dataset_exists)
            .map(|m| m.dataset_path.clone())
            .collect()
    }
}
