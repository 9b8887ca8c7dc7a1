//! One discovered ensemble member.

use std::path::{Path, PathBuf};

use crate::config::DomainConfig;

/// An ensemble member discovered by a registry scan.
///
/// Members are ephemeral: rebuilt on every scan, never mutated in
/// between. The existence flag is a point-in-time file-presence check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnsembleMember {
    /// Leading number of the configuration filename (sort key).
    pub ordinal: u32,
    /// The member's configuration file.
    pub config_path: PathBuf,
    /// The member's domain identifier.
    pub domname: String,
    /// Resolved terrain directory.
    pub terrain_dir: PathBuf,
    /// Expected path of the member's domain dataset.
    pub dataset_path: PathBuf,
    /// Whether the dataset was present at scan time.
    pub dataset_exists: bool,
}

impl EnsembleMember {
    /// Build a member from a numbered configuration file.
    ///
    /// Returns `None` when the filename does not start with a decimal
    /// digit (a single-run configuration, not an ensemble member) or
    /// when the configuration cannot be parsed; an unparsable scratch
    /// file is skipped, not reported as a missing member.
    pub fn from_config(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if !name.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        let digits: String = name.chars().take_while(char::is_ascii_digit).collect();
        let ordinal = digits.parse().unwrap_or(0);
        let config = DomainConfig::load(path).ok()?;
        let dataset_path = config.dataset_path();
        let dataset_exists = dataset_path.is_file();
        Some(Self {
            ordinal,
            config_path: config.config_path,
            domname: config.domname,
            terrain_dir: config.dirter,
            dataset_path,
            dataset_exists,
        })
    }
}
