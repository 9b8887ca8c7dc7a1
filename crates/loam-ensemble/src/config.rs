//! Domain configuration files (`*.in`) and their resolution.
//!
//! A configuration names the domain (`domname`) and the directories the
//! preprocessing chain writes into (`dirter`, `dirglob`). Relative paths
//! are resolved against the configuration file's own directory, not the
//! process working directory, so a registry scan can pick up members
//! living anywhere.

use std::fs;
use std::path::{Component, Path, PathBuf};

use loam_core::namelist;

use crate::error::ConfigError;

/// Filename suffix of the domain dataset produced by the terrain pass.
pub const DOMAIN_SUFFIX: &str = "_DOMAIN000.nc";

/// A parsed domain configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainConfig {
    /// The configuration file this was parsed from.
    pub config_path: PathBuf,
    /// The domain identifier.
    pub domname: String,
    /// Resolved terrain directory (`dirter`, default `./input`).
    pub dirter: PathBuf,
    /// Resolved global-data directory (`dirglob`, default = `dirter`).
    pub dirglob: PathBuf,
}

impl DomainConfig {
    /// Read and parse the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unreadable`] on I/O failure and
    /// [`ConfigError::MissingDomname`] when the file has no `domname`
    /// assignment.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_content(path, &content)
    }

    /// Parse already-read configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDomname`] when the text has no
    /// `domname` assignment.
    pub fn from_content(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let domname = namelist::lookup(content, "domname")
            .ok_or_else(|| ConfigError::MissingDomname {
                path: path.to_path_buf(),
            })?
            .to_string();
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let dirter = resolve(base_dir, namelist::lookup(content, "dirter").unwrap_or("./input"));
        let dirglob = match namelist::lookup(content, "dirglob") {
            Some(p) => resolve(base_dir, p),
            None => dirter.clone(),
        };
        Ok(Self {
            config_path: path.to_path_buf(),
            domname,
            dirter,
            dirglob,
        })
    }

    /// The expected path of the domain dataset:
    /// `<dirter>/<domname>_DOMAIN000.nc`.
    pub fn dataset_path(&self) -> PathBuf {
        self.dirter.join(format!("{}{DOMAIN_SUFFIX}", self.domname))
    }
}

/// Find the single `*.in` configuration file in `dir`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] when the directory holds none and
/// [`ConfigError::Ambiguous`] when it holds several, so the caller can
/// ask the operator to name one explicitly.
pub fn find_config(dir: &Path) -> Result<PathBuf, ConfigError> {
    let entries = fs::read_dir(dir).map_err(|e| ConfigError::Unreadable {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "in"))
        .collect();
    candidates.sort();
    match candidates.len() {
        0 => Err(ConfigError::NotFound {
            dir: dir.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(ConfigError::Ambiguous { candidates }),
    }
}

/// Resolve a configured path against the configuration file's directory,
/// normalizing `.` and `..` components lexically.
fn resolve(base_dir: &Path, value: &str) -> PathBuf {
    let value = Path::new(value);
    if value.is_absolute() {
        normalize(value)
    } else {
        normalize(&base_dir.join(value))
    }
}

/// Anchor a path to the process working directory and normalize it
/// lexically, so the same dataset compares equal however it was spelled.
///
/// Pure path arithmetic: the path need not exist, and symlinks are not
/// chased.
pub(crate) fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        match std::env::current_dir() {
            Ok(cwd) => normalize(&cwd.join(path)),
            Err(_) => normalize(path),
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
