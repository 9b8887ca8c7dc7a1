//! Test utilities for Loam development.
//!
//! Provides [`MemStore`], an in-memory [`GridStore`] with write-failure
//! injection, plus fixture helpers for legends and on-disk member
//! configuration trees.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use loam_core::Grid;
use loam_dataset::{DatasetError, GridHandle, GridStore};

/// A legend attribute block with a handful of land-use categories.
pub fn legend_fixture() -> String {
    "1 => Crop/mixed farming\n\
     2 => Short grass\n\
     3 => Evergreen needleleaf tree\n\
     7 => Urban\n\
     8 => Desert\n"
        .to_string()
}

#[derive(Clone)]
struct MemDataset {
    grid: Grid,
    legend_text: String,
    fail_writes: bool,
}

/// In-memory [`GridStore`] keyed by dataset path.
///
/// Handles write back into the shared map so tests can assert on
/// post-propagation state via [`grid`](MemStore::grid). Cloning the
/// store shares the underlying map.
#[derive(Clone, Default)]
pub struct MemStore {
    inner: Arc<Mutex<HashMap<PathBuf, MemDataset>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a dataset at `path`.
    pub fn insert(&self, path: impl Into<PathBuf>, grid: Grid, legend_text: impl Into<String>) {
        self.inner.lock().unwrap().insert(
            path.into(),
            MemDataset {
                grid,
                legend_text: legend_text.into(),
                fail_writes: false,
            },
        );
    }

    /// Make every write to the dataset at `path` fail.
    pub fn fail_writes(&self, path: impl Into<PathBuf>) {
        if let Some(ds) = self.inner.lock().unwrap().get_mut(&path.into()) {
            ds.fail_writes = true;
        }
    }

    /// Snapshot the stored grid at `path` for assertions.
    pub fn grid(&self, path: impl AsRef<Path>) -> Option<Grid> {
        self.inner
            .lock()
            .unwrap()
            .get(path.as_ref())
            .map(|ds| ds.grid.clone())
    }
}

impl GridStore for MemStore {
    fn open(&self, path: &Path) -> Result<Box<dyn GridHandle>, DatasetError> {
        if !self.inner.lock().unwrap().contains_key(path) {
            return Err(DatasetError::Open {
                path: path.to_path_buf(),
                reason: "no such dataset".to_string(),
            });
        }
        Ok(Box::new(MemHandle {
            inner: Arc::clone(&self.inner),
            path: path.to_path_buf(),
        }))
    }
}

struct MemHandle {
    inner: Arc<Mutex<HashMap<PathBuf, MemDataset>>>,
    path: PathBuf,
}

impl MemHandle {
    fn with<T>(
        &self,
        f: impl FnOnce(&mut MemDataset) -> Result<T, DatasetError>,
    ) -> Result<T, DatasetError> {
        let mut map = self.inner.lock().unwrap();
        let ds = map.get_mut(&self.path).ok_or_else(|| DatasetError::Read {
            path: self.path.clone(),
            reason: "dataset removed while open".to_string(),
        })?;
        f(ds)
    }
}

impl GridHandle for MemHandle {
    fn read(&mut self) -> Result<Grid, DatasetError> {
        self.with(|ds| Ok(ds.grid.clone()))
    }

    fn write(&mut self, grid: &Grid) -> Result<(), DatasetError> {
        let path = self.path.clone();
        self.with(|ds| {
            if ds.fail_writes {
                return Err(DatasetError::Write {
                    path,
                    reason: "injected write failure".to_string(),
                });
            }
            ds.grid = grid.clone();
            Ok(())
        })
    }

    fn legend_text(&self) -> Result<String, DatasetError> {
        self.with(|ds| Ok(ds.legend_text.clone()))
    }

    fn sync(&mut self) -> Result<(), DatasetError> {
        Ok(())
    }

    fn close(mut self: Box<Self>) -> Result<(), DatasetError> {
        self.sync()
    }
}

/// Write a numbered member configuration file into `dir` and create its
/// input directory. Returns the configuration path.
///
/// The file follows the `*.in` convention the registry scans for:
/// a basename starting with the ordinal, `domname = '<n><domname>'`,
/// and `dirter = './<n>input'`.
pub fn write_member_config(dir: &Path, ordinal: u32, domname: &str) -> PathBuf {
    let config = dir.join(format!("{ordinal}regcm.in"));
    let content = format!(
        " &terrainparam\n domname = '{ordinal}{domname}',\n dirter = './{ordinal}input',\n /\n"
    );
    fs::write(&config, content).unwrap();
    fs::create_dir_all(dir.join(format!("{ordinal}input"))).unwrap();
    config
}

/// The dataset path a member configuration written by
/// [`write_member_config`] resolves to.
pub fn member_dataset_path(dir: &Path, ordinal: u32, domname: &str) -> PathBuf {
    dir.join(format!("{ordinal}input"))
        .join(format!("{ordinal}{domname}_DOMAIN000.nc"))
}

/// Create an empty placeholder file at the member's dataset path so the
/// registry existence check passes.
pub fn touch_member_dataset(dir: &Path, ordinal: u32, domname: &str) -> PathBuf {
    let path = member_dataset_path(dir, ordinal, domname);
    fs::write(&path, b"").unwrap();
    path
}
