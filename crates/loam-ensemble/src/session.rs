//! The editing session: one open dataset, its grid, legend, and ledger.
//!
//! The session owns the mutable state the interactive and batch drivers
//! work against. It is constructed on dataset open, mutated only through
//! [`apply`](Session::apply) and the ledger, and released on
//! [`close`](Session::close). There are no ambient globals.

use std::path::Path;

use indexmap::IndexMap;
use loam_core::{ChangeSpec, Grid, Legend, Region};
use loam_dataset::{GridHandle, GridStore};
use loam_perturb::{census, perturb_spec};
use tracing::info;

use crate::config::DomainConfig;
use crate::error::SessionError;
use crate::ledger::{ChangeLedger, Scope};
use crate::propagate::{check_gate, propagate, PropagationReport};
use crate::registry::Registry;

/// An editing session over one member's domain dataset.
///
/// The in-memory grid is exclusively owned by the session for its
/// lifetime; edits accumulate in memory and reach the dataset only on
/// [`save`](Session::save).
pub struct Session {
    config: DomainConfig,
    handle: Box<dyn GridHandle>,
    grid: Grid,
    legend: Legend,
    ledger: ChangeLedger,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("grid", &self.grid)
            .field("legend", &self.legend)
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Resolve `config_path`, open its dataset, and load grid and legend.
    ///
    /// # Errors
    ///
    /// Configuration, open/read, and legend-parse failures are all fatal
    /// here: a session without a grid and a category vocabulary is
    /// useless.
    pub fn open(store: &dyn GridStore, config_path: &Path) -> Result<Self, SessionError> {
        let config = DomainConfig::load(config_path)?;
        let dataset_path = config.dataset_path();
        let mut handle = store.open(&dataset_path)?;
        let grid = handle.read()?;
        let legend = Legend::parse(&handle.legend_text()?)?;
        info!(
            domname = %config.domname,
            dataset = %dataset_path.display(),
            rows = grid.rows(),
            cols = grid.cols(),
            categories = legend.len(),
            "session opened"
        );
        Ok(Self {
            config,
            handle,
            grid,
            legend,
            ledger: ChangeLedger::new(),
        })
    }

    /// The session's resolved configuration.
    pub fn config(&self) -> &DomainConfig {
        &self.config
    }

    /// The current in-memory grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The dataset's category legend.
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// The changes recorded so far.
    pub fn ledger(&self) -> &ChangeLedger {
        &self.ledger
    }

    /// Validate and apply one change to the in-memory grid, recording it
    /// in the ledger. Returns the number of cells changed.
    ///
    /// # Errors
    ///
    /// Returns the validation failure (percent range, unknown category)
    /// without touching the grid. In interactive use the caller reports
    /// it and the session continues.
    pub fn apply(
        &mut self,
        region: Region,
        category: i32,
        percent: f64,
        scope: Scope,
    ) -> Result<usize, SessionError> {
        let spec = ChangeSpec::new(region, category, percent);
        spec.validate(&self.legend)?;
        let cells_changed = perturb_spec(&mut self.grid, &spec);
        self.ledger.record(spec, scope);
        Ok(cells_changed)
    }

    /// Apply a replayed batch of changes, fail-fast.
    ///
    /// Every spec is validated before any is applied: a batch run is
    /// unattended, so one bad spec aborts the whole run with nothing
    /// mutated rather than leaving a half-applied sequence.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn apply_batch(&mut self, specs: &[ChangeSpec]) -> Result<Vec<usize>, SessionError> {
        for spec in specs {
            spec.validate(&self.legend)?;
        }
        Ok(specs
            .iter()
            .map(|spec| {
                let cells_changed = perturb_spec(&mut self.grid, spec);
                self.ledger.record(*spec, Scope::Single);
                cells_changed
            })
            .collect())
    }

    /// Per-category cell counts of the selection, for display.
    pub fn census(&self, region: Region) -> IndexMap<i32, usize> {
        census(&self.grid, region)
    }

    /// Write the in-memory grid back to the dataset and flush.
    ///
    /// # Errors
    ///
    /// A write or sync failure on the session's own dataset is fatal,
    /// unlike per-member failures during bulk propagation.
    pub fn save(&mut self) -> Result<(), SessionError> {
        self.handle.write(&self.grid)?;
        self.handle.sync()?;
        info!(dataset = %self.config.dataset_path().display(), "session saved");
        Ok(())
    }

    /// Save the current member, then replay the bulk-staged changes
    /// against every other registered member.
    ///
    /// # Errors
    ///
    /// Gate violations ([`PropagateError`](crate::PropagateError)) are
    /// checked before anything is written, so a refused call has no side
    /// effects. A save failure on the current member also aborts before
    /// other members are touched.
    pub fn propagate_bulk(
        &mut self,
        store: &dyn GridStore,
        registry: &Registry,
    ) -> Result<PropagationReport, SessionError> {
        check_gate(registry, self.ledger.bulk_entries())?;
        self.save()?;
        let report = propagate(
            store,
            registry,
            &self.config.dataset_path(),
            self.ledger.bulk_entries(),
        )?;
        Ok(report)
    }

    /// Render the replay command line for this session's edit sequence.
    pub fn replay_command(&self, script: &str) -> String {
        self.ledger.render_replay(script)
    }

    /// Release the dataset handle without saving.
    ///
    /// # Errors
    ///
    /// Returns the driver's close failure.
    pub fn close(self) -> Result<(), SessionError> {
        self.handle.close()?;
        Ok(())
    }
}
