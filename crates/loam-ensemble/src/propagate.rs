//! Bulk propagation of staged changes across the ensemble.
//!
//! Replays the bulk ledger against every other member's dataset. Each
//! member gets the same region/category/percentage sequence but an
//! independent random draw, so the ensemble ends up consistently-but-
//! independently perturbed. Member failures are isolated: one member's
//! I/O error never aborts propagation to the rest.

use std::fmt;
use std::path::{Path, PathBuf};

use loam_core::ChangeSpec;
use loam_dataset::{DatasetError, GridStore};
use loam_perturb::perturb_spec;
use tracing::{info, warn};

use crate::config::absolutize;
use crate::error::PropagateError;
use crate::member::EnsembleMember;
use crate::registry::Registry;

/// One member successfully updated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberOutcome {
    /// The member's ordinal.
    pub ordinal: u32,
    /// The dataset that was updated.
    pub dataset_path: PathBuf,
    /// Total cells changed across all applied specs.
    pub cells_changed: usize,
}

/// One member that could not be updated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberFailure {
    /// The member's ordinal.
    pub ordinal: u32,
    /// The dataset that failed.
    pub dataset_path: PathBuf,
    /// The error that stopped this member.
    pub error: DatasetError,
}

/// Final tally of a propagation run.
#[derive(Clone, Debug, Default)]
pub struct PropagationReport {
    /// Members updated, in ordinal order.
    pub succeeded: Vec<MemberOutcome>,
    /// Members that failed, with reasons, in ordinal order.
    pub failed: Vec<MemberFailure>,
    /// Number of bulk entries applied per member.
    pub specs_applied: usize,
}

impl PropagationReport {
    /// Whether every processed member succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for PropagationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} member(s) updated, {} failed, {} change(s) applied each",
            self.succeeded.len(),
            self.failed.len(),
            self.specs_applied
        )
    }
}

/// Check the preconditions for a bulk operation without side effects.
///
/// # Errors
///
/// Returns the refusal reason: [`PropagateError::NoMembers`],
/// [`PropagateError::MissingDatasets`], or
/// [`PropagateError::NothingStaged`].
pub fn check_gate(registry: &Registry, specs: &[ChangeSpec]) -> Result<(), PropagateError> {
    if registry.is_empty() {
        return Err(PropagateError::NoMembers);
    }
    if !registry.all_valid() {
        return Err(PropagateError::MissingDatasets {
            paths: registry.missing(),
        });
    }
    if specs.is_empty() {
        return Err(PropagateError::NothingStaged);
    }
    Ok(())
}

/// Apply `specs` to every registered member except the one backing
/// `current_dataset` (already mutated and saved by the caller).
///
/// Each member is processed in a fully isolated open/read/apply/write/
/// sync/close sequence, one writable handle at a time. A failing member
/// is recorded in the report and processing continues.
///
/// # Errors
///
/// Refused via [`check_gate`] before any dataset is touched; per-member
/// I/O failures land in the report instead.
pub fn propagate(
    store: &dyn GridStore,
    registry: &Registry,
    current_dataset: &Path,
    specs: &[ChangeSpec],
) -> Result<PropagationReport, PropagateError> {
    check_gate(registry, specs)?;

    let mut report = PropagationReport {
        specs_applied: specs.len(),
        ..Default::default()
    };
    // The skip must not depend on how the caller spelled the path, so
    // both sides are compared in absolutized form.
    let current_dataset = absolutize(current_dataset);
    for member in registry.members() {
        if absolutize(&member.dataset_path) == current_dataset {
            // The caller's session already holds this grid.
            continue;
        }
        match apply_to_member(store, member, specs) {
            Ok(cells_changed) => {
                info!(
                    ordinal = member.ordinal,
                    cells = cells_changed,
                    dataset = %member.dataset_path.display(),
                    "member updated"
                );
                report.succeeded.push(MemberOutcome {
                    ordinal: member.ordinal,
                    dataset_path: member.dataset_path.clone(),
                    cells_changed,
                });
            }
            Err(error) => {
                warn!(
                    ordinal = member.ordinal,
                    dataset = %member.dataset_path.display(),
                    %error,
                    "member failed"
                );
                report.failed.push(MemberFailure {
                    ordinal: member.ordinal,
                    dataset_path: member.dataset_path.clone(),
                    error,
                });
            }
        }
    }
    Ok(report)
}

/// The per-member transaction: open, read, apply every spec with a
/// fresh draw, write back, flush, close.
fn apply_to_member(
    store: &dyn GridStore,
    member: &EnsembleMember,
    specs: &[ChangeSpec],
) -> Result<usize, DatasetError> {
    let mut handle = store.open(&member.dataset_path)?;
    let mut grid = handle.read()?;
    let mut cells_changed = 0;
    for spec in specs {
        cells_changed += perturb_spec(&mut grid, spec);
    }
    handle.write(&grid)?;
    handle.sync()?;
    handle.close()?;
    Ok(cells_changed)
}
