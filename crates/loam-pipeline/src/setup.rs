//! The two pipeline phases.
//!
//! `begin` fans a base configuration out into numbered member
//! configurations, runs the terrain pass for member 1, and checkpoints.
//! The operator then edits land-surface data at leisure. `resume` picks
//! the checkpoint back up: sst and icbc passes, input propagation to the
//! other members, job-script generation, and checkpoint removal.

use std::fs;
use std::path::{Path, PathBuf};

use loam_core::namelist;
use tracing::info;

use crate::error::PipelineError;
use crate::runner::CommandRunner;
use crate::sbatch::{write_scripts, JobTemplate};
use crate::state::{StateStore, WorkflowState};

fn io_err(path: impl Into<PathBuf>, e: std::io::Error) -> PipelineError {
    PipelineError::Io {
        path: path.into(),
        reason: e.to_string(),
    }
}

/// Initial phase: generate member configurations and run terrain.
///
/// Reads `base_file` (a filename within `work_dir`), writes one numbered
/// copy per member with `domname`, `dirter`, `dirglob`, and `dirout`
/// rewritten, creates the per-member input and output directories, runs
/// `terrain` on member 1's configuration, and persists the checkpoint
/// for [`resume`].
///
/// # Errors
///
/// Returns [`PipelineError::BaseMissing`] when the base configuration
/// does not exist, [`PipelineError::MissingDomname`] when it carries no
/// `domname` assignment, and command or I/O failures otherwise. A
/// failure leaves no checkpoint behind.
pub fn begin(
    work_dir: &Path,
    base_file: &str,
    count: u32,
    runner: &mut dyn CommandRunner,
    store: &StateStore,
) -> Result<(), PipelineError> {
    let base_path = work_dir.join(base_file);
    if !base_path.is_file() {
        return Err(PipelineError::BaseMissing { path: base_path });
    }
    let content = fs::read_to_string(&base_path).map_err(|e| io_err(&base_path, e))?;
    let base_domname = namelist::lookup(&content, "domname")
        .ok_or_else(|| PipelineError::MissingDomname {
            path: base_path.clone(),
        })?
        .to_string();

    info!(base = base_file, count, domname = %base_domname, "generating member configurations");
    for ordinal in 1..=count {
        let input_dir = work_dir.join(format!("{ordinal}input"));
        let output_dir = work_dir.join(format!("{ordinal}output"));
        fs::create_dir_all(&input_dir).map_err(|e| io_err(&input_dir, e))?;
        fs::create_dir_all(&output_dir).map_err(|e| io_err(&output_dir, e))?;

        let mut member = namelist::set_value(&content, "domname", &format!("{ordinal}{base_domname}"));
        member = namelist::set_value(&member, "dirter", &format!("./{ordinal}input"));
        member = namelist::set_value(&member, "dirglob", &format!("./{ordinal}input"));
        member = namelist::set_value(&member, "dirout", &format!("./{ordinal}output"));
        let member_path = work_dir.join(format!("{ordinal}{base_file}"));
        fs::write(&member_path, member).map_err(|e| io_err(&member_path, e))?;
    }

    info!("running terrain for member 1");
    let member_one = format!("1{base_file}");
    runner.run("terrain", &[member_one.as_str()], work_dir)?;

    store.save(&WorkflowState {
        base_name: base_file.to_string(),
        count,
        base_domname,
    })?;
    info!("paused for land-surface editing");
    Ok(())
}

/// Resumed phase: sst and icbc passes, then fan-out and job scripts.
///
/// Loads the checkpoint written by [`begin`], runs `sst` and `icbc` on
/// member 1's configuration, copies member 1's input files to every
/// other member (renaming the domain-name prefix), writes one
/// `<n>submit.sbatch` per member, and deletes the checkpoint.
///
/// # Errors
///
/// Returns [`StateError::NoPausedRun`] (wrapped in
/// [`PipelineError::State`]) when no checkpoint exists, and command or
/// I/O failures otherwise. The checkpoint survives a failure, so the
/// phase can be retried.
///
/// [`StateError::NoPausedRun`]: crate::error::StateError::NoPausedRun
pub fn resume(
    work_dir: &Path,
    runner: &mut dyn CommandRunner,
    store: &StateStore,
) -> Result<WorkflowState, PipelineError> {
    let state = store.load()?;
    info!(base = %state.base_name, count = state.count, "resuming paused run");

    let member_one = format!("1{}", state.base_name);
    runner.run("sst", &[member_one.as_str()], work_dir)?;
    runner.run("icbc", &[member_one.as_str()], work_dir)?;

    propagate_inputs(work_dir, &state)?;

    let template = JobTemplate::discover(work_dir);
    write_scripts(work_dir, &template, &state.base_name, state.count)?;

    store.clear()?;
    info!("setup complete; job scripts ready for submission");
    Ok(state)
}

/// Copy member 1's generated input files to every other member,
/// renaming the `1<domname>` filename prefix to that member's ordinal.
fn propagate_inputs(work_dir: &Path, state: &WorkflowState) -> Result<(), PipelineError> {
    let source_dir = work_dir.join("1input");
    let source_prefix = format!("1{}", state.base_domname);
    let entries = fs::read_dir(&source_dir).map_err(|e| io_err(&source_dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(&source_dir, e))?;
        if entry.path().is_file() {
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
    }
    names.sort();

    for ordinal in 2..=state.count {
        let dest_dir = work_dir.join(format!("{ordinal}input"));
        fs::create_dir_all(&dest_dir).map_err(|e| io_err(&dest_dir, e))?;
        for name in &names {
            let dest_name = match name.strip_prefix(&source_prefix) {
                Some(rest) => format!("{ordinal}{}{rest}", state.base_domname),
                None => name.clone(),
            };
            let src = source_dir.join(name);
            let dest = dest_dir.join(&dest_name);
            fs::copy(&src, &dest).map_err(|e| io_err(&dest, e))?;
        }
        info!(ordinal, files = names.len(), "propagated inputs");
    }
    Ok(())
}
