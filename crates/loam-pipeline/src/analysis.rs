//! Ensemble-mean analysis of completed runs.
//!
//! Once the submitted jobs finish, every member has written surface
//! (`_SRF`) files into its own `<n>output/` directory. The analysis pass
//! averages the ensemble date by date with the external `nces` tool,
//! producing one `nces_<date>.nc` per output date.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::PipelineError;
use crate::runner::CommandRunner;

/// What an analysis pass discovered and averaged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Number of member output directories averaged.
    pub member_count: u32,
    /// Domain name shared by the surface files, ordinal prefix removed.
    pub base_name: String,
    /// Output dates averaged, in filename order.
    pub dates: Vec<String>,
}

/// Average the ensemble's surface output files date by date.
///
/// The member count is discovered by probing `1output/`, `2output/`, ...
/// until the first gap. Output dates come from member 1's
/// `1<base>_SRF.<date>.nc` files; for each date one `nces` invocation is
/// run in `work_dir` with every member's file for that date and the
/// destination `nces_<date>.nc`. Averaging is fail-fast: `nces` refusing
/// one date says the tool or its inputs are broken for the rest too.
///
/// # Errors
///
/// Returns [`PipelineError::NoMemberOutputs`] when no `1output/`
/// directory exists, [`PipelineError::NoSurfaceFiles`] when member 1 has
/// no surface files to take dates from, and command or I/O failures
/// otherwise.
pub fn ensemble_mean(
    work_dir: &Path,
    runner: &mut dyn CommandRunner,
) -> Result<AnalysisReport, PipelineError> {
    let member_count = count_output_dirs(work_dir);
    if member_count == 0 {
        return Err(PipelineError::NoMemberOutputs {
            dir: work_dir.to_path_buf(),
        });
    }

    let first_output = work_dir.join("1output");
    let (base_name, dates) = collect_surface_dates(&first_output)?;

    info!(
        members = member_count,
        base = %base_name,
        dates = dates.len(),
        "averaging surface output"
    );
    for date in &dates {
        let mut args: Vec<String> = (1..=member_count)
            .map(|n| format!("{n}output/{n}{base_name}_SRF.{date}.nc"))
            .collect();
        args.push(format!("nces_{date}.nc"));
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        runner.run("nces", &args, work_dir)?;
        info!(date = %date, "wrote ensemble mean");
    }

    Ok(AnalysisReport {
        member_count,
        base_name,
        dates,
    })
}

/// Count the consecutive `<n>output/` directories starting at 1.
fn count_output_dirs(work_dir: &Path) -> u32 {
    let mut count = 0;
    while work_dir.join(format!("{}output", count + 1)).is_dir() {
        count += 1;
    }
    count
}

/// Collect the base name and sorted dates of member 1's surface files.
fn collect_surface_dates(output_dir: &Path) -> Result<(String, Vec<String>), PipelineError> {
    let entries = fs::read_dir(output_dir).map_err(|e| PipelineError::Io {
        path: output_dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();

    let mut base_name: Option<String> = None;
    let mut dates = Vec::new();
    for name in &names {
        let Some((base, date)) = split_surface_name(name) else {
            continue;
        };
        match &base_name {
            None => {
                base_name = Some(base.to_string());
                dates.push(date.to_string());
            }
            Some(expected) if expected == base => dates.push(date.to_string()),
            Some(_) => {}
        }
    }
    match base_name {
        Some(base_name) => Ok((base_name, dates)),
        None => Err(PipelineError::NoSurfaceFiles {
            dir: output_dir.to_path_buf(),
        }),
    }
}

/// Split `1<base>_SRF.<date>.nc` into base name and date; `None` for
/// anything else.
fn split_surface_name(name: &str) -> Option<(&str, &str)> {
    let rest = name.strip_prefix('1')?.strip_suffix(".nc")?;
    let (base, date) = rest.rsplit_once("_SRF.")?;
    if base.is_empty() || date.is_empty() || !date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((base, date))
}
