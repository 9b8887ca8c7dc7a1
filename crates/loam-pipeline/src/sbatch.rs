//! Batch job script generation and submission.
//!
//! Each ensemble member gets its own `<n>submit.sbatch` script: a
//! site-specific prologue copied from a header template, then the
//! launch command for that member's configuration. The template is a
//! plain text file whose lines up to the first `srun` line are the
//! prologue; the `srun` line itself becomes the launch prefix.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::PipelineError;
use crate::runner::CommandRunner;

/// Launch prefix used when no header template provides one.
pub const DEFAULT_LAUNCH: &str = "srun -n 64 regcmMPI";

/// A parsed job-script template: prologue lines plus launch prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobTemplate {
    /// Script lines emitted before the launch command.
    pub header: Vec<String>,
    /// Execution-command prefix; the member configuration is appended.
    pub launch_prefix: String,
}

impl Default for JobTemplate {
    fn default() -> Self {
        Self {
            header: vec![
                "#!/bin/bash".to_string(),
                "#SBATCH -N 1".to_string(),
                "#SBATCH -n 64".to_string(),
                "#SBATCH -t 240".to_string(),
                "#SBATCH --mem=128GB".to_string(),
                String::new(),
                "module load regcm".to_string(),
            ],
            launch_prefix: DEFAULT_LAUNCH.to_string(),
        }
    }
}

impl JobTemplate {
    /// Parse template text: everything up to the first line beginning
    /// with `srun` is prologue, that line is the launch prefix, and the
    /// rest is ignored. Text without an `srun` line keeps the default
    /// prefix.
    pub fn parse(content: &str) -> Self {
        let mut header = Vec::new();
        let mut launch_prefix = DEFAULT_LAUNCH.to_string();
        for line in content.lines() {
            let line = line.trim_end();
            if line.trim_start().starts_with("srun") {
                launch_prefix = line.to_string();
                break;
            }
            header.push(line.to_string());
        }
        Self {
            header,
            launch_prefix,
        }
    }

    /// Load the conventional template `../header.sbatch` relative to
    /// the working directory, falling back to the built-in default when
    /// it is absent or unreadable.
    pub fn discover(work_dir: &Path) -> Self {
        let template_path = work_dir.join("..").join("header.sbatch");
        match fs::read_to_string(&template_path) {
            Ok(content) => {
                debug!(path = %template_path.display(), "using header template");
                Self::parse(&content)
            }
            Err(_) => Self::default(),
        }
    }

    /// Render the script for member `ordinal` of `base_name`.
    pub fn render(&self, ordinal: u32, base_name: &str) -> String {
        let mut lines = self.header.clone();
        lines.push(String::new());
        lines.push(format!("{} {ordinal}{base_name}", self.launch_prefix));
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Write `<n>submit.sbatch` for every member into `work_dir`.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] on write failure.
pub fn write_scripts(
    work_dir: &Path,
    template: &JobTemplate,
    base_name: &str,
    count: u32,
) -> Result<Vec<PathBuf>, PipelineError> {
    let mut written = Vec::with_capacity(count as usize);
    for ordinal in 1..=count {
        let path = work_dir.join(format!("{ordinal}submit.sbatch"));
        fs::write(&path, template.render(ordinal, base_name)).map_err(|e| PipelineError::Io {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        info!(script = %path.display(), "wrote job script");
        written.push(path);
    }
    Ok(written)
}

/// Submit every `<n>submit.sbatch` in `work_dir` in numeric order.
/// Returns the number of jobs submitted.
///
/// # Errors
///
/// Returns [`PipelineError::NoJobScripts`] when the directory holds no
/// generated scripts, or the first submission failure (submission is
/// fail-fast: a queue that rejects one job will reject the rest).
pub fn submit_all(work_dir: &Path, runner: &mut dyn CommandRunner) -> Result<usize, PipelineError> {
    let entries = fs::read_dir(work_dir).map_err(|e| PipelineError::Io {
        path: work_dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut scripts: Vec<(u32, String)> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter_map(|name| {
            let ordinal: u32 = name.strip_suffix("submit.sbatch")?.parse().ok()?;
            Some((ordinal, name))
        })
        .collect();
    if scripts.is_empty() {
        return Err(PipelineError::NoJobScripts {
            dir: work_dir.to_path_buf(),
        });
    }
    scripts.sort();
    for (_, name) in &scripts {
        runner.run("sbatch", &[name.as_str()], work_dir)?;
    }
    Ok(scripts.len())
}
