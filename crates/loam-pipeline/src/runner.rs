//! Opaque external command execution.

use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::error::PipelineError;

/// Runs the external domain executables.
///
/// The pipeline only cares about success or failure; everything else
/// about `terrain`, `sst`, `icbc`, and `sbatch` is opaque. Tests
/// substitute a recording fake.
pub trait CommandRunner {
    /// Run `program` with `args` in `cwd`, waiting for completion.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::CommandFailed`] when the program cannot
    /// be spawned or exits non-zero.
    fn run(&mut self, program: &str, args: &[&str], cwd: &Path) -> Result<(), PipelineError>;
}

/// [`CommandRunner`] over real child processes, inheriting stdio.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, program: &str, args: &[&str], cwd: &Path) -> Result<(), PipelineError> {
        info!(program, ?args, cwd = %cwd.display(), "running command");
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|e| PipelineError::CommandFailed {
                program: program.to_string(),
                detail: e.to_string(),
            })?;
        if !status.success() {
            return Err(PipelineError::CommandFailed {
                program: program.to_string(),
                detail: match status.code() {
                    Some(code) => format!("exit code {code}"),
                    None => "terminated by signal".to_string(),
                },
            });
        }
        Ok(())
    }
}
