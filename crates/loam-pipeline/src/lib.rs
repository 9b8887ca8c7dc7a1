//! Two-phase ensemble setup orchestration.
//!
//! Building an ensemble is a long-running, interruptible pipeline:
//! generate numbered member configurations, run the terrain pass, pause
//! for manual land-surface editing, then resume with the sst/icbc passes
//! and cross-member input propagation. The pause is durable: the
//! [`StateStore`] persists a small checkpoint record so a later process
//! invocation can pick up exactly where the first left off.
//!
//! Once the jobs have run, the analysis pass averages the members'
//! surface output files into per-date ensemble means.
//!
//! External domain executables (`terrain`, `sst`, `icbc`, `sbatch`,
//! `nces`) are opaque commands behind the [`CommandRunner`] trait; only
//! their exit status matters here.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod error;
pub mod runner;
pub mod sbatch;
pub mod setup;
pub mod state;

pub use analysis::{ensemble_mean, AnalysisReport};
pub use error::{PipelineError, StateError};
pub use runner::{CommandRunner, ProcessRunner};
pub use sbatch::{submit_all, write_scripts, JobTemplate};
pub use setup::{begin, resume};
pub use state::{StateStore, WorkflowState, STATE_FILE};
